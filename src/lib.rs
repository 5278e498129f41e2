#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod state;
pub mod store;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Monitor, MonitorSpec, SizeKey};
pub use layout::{Layout, compute_layout};
pub use parser::{DataError, generate_id, parse_monitors};
pub use render::{render_html, render_svg};
pub use state::ComparisonState;
pub use store::MonitorStore;
pub use theme::Theme;

/// Settings for one-shot rendering of a monitor list.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub mode: SizeKey,
    pub scale: Option<u32>,
    pub focus: Option<String>,
}

impl RenderOptions {
    pub fn standard() -> Self {
        Self {
            theme: Theme::standard(),
            layout: LayoutConfig::default(),
            mode: SizeKey::Display,
            scale: None,
            focus: None,
        }
    }

    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            ..Self::standard()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses a JSON5 monitor list and renders it straight to SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let specs = parse_monitors(input)?;
    let mut store = MonitorStore::new(specs, options.layout.default_enabled);
    let mut layout = compute_layout(
        &mut store,
        options.mode,
        options.scale.map(|scale| scale.max(1)),
        &options.theme,
        &options.layout,
    );
    if let Some(id) = options.focus.as_deref() {
        layout.focus(id);
    }
    Ok(render_svg(&layout, &options.theme, &options.layout))
}
