use crate::layout::label_placement::LabelMetrics;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const SPECS_URL_TEMPLATE: &str = "https://www.displayspecifications.com/en/model/{model}";
const THUMBNAIL_URL_TEMPLATE: &str =
    "https://www.displayspecifications.com/images/model/{model}/320/main.jpg";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width of the graphics region the widest monitor is scaled into.
    pub container_width: f32,
    pub label_height: f32,
    pub label_padding: f32,
    pub label_padding_x: f32,
    pub border_width: f32,
    pub legend_row_height: f32,
    pub legend_gap: f32,
    pub legend_swatch_size: f32,
    /// Show monitor labels on captions; when false the display index is shown.
    pub show_labels: bool,
    /// Initial state of records without an explicit `checked` flag.
    pub default_enabled: bool,
    pub measure_settle_ms: u64,
    pub fast_text_metrics: bool,
    pub specs_url: String,
    pub thumbnail_url: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container_width: 1200.0,
            label_height: 24.0,
            label_padding: 2.0,
            label_padding_x: 6.0,
            border_width: 3.0,
            legend_row_height: 22.0,
            legend_gap: 16.0,
            legend_swatch_size: 14.0,
            show_labels: true,
            default_enabled: false,
            measure_settle_ms: 100,
            fast_text_metrics: false,
            specs_url: SPECS_URL_TEMPLATE.to_string(),
            thumbnail_url: THUMBNAIL_URL_TEMPLATE.to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn label_metrics(&self) -> LabelMetrics {
        LabelMetrics {
            height: self.label_height,
            padding: self.label_padding,
        }
    }

    pub fn measure_settle_delay(&self) -> Duration {
        Duration::from_millis(self.measure_settle_ms)
    }

    pub fn specs_url_for(&self, model: &str) -> String {
        self.specs_url.replace("{model}", model)
    }

    pub fn thumbnail_url_for(&self, model: &str) -> String {
        self.thumbnail_url.replace("{model}", model)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::standard();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    background: Option<String>,
    palette: Option<Vec<String>>,
    fill_alpha: Option<String>,
    border_alpha: Option<String>,
    label_background: Option<String>,
    legend_text_color: Option<String>,
    dim_opacity: Option<f32>,
    curved_marker: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    container_width: Option<f32>,
    label_height: Option<f32>,
    label_padding: Option<f32>,
    label_padding_x: Option<f32>,
    border_width: Option<f32>,
    legend_row_height: Option<f32>,
    legend_gap: Option<f32>,
    legend_swatch_size: Option<f32>,
    show_labels: Option<bool>,
    default_enabled: Option<bool>,
    measure_settle_ms: Option<u64>,
    fast_text_metrics: Option<bool>,
    specs_url: Option<String>,
    thumbnail_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme `{theme_name}`"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.palette {
            if v.is_empty() {
                return Err(anyhow::anyhow!("themeVariables.palette must not be empty"));
            }
            config.theme.palette = v;
        }
        if let Some(v) = vars.fill_alpha {
            config.theme.fill_alpha = v;
        }
        if let Some(v) = vars.border_alpha {
            config.theme.border_alpha = v;
        }
        if let Some(v) = vars.label_background {
            config.theme.label_background = v;
        }
        if let Some(v) = vars.legend_text_color {
            config.theme.legend_text_color = v;
        }
        if let Some(v) = vars.dim_opacity {
            config.theme.dim_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.curved_marker {
            config.theme.curved_marker = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.container_width {
            config.layout.container_width = v;
        }
        if let Some(v) = layout.label_height {
            config.layout.label_height = v;
        }
        if let Some(v) = layout.label_padding {
            config.layout.label_padding = v;
        }
        if let Some(v) = layout.label_padding_x {
            config.layout.label_padding_x = v;
        }
        if let Some(v) = layout.border_width {
            config.layout.border_width = v;
        }
        if let Some(v) = layout.legend_row_height {
            config.layout.legend_row_height = v;
        }
        if let Some(v) = layout.legend_gap {
            config.layout.legend_gap = v;
        }
        if let Some(v) = layout.legend_swatch_size {
            config.layout.legend_swatch_size = v;
        }
        if let Some(v) = layout.show_labels {
            config.layout.show_labels = v;
        }
        if let Some(v) = layout.default_enabled {
            config.layout.default_enabled = v;
        }
        if let Some(v) = layout.measure_settle_ms {
            config.layout.measure_settle_ms = v;
        }
        if let Some(v) = layout.fast_text_metrics {
            config.layout.fast_text_metrics = v;
        }
        if let Some(v) = layout.specs_url {
            config.layout.specs_url = v;
        }
        if let Some(v) = layout.thumbnail_url {
            config.layout.thumbnail_url = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}
