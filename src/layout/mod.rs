pub mod label_placement;
pub mod order;
pub mod scale;
mod text;
mod types;

pub use types::*;

use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::ir::{Monitor, SizeKey};
use crate::store::MonitorStore;
use crate::theme::Theme;

use label_placement::place_all_labels;
use scale::compute_ratio;
use text::caption_text_width;

/// Builds the render model for the current store state.
///
/// Re-derives stacking and legend order for `mode`, the scale ratio (unless
/// overridden) and caption positions. Only enabled monitors get a
/// rectangle; every monitor gets a legend entry.
pub fn compute_layout(
    store: &mut MonitorStore,
    mode: SizeKey,
    scale_override: Option<u32>,
    theme: &Theme,
    config: &LayoutConfig,
) -> Layout {
    store.assign_order(mode);

    let ratio = match compute_ratio(store.monitors(), mode, config.container_width, scale_override)
    {
        Ok(ratio) => ratio,
        Err(err) => {
            warn!(%err, "falling back to a 1:1 scale");
            1
        }
    };
    debug!(ratio, overridden = scale_override.is_some(), "scale ratio");

    let boxes: Vec<MonitorBox> = store
        .monitors()
        .iter()
        .filter(|monitor| monitor.enabled)
        .map(|monitor| monitor_box(monitor, mode, ratio, theme, config))
        .collect();

    let legend = store
        .iter_by_id()
        .map(|monitor| legend_entry(monitor, mode, theme, config))
        .collect();

    let width = boxes
        .iter()
        .map(|b| b.x + b.width)
        .fold(config.container_width.max(0.0), f32::max);

    let mut layout = Layout {
        mode,
        ratio,
        ratio_overridden: scale_override.is_some(),
        width,
        height: 0.0,
        boxes,
        legend,
        focus: None,
    };
    let placed = place_all_labels(&layout.caption_geometry(), config.label_metrics());
    layout.apply_label_offsets(&placed);
    layout
}

fn monitor_box(
    monitor: &Monitor,
    mode: SizeKey,
    ratio: u32,
    theme: &Theme,
    config: &LayoutConfig,
) -> MonitorBox {
    let divider = ratio.max(1) as f32;
    let width = monitor.width(mode) / divider;
    let height = monitor.height(mode) / divider;
    let text = caption_text(monitor, theme, config);
    let caption_width = caption_text_width(&text, theme, config) + config.label_padding_x * 2.0;
    let caption_x = (width - caption_width).max(0.0);

    MonitorBox {
        id: monitor.id.clone(),
        z_index: monitor.z_index,
        x: 0.0,
        y: 0.0,
        width,
        height,
        fill: theme.fill_color(monitor.z_index),
        border: theme.border_color(monitor.z_index),
        border_width: config.border_width,
        caption: CaptionBox {
            text,
            x: caption_x,
            y: 0.0,
            width: caption_width,
            height: config.label_height,
            offset: 0.0,
        },
        dimmed: false,
    }
}

fn caption_text(monitor: &Monitor, theme: &Theme, config: &LayoutConfig) -> String {
    if !config.show_labels {
        return monitor.display_index.to_string();
    }
    if monitor.curved && !theme.curved_marker.is_empty() {
        format!("{} {}", monitor.label, theme.curved_marker)
    } else {
        monitor.label.clone()
    }
}

fn legend_entry(monitor: &Monitor, mode: SizeKey, theme: &Theme, config: &LayoutConfig) -> LegendEntry {
    LegendEntry {
        id: monitor.id.clone(),
        label: monitor.label.clone(),
        index_prefix: if config.show_labels {
            String::new()
        } else {
            format!("{}: ", monitor.display_index)
        },
        specs: monitor.specs(mode),
        fill: theme.fill_color(monitor.z_index),
        z_index: monitor.z_index,
        display_index: monitor.display_index,
        enabled: monitor.enabled,
        curved: monitor.curved,
        specs_url: config.specs_url_for(&monitor.model),
        thumbnail_url: config.thumbnail_url_for(&monitor.model),
    }
}
