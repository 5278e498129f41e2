use monitor_compare::{RenderOptions, SizeKey, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompareRenderOptions {
    theme: Option<String>,
    mode: Option<String>,
    width: Option<f32>,
    scale: Option<u32>,
    highlight: Option<String>,
    index_labels: Option<bool>,
    font_family: Option<String>,
    font_size: Option<f32>,
}

fn build_render_options(options: CompareRenderOptions) -> Result<RenderOptions, String> {
    let mut render_options = if options.theme.as_deref() == Some("classic") {
        RenderOptions::classic()
    } else {
        RenderOptions::standard()
    };
    // No system fonts to measure against in the browser.
    render_options.layout.fast_text_metrics = true;

    if let Some(mode) = options.mode.as_deref() {
        render_options.mode =
            SizeKey::from_token(mode).ok_or_else(|| format!("unknown mode `{mode}`"))?;
    }
    if let Some(width) = options.width {
        render_options.layout.container_width = width;
    }
    render_options.scale = options.scale.map(|scale| scale.max(1));
    render_options.focus = options.highlight;
    if options.index_labels == Some(true) {
        render_options.layout.show_labels = false;
    }
    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    Ok(render_options)
}

#[wasm_bindgen]
pub fn render_monitors_svg(data: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<CompareRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        CompareRenderOptions::default()
    };

    let render_options = build_render_options(options).map_err(|error| JsValue::from_str(&error))?;
    render_with_options(data, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
