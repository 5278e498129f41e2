use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{Layout, LegendEntry, MonitorBox};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const GRAYSCALE_FILTER_ID: &str = "grayscale";

/// Full comparison as one SVG: scaled rectangles on top, legend below.
pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let pad = config.border_width.max(0.0);
    let gfx_height = layout.height + pad * 2.0;
    let legend_top = gfx_height + config.legend_gap;
    let legend_height = config.legend_row_height * (layout.legend.len() + 1) as f32;
    let width = (layout.width + pad * 2.0).max(200.0);
    let height = (legend_top + legend_height + pad).max(200.0);

    let mut svg = svg_open(width, height, theme);
    svg.push_str(&format!("<g transform=\"translate({pad:.2},{pad:.2})\">"));
    push_boxes(&mut svg, layout, theme);
    svg.push_str("</g>");

    svg.push_str(&format!(
        "<g transform=\"translate({pad:.2},{legend_top:.2})\">"
    ));
    push_legend(&mut svg, layout, theme, config);
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

/// Only the graphics region, for embedding next to an HTML legend.
pub fn render_gfx_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let pad = config.border_width.max(0.0);
    let width = layout.width + pad * 2.0;
    let height = (layout.height + pad * 2.0).max(1.0);

    let mut svg = svg_open(width, height, theme);
    svg.push_str(&format!("<g transform=\"translate({pad:.2},{pad:.2})\">"));
    push_boxes(&mut svg, layout, theme);
    svg.push_str("</g></svg>");
    svg
}

/// Standalone page with the graphics region and an HTML legend.
pub fn render_html(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Monitor comparison</title>\n<style>\n");
    html.push_str(&format!(
        "body {{ font-family: {}; font-size: {}px; color: {}; background: {}; }}\n",
        theme.font_family, theme.font_size, theme.text_color, theme.background
    ));
    html.push_str("#labels .entry { padding: 4px 8px; margin: 2px 0; }\n");
    html.push_str("#labels a { margin-left: 6px; }\n");
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!(
        "<div id=\"gfx_ratio\">Scale ratio: <b>1:{}</b></div>\n",
        layout.ratio
    ));
    html.push_str("<div id=\"gfx\">");
    html.push_str(&render_gfx_svg(layout, theme, config));
    html.push_str("</div>\n<div id=\"labels\">\n");
    for entry in &layout.legend {
        html.push_str(&legend_entry_html(entry));
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn svg_open(width: f32, height: f32, theme: &Theme) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    );
    svg.push_str(&format!(
        "<defs><filter id=\"{GRAYSCALE_FILTER_ID}\"><feColorMatrix type=\"saturate\" values=\"0\"/></filter></defs>"
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg
}

fn push_boxes(svg: &mut String, layout: &Layout, theme: &Theme) {
    for b in &layout.boxes {
        svg.push_str(&format!("<g id=\"gfx_{}\"{}>", escape_xml(&b.id), dim_attrs(b, theme)));
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            b.x, b.y, b.width, b.height, b.fill, b.border, b.border_width
        ));
        push_caption(svg, b, theme);
        svg.push_str("</g>");
    }
}

fn dim_attrs(b: &MonitorBox, theme: &Theme) -> String {
    if b.dimmed {
        format!(
            " opacity=\"{:.2}\" filter=\"url(#{GRAYSCALE_FILTER_ID})\"",
            theme.dim_opacity
        )
    } else {
        String::new()
    }
}

fn push_caption(svg: &mut String, b: &MonitorBox, theme: &Theme) {
    let caption = &b.caption;
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        caption.x, caption.y, caption.width, caption.height, theme.label_background
    ));
    let text_x = caption.x + caption.width / 2.0;
    let text_y = caption.y + caption.height / 2.0;
    svg.push_str(&format!(
        "<text x=\"{text_x:.2}\" y=\"{text_y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.text_color,
        escape_xml(&caption.text)
    ));
}

fn push_legend(svg: &mut String, layout: &Layout, theme: &Theme, config: &LayoutConfig) {
    let row = config.legend_row_height;
    let swatch = config.legend_swatch_size.min(row);
    svg.push_str(&format!(
        "<text x=\"0\" y=\"{:.2}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        row / 2.0,
        escape_xml(&theme.font_family),
        theme.font_size,
        theme.legend_text_color,
        escape_xml(&layout.ratio_text())
    ));
    for (idx, entry) in layout.legend.iter().enumerate() {
        let top = row * (idx + 1) as f32;
        let filter = if entry.enabled {
            String::new()
        } else {
            format!(" filter=\"url(#{GRAYSCALE_FILTER_ID})\" opacity=\"0.6\"")
        };
        svg.push_str(&format!("<g id=\"list_{}\"{filter}>", escape_xml(&entry.id)));
        svg.push_str(&format!(
            "<rect x=\"0\" y=\"{:.2}\" width=\"{swatch:.2}\" height=\"{swatch:.2}\" fill=\"{}\"/>",
            top + (row - swatch) / 2.0,
            entry.fill
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            swatch + 8.0,
            top + row / 2.0,
            escape_xml(&theme.font_family),
            theme.font_size,
            theme.legend_text_color,
            escape_xml(&legend_line(entry))
        ));
        svg.push_str("</g>");
    }
}

fn legend_line(entry: &LegendEntry) -> String {
    let mark = if entry.enabled { '\u{2611}' } else { '\u{2610}' };
    format!("{mark} {}{}: {}", entry.index_prefix, entry.label, entry.specs)
}

fn legend_entry_html(entry: &LegendEntry) -> String {
    let id = escape_xml(&entry.id);
    let grayscale = if entry.enabled { "0.0" } else { "1.0" };
    let checked = if entry.enabled { " checked=\"checked\"" } else { "" };
    format!(
        "<div id=\"list_{id}\" class=\"entry\" style=\"background-color: {}; filter: grayscale({grayscale})\">\n\
         <input type=\"checkbox\" id=\"{id}\"{checked}>\n\
         <label for=\"{id}\">{}{} <a target=\"_blank\" href=\"{}\">Specs</a> <a target=\"_blank\" href=\"{}\">Thumb</a><br/>{}</label>\n\
         </div>\n",
        entry.fill,
        escape_xml(&entry.index_prefix),
        escape_xml(&entry.label),
        escape_xml(&entry.specs_url),
        escape_xml(&entry.thumbnail_url),
        escape_xml(&entry.specs),
    )
}

pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
        }
        None => {
            print!("{}", text);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid PNG size {}x{}", render_cfg.width, render_cfg.height))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{MonitorSpec, PhysicalSize, PixelResolution, SizeKey};
    use crate::layout::compute_layout;
    use crate::store::MonitorStore;

    fn layout(config: &LayoutConfig) -> Layout {
        let specs = vec![
            MonitorSpec {
                label: "Dell U3818DW".to_string(),
                model: "1e7dca5".to_string(),
                display: PhysicalSize { w: 880.0, h: 367.0 },
                resolution: PixelResolution {
                    w: 3840.0,
                    h: 1600.0,
                    freq: 60.0,
                },
                checked: Some(true),
                curved: Some(true),
            },
            MonitorSpec {
                label: "Samsung <LU32J590>".to_string(),
                model: "5c6f1324".to_string(),
                display: PhysicalSize { w: 698.0, h: 392.0 },
                resolution: PixelResolution {
                    w: 3840.0,
                    h: 2160.0,
                    freq: 60.0,
                },
                checked: Some(false),
                curved: None,
            },
        ];
        let mut store = MonitorStore::new(specs, false);
        compute_layout(&mut store, SizeKey::Display, None, &Theme::standard(), config)
    }

    fn config() -> LayoutConfig {
        LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn render_svg_basic() {
        let config = config();
        let svg = render_svg(&layout(&config), &Theme::standard(), &config);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("gfx_dell_u3818dw"));
        assert!(!svg.contains("gfx_samsung"));
        assert!(svg.contains("Scale ratio: 1:1"));
        assert!(svg.contains("Samsung &lt;LU32J590&gt;: 698x392mm"));
        assert!(svg.contains("filter=\"url(#grayscale)\""));
    }

    #[test]
    fn dimmed_boxes_are_faded() {
        let config = config();
        let mut layout = layout(&config);
        let theme = Theme::standard();
        let plain = render_gfx_svg(&layout, &theme, &config);
        assert!(!plain.contains("opacity=\"0.50\""));
        layout.boxes.push(MonitorBox {
            id: "other".to_string(),
            ..layout.boxes[0].clone()
        });
        assert!(layout.focus("other"));
        let focused = render_gfx_svg(&layout, &theme, &config);
        assert!(focused.contains("opacity=\"0.50\""));
    }

    #[test]
    fn html_page_links_specs_and_thumbnails() {
        let config = config();
        let html = render_html(&layout(&config), &Theme::standard(), &config);
        assert!(html.contains("<div id=\"gfx\"><svg"));
        assert!(html.contains("href=\"https://www.displayspecifications.com/en/model/1e7dca5\""));
        assert!(html.contains("/images/model/5c6f1324/320/main.jpg"));
        assert!(html.contains("id=\"dell_u3818dw\" checked=\"checked\""));
        assert!(html.contains("filter: grayscale(1.0)"));
        assert!(!html.contains("px @"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
    }
}
