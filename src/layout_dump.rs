use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub mode: String,
    pub ratio: u32,
    pub ratio_overridden: bool,
    pub width: f32,
    pub height: f32,
    pub focus: Option<String>,
    pub boxes: Vec<BoxDump>,
    pub legend: Vec<LegendDump>,
}

#[derive(Debug, Serialize)]
pub struct BoxDump {
    pub id: String,
    pub z_index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub caption: String,
    pub caption_x: f32,
    pub caption_y: f32,
    pub caption_width: f32,
    pub caption_offset: f32,
    pub dimmed: bool,
}

#[derive(Debug, Serialize)]
pub struct LegendDump {
    pub id: String,
    pub label: String,
    pub specs: String,
    pub display_index: usize,
    pub z_index: usize,
    pub enabled: bool,
    pub curved: bool,
    pub specs_url: String,
    pub thumbnail_url: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let boxes = layout
            .boxes
            .iter()
            .map(|b| BoxDump {
                id: b.id.clone(),
                z_index: b.z_index,
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
                fill: b.fill.clone(),
                caption: b.caption.text.clone(),
                caption_x: b.caption.x,
                caption_y: b.caption.y,
                caption_width: b.caption.width,
                caption_offset: b.caption.offset,
                dimmed: b.dimmed,
            })
            .collect();

        let legend = layout
            .legend
            .iter()
            .map(|entry| LegendDump {
                id: entry.id.clone(),
                label: entry.label.clone(),
                specs: entry.specs.clone(),
                display_index: entry.display_index,
                z_index: entry.z_index,
                enabled: entry.enabled,
                curved: entry.curved,
                specs_url: entry.specs_url.clone(),
                thumbnail_url: entry.thumbnail_url.clone(),
            })
            .collect();

        LayoutDump {
            mode: layout.mode.as_str().to_string(),
            ratio: layout.ratio,
            ratio_overridden: layout.ratio_overridden,
            width: layout.width,
            height: layout.height,
            focus: layout.focus.clone(),
            boxes,
            legend,
        }
    }
}

/// Writes the dump as pretty JSON to `path`, or stdout when `None`.
pub fn write_layout_dump(path: Option<&Path>, layout: &Layout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &dump)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}
