use crate::ir::SizeKey;

use super::label_placement::{LabelGeometry, PlacedLabel};

#[derive(Debug, Clone)]
pub struct CaptionBox {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Distance between the rectangle's top edge and the caption's top.
    pub offset: f32,
}

#[derive(Debug, Clone)]
pub struct MonitorBox {
    pub id: String,
    pub z_index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub border: String,
    pub border_width: f32,
    pub caption: CaptionBox,
    pub dimmed: bool,
}

#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub id: String,
    pub label: String,
    /// `"3: "` when captions show display indices, empty otherwise.
    pub index_prefix: String,
    pub specs: String,
    pub fill: String,
    pub z_index: usize,
    pub display_index: usize,
    pub enabled: bool,
    pub curved: bool,
    pub specs_url: String,
    pub thumbnail_url: String,
}

/// Everything needed to draw one comparison: the scaled rectangles of the
/// enabled monitors (bottom of the stack first) and the legend (id order).
#[derive(Debug, Clone)]
pub struct Layout {
    pub mode: SizeKey,
    pub ratio: u32,
    pub ratio_overridden: bool,
    pub width: f32,
    pub height: f32,
    pub boxes: Vec<MonitorBox>,
    pub legend: Vec<LegendEntry>,
    pub focus: Option<String>,
}

impl Layout {
    pub fn ratio_text(&self) -> String {
        format!("Scale ratio: 1:{}", self.ratio)
    }

    pub fn find_box(&self, id: &str) -> Option<&MonitorBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Highlights one drawn monitor and dims the rest. Returns false, and
    /// leaves the layout untouched, when `id` is not drawn.
    pub fn focus(&mut self, id: &str) -> bool {
        if self.find_box(id).is_none() {
            return false;
        }
        for b in &mut self.boxes {
            b.dimmed = b.id != id;
        }
        self.focus = Some(id.to_string());
        true
    }

    pub fn clear_focus(&mut self) {
        for b in &mut self.boxes {
            b.dimmed = false;
        }
        self.focus = None;
    }

    /// Caption extents in placement order, captions at their unshifted spot.
    pub fn caption_geometry(&self) -> Vec<LabelGeometry> {
        self.boxes
            .iter()
            .map(|b| LabelGeometry {
                id: b.id.clone(),
                left: b.caption.x,
                right: b.caption.x + b.caption.width,
                top: b.y,
            })
            .collect()
    }

    pub fn apply_label_offsets(&mut self, placed: &[PlacedLabel]) {
        for label in placed {
            if let Some(b) = self.boxes.iter_mut().find(|b| b.id == label.id) {
                b.caption.offset = label.offset;
                b.caption.y = b.y + label.offset;
            }
        }
        let bottom = self
            .boxes
            .iter()
            .map(|b| (b.y + b.height).max(b.caption.y + b.caption.height))
            .fold(0.0f32, f32::max);
        self.height = self.height.max(bottom);
    }
}
