// Vertical placement of monitor captions. Pure geometry, no SVG.
//
// Every caption starts at the top edge of its own rectangle. Captions whose
// horizontal extents overlap are pushed down greedily, one slot at a time,
// in the order they are placed.

/// Caption box size used for collision checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub height: f32,
    pub padding: f32,
}

impl LabelMetrics {
    fn step(&self) -> f32 {
        self.height + self.padding
    }
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self {
            height: 24.0,
            padding: 2.0,
        }
    }
}

/// Horizontal extent of a caption and the top of the rectangle it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGeometry {
    pub id: String,
    pub left: f32,
    pub right: f32,
    pub top: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub id: String,
    pub left: f32,
    pub right: f32,
    /// Absolute top of the caption.
    pub top: f32,
    /// Distance below the owning rectangle's top edge.
    pub offset: f32,
}

/// Two extents only miss each other when one ends strictly before the other
/// starts; touching edges overlap.
pub fn extents_overlap(a_left: f32, a_right: f32, b_left: f32, b_right: f32) -> bool {
    !(a_right < b_left || a_left > b_right)
}

/// Offset below `target.top` at which its caption clears every already
/// placed caption it overlaps horizontally.
///
/// Single pass over the overlapping captions sorted by top; a push is not
/// re-checked against captions earlier in the list.
pub fn place_label(target: &LabelGeometry, placed: &[PlacedLabel], metrics: LabelMetrics) -> f32 {
    let mut tops: Vec<f32> = placed
        .iter()
        .filter(|other| other.id != target.id)
        .filter(|other| extents_overlap(target.left, target.right, other.left, other.right))
        .map(|other| other.top)
        .collect();
    tops.sort_by(f32::total_cmp);

    let step = metrics.step();
    let mut tentative = target.top;
    for top in tops {
        if (tentative - top).abs() < step {
            tentative = top + step;
        }
    }
    (tentative - target.top).max(0.0)
}

/// Places captions in the given order, each against the ones before it.
pub fn place_all_labels(targets: &[LabelGeometry], metrics: LabelMetrics) -> Vec<PlacedLabel> {
    let mut placed: Vec<PlacedLabel> = Vec::with_capacity(targets.len());
    for target in targets {
        let offset = place_label(target, &placed, metrics);
        placed.push(PlacedLabel {
            id: target.id.clone(),
            left: target.left,
            right: target.right,
            top: target.top + offset,
            offset,
        });
    }
    placed
}
