use std::collections::BTreeMap;

use crate::ir::{Monitor, SizeKey};

/// Sorts monitors widest first and stamps their stacking and legend order.
///
/// The sort is stable, so monitors of equal width keep their relative
/// order. `z_index` is the sorted position; `display_index` is the 1-based
/// position in id order. The returned map is keyed by id and iterates in
/// legend order; on an id collision the entry sorted last wins.
pub fn assign_order(monitors: &mut [Monitor], key: SizeKey) -> BTreeMap<String, usize> {
    monitors.sort_by(|a, b| b.width(key).total_cmp(&a.width(key)));
    stamp_order(monitors)
}

/// Stamps `z_index` and `display_index` from the current slice order
/// without sorting.
pub fn stamp_order(monitors: &mut [Monitor]) -> BTreeMap<String, usize> {
    let mut lookup = BTreeMap::new();
    for (position, monitor) in monitors.iter_mut().enumerate() {
        monitor.z_index = position;
        lookup.insert(monitor.id.clone(), position);
    }
    for (idx, position) in lookup.values().enumerate() {
        monitors[*position].display_index = idx + 1;
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{MonitorSpec, PhysicalSize, PixelResolution};

    fn monitor(label: &str, mm: f32, px: f32) -> Monitor {
        Monitor::from_spec(
            MonitorSpec {
                label: label.to_string(),
                model: String::new(),
                display: PhysicalSize { w: mm, h: mm / 2.0 },
                resolution: PixelResolution {
                    w: px,
                    h: px / 2.0,
                    freq: 60.0,
                },
                checked: None,
                curved: None,
            },
            true,
        )
    }

    fn ids(monitors: &[Monitor]) -> Vec<&str> {
        monitors.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn sorts_widest_first_and_stamps_z_index() {
        let mut monitors = vec![
            monitor("small", 500.0, 1920.0),
            monitor("large", 900.0, 3840.0),
            monitor("mid", 700.0, 5120.0),
        ];
        assign_order(&mut monitors, SizeKey::Display);
        assert_eq!(ids(&monitors), ["large", "mid", "small"]);
        let z: Vec<usize> = monitors.iter().map(|m| m.z_index).collect();
        assert_eq!(z, [0, 1, 2]);

        assign_order(&mut monitors, SizeKey::Resolution);
        assert_eq!(ids(&monitors), ["mid", "large", "small"]);
    }

    #[test]
    fn equal_widths_keep_input_order() {
        let mut monitors = vec![
            monitor("zeta", 800.0, 3840.0),
            monitor("alpha", 800.0, 3840.0),
            monitor("wide", 950.0, 5120.0),
            monitor("beta", 800.0, 3840.0),
        ];
        assign_order(&mut monitors, SizeKey::Display);
        assert_eq!(ids(&monitors), ["wide", "zeta", "alpha", "beta"]);
    }

    #[test]
    fn stamping_keeps_the_slice_order() {
        let mut monitors = vec![monitor("small", 500.0, 3840.0), monitor("large", 900.0, 3840.0)];
        let lookup = stamp_order(&mut monitors);
        assert_eq!(ids(&monitors), ["small", "large"]);
        assert_eq!(lookup["small"], 0);
        assert_eq!(monitors[1].z_index, 1);
        assert_eq!(monitors[1].display_index, 1);
    }

    #[test]
    fn display_index_follows_id_order() {
        let mut monitors = vec![
            monitor("charlie", 500.0, 1.0),
            monitor("alpha", 700.0, 1.0),
            monitor("bravo", 900.0, 1.0),
        ];
        let lookup = assign_order(&mut monitors, SizeKey::Display);
        let legend: Vec<&str> = lookup.keys().map(String::as_str).collect();
        assert_eq!(legend, ["alpha", "bravo", "charlie"]);
        for (id, position) in &lookup {
            let expected = match id.as_str() {
                "alpha" => 1,
                "bravo" => 2,
                _ => 3,
            };
            assert_eq!(monitors[*position].display_index, expected);
        }
    }
}
