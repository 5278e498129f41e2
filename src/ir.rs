use serde::{Deserialize, Serialize};

/// Which pair of dimensions a comparison is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKey {
    /// Physical panel size in millimeters.
    Display,
    /// Native pixel resolution.
    Resolution,
}

impl SizeKey {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "display" | "physical" | "mm" => Some(Self::Display),
            "resolution" | "pixels" | "px" => Some(Self::Resolution),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Resolution => "resolution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelResolution {
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub freq: f32,
}

/// One record of input data, as written in a monitor list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSpec {
    pub label: String,
    #[serde(default)]
    pub model: String,
    pub display: PhysicalSize,
    pub resolution: PixelResolution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curved: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    pub id: String,
    pub label: String,
    pub model: String,
    pub display: PhysicalSize,
    pub resolution: PixelResolution,
    pub enabled: bool,
    pub curved: bool,
    /// Position in the width-sorted order; drives stacking and color.
    pub z_index: usize,
    /// 1-based position in id order.
    pub display_index: usize,
}

impl Monitor {
    pub fn from_spec(spec: MonitorSpec, default_enabled: bool) -> Self {
        Self {
            id: crate::parser::generate_id(&spec.label),
            label: spec.label,
            model: spec.model,
            display: spec.display,
            resolution: spec.resolution,
            enabled: spec.checked.unwrap_or(default_enabled),
            curved: spec.curved.unwrap_or(false),
            z_index: 0,
            display_index: 0,
        }
    }

    pub fn width(&self, key: SizeKey) -> f32 {
        match key {
            SizeKey::Display => self.display.w,
            SizeKey::Resolution => self.resolution.w,
        }
    }

    pub fn height(&self, key: SizeKey) -> f32 {
        match key {
            SizeKey::Display => self.display.h,
            SizeKey::Resolution => self.resolution.h,
        }
    }

    /// Human readable size, e.g. `880x367mm` or `3840x1600px @60Hz`.
    pub fn specs(&self, key: SizeKey) -> String {
        match key {
            SizeKey::Display => format!("{}x{}mm", self.display.w, self.display.h),
            SizeKey::Resolution => format!(
                "{}x{}px @{}Hz",
                self.resolution.w, self.resolution.h, self.resolution.freq
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(label: &str) -> MonitorSpec {
        MonitorSpec {
            label: label.to_string(),
            model: "65301459".to_string(),
            display: PhysicalSize { w: 794.0, h: 340.0 },
            resolution: PixelResolution {
                w: 5120.0,
                h: 2160.0,
                freq: 60.0,
            },
            checked: None,
            curved: None,
        }
    }

    #[test]
    fn optional_flags_fall_back_to_defaults() {
        let monitor = Monitor::from_spec(spec("LG 34WK95U (5K2K)"), false);
        assert_eq!(monitor.id, "lg_34wk95u_5k2k_");
        assert!(!monitor.enabled);
        assert!(!monitor.curved);

        let monitor = Monitor::from_spec(spec("LG 34WK95U"), true);
        assert!(monitor.enabled);
    }

    #[test]
    fn explicit_checked_wins_over_default() {
        let mut raw = spec("Dell U3818DW");
        raw.checked = Some(false);
        assert!(!Monitor::from_spec(raw, true).enabled);
    }

    #[test]
    fn formats_specs_per_key() {
        let monitor = Monitor::from_spec(spec("LG"), false);
        assert_eq!(monitor.specs(SizeKey::Display), "794x340mm");
        assert_eq!(monitor.specs(SizeKey::Resolution), "5120x2160px @60Hz");
        assert_eq!(monitor.width(SizeKey::Resolution), 5120.0);
        assert_eq!(monitor.height(SizeKey::Display), 340.0);
    }

    #[test]
    fn size_key_tokens() {
        assert_eq!(SizeKey::from_token("Display"), Some(SizeKey::Display));
        assert_eq!(SizeKey::from_token("px"), Some(SizeKey::Resolution));
        assert_eq!(SizeKey::from_token("depth"), None);
    }
}
