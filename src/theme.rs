use serde::{Deserialize, Serialize};

const STANDARD_PALETTE: [&str; 10] = [
    "#fbc02d", "#512da8", "#2A9D8F", "#8bc34a", "#166a88", "#E76F51", "#881616", "#264653",
    "#3a86ff", "#e2279b",
];

const CLASSIC_PALETTE: [&str; 8] = [
    "#fbc02d", "#512da8", "#8bc34a", "#166a88", "#67342f", "#19dc19", "#881616", "#e2279b",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub background: String,
    /// Base colors, picked by `z_index % palette.len()`.
    pub palette: Vec<String>,
    /// Two hex digits appended to a palette color for rectangle fills.
    pub fill_alpha: String,
    /// Two hex digits appended to a palette color for rectangle borders.
    pub border_alpha: String,
    pub label_background: String,
    pub legend_text_color: String,
    /// Opacity of rectangles that are not in focus while one is highlighted.
    pub dim_opacity: f32,
    pub curved_marker: String,
}

impl Theme {
    pub fn standard() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            palette: STANDARD_PALETTE.iter().map(|c| c.to_string()).collect(),
            fill_alpha: "aa".to_string(),
            border_alpha: "22".to_string(),
            label_background: "#FFFFFFcc".to_string(),
            legend_text_color: "#1C2430".to_string(),
            dim_opacity: 0.5,
            curved_marker: "(curved)".to_string(),
        }
    }

    /// The earlier eight-color look with solid red borders.
    pub fn classic() -> Self {
        Self {
            font_family: "verdana, arial, sans-serif".to_string(),
            font_size: 13.0,
            palette: CLASSIC_PALETTE.iter().map(|c| c.to_string()).collect(),
            border_alpha: "ff".to_string(),
            ..Self::standard()
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Some(Self::standard()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    pub fn base_color(&self, z_index: usize) -> &str {
        if self.palette.is_empty() {
            return "#888888";
        }
        &self.palette[z_index % self.palette.len()]
    }

    pub fn fill_color(&self, z_index: usize) -> String {
        format!("{}{}", self.base_color(z_index), self.fill_alpha)
    }

    pub fn border_color(&self, z_index: usize) -> String {
        format!("{}{}", self.base_color(z_index), self.border_alpha)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::standard()
    }
}
