use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTheme {
    #[default]
    Light,
    Dark,
}

impl RenderTheme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for RenderTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// Every color the chain diagram uses. Geometry never reads from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub font_family: String,
    pub background: String,
    pub box_fill: String,
    pub box_border: String,
    pub title_text: String,
    pub detail_text: String,
    pub edge_stroke: String,
    pub arrow_fill: String,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            box_fill: "#F3F4F6".to_string(),
            box_border: "#E5E7EB".to_string(),
            title_text: "#374151".to_string(),
            detail_text: "#6B7280".to_string(),
            edge_stroke: "#9CA3AF".to_string(),
            arrow_fill: "#9CA3AF".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#111827".to_string(),
            box_fill: "#1F2937".to_string(),
            box_border: "#374151".to_string(),
            title_text: "#D1D5DB".to_string(),
            detail_text: "#9CA3AF".to_string(),
            edge_stroke: "#4B5563".to_string(),
            arrow_fill: "#4B5563".to_string(),
        }
    }
}

/// The two palettes a render can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palettes {
    pub light: Palette,
    pub dark: Palette,
}

impl Palettes {
    pub fn for_theme(&self, theme: RenderTheme) -> &Palette {
        match theme {
            RenderTheme::Light => &self.light,
            RenderTheme::Dark => &self.dark,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self {
            light: Palette::light(),
            dark: Palette::dark(),
        }
    }
}
