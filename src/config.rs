use crate::theme::{Palette, Palettes, RenderTheme};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub box_width: f32,
    pub box_height: f32,
    pub gap: f32,
    pub surface_height: f32,
    pub corner_radius: f32,
    pub box_stroke_width: f32,
    pub edge_stroke_width: f32,
    pub title_offset_y: f32,
    pub hash_offset_y: f32,
    pub count_offset_y: f32,
    pub title_font_size: f32,
    pub detail_font_size: f32,
    pub marker_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 120.0,
            box_height: 80.0,
            gap: 60.0,
            surface_height: 200.0,
            corner_radius: 6.0,
            box_stroke_width: 2.0,
            edge_stroke_width: 2.0,
            title_offset_y: 20.0,
            hash_offset_y: 40.0,
            count_offset_y: 60.0,
            title_font_size: 12.0,
            detail_font_size: 10.0,
            marker_size: 6.0,
        }
    }
}

impl LayoutConfig {
    /// Distance between the left edges of two neighbouring boxes.
    pub fn pitch(&self) -> f32 {
        self.box_width + self.gap
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 200.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub theme: RenderTheme,
    pub palettes: Palettes,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid theme in config: {0}")]
    Theme(String),
    #[error("layout value `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    layout: Option<LayoutConfigFile>,
    palettes: Option<PalettesFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    box_width: Option<f32>,
    box_height: Option<f32>,
    gap: Option<f32>,
    surface_height: Option<f32>,
    corner_radius: Option<f32>,
    box_stroke_width: Option<f32>,
    edge_stroke_width: Option<f32>,
    title_offset_y: Option<f32>,
    hash_offset_y: Option<f32>,
    count_offset_y: Option<f32>,
    title_font_size: Option<f32>,
    detail_font_size: Option<f32>,
    marker_size: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct PalettesFile {
    light: Option<PaletteFile>,
    dark: Option<PaletteFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaletteFile {
    font_family: Option<String>,
    background: Option<String>,
    box_fill: Option<String>,
    box_border: Option<String>,
    title_text: Option<String>,
    detail_text: Option<String>,
    edge_stroke: Option<String>,
    arrow_fill: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = theme_name.parse().map_err(ConfigError::Theme)?;
    }

    if let Some(layout) = parsed.layout {
        apply_layout(&mut config.layout, layout)?;
    }

    if let Some(palettes) = parsed.palettes {
        if let Some(light) = palettes.light {
            apply_palette(&mut config.palettes.light, light);
        }
        if let Some(dark) = palettes.dark {
            apply_palette(&mut config.palettes.dark, dark);
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    Ok(config)
}

fn apply_layout(layout: &mut LayoutConfig, file: LayoutConfigFile) -> Result<(), ConfigError> {
    fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::NonPositive { field, value })
        }
    }

    if let Some(v) = file.box_width {
        layout.box_width = positive("boxWidth", v)?;
    }
    if let Some(v) = file.box_height {
        layout.box_height = positive("boxHeight", v)?;
    }
    if let Some(v) = file.gap {
        layout.gap = positive("gap", v)?;
    }
    if let Some(v) = file.surface_height {
        layout.surface_height = positive("surfaceHeight", v)?;
    }
    if let Some(v) = file.corner_radius {
        layout.corner_radius = v.max(0.0);
    }
    if let Some(v) = file.box_stroke_width {
        layout.box_stroke_width = v.max(0.0);
    }
    if let Some(v) = file.edge_stroke_width {
        layout.edge_stroke_width = v.max(0.0);
    }
    if let Some(v) = file.title_offset_y {
        layout.title_offset_y = v;
    }
    if let Some(v) = file.hash_offset_y {
        layout.hash_offset_y = v;
    }
    if let Some(v) = file.count_offset_y {
        layout.count_offset_y = v;
    }
    if let Some(v) = file.title_font_size {
        layout.title_font_size = positive("titleFontSize", v)?;
    }
    if let Some(v) = file.detail_font_size {
        layout.detail_font_size = positive("detailFontSize", v)?;
    }
    if let Some(v) = file.marker_size {
        layout.marker_size = positive("markerSize", v)?;
    }
    Ok(())
}

fn apply_palette(palette: &mut Palette, file: PaletteFile) {
    if let Some(v) = file.font_family {
        palette.font_family = v;
    }
    if let Some(v) = file.background {
        palette.background = v;
    }
    if let Some(v) = file.box_fill {
        palette.box_fill = v;
    }
    if let Some(v) = file.box_border {
        palette.box_border = v;
    }
    if let Some(v) = file.title_text {
        palette.title_text = v;
    }
    if let Some(v) = file.detail_text {
        palette.detail_text = v;
    }
    if let Some(v) = file.edge_stroke {
        palette.edge_stroke = v;
    }
    if let Some(v) = file.arrow_fill {
        palette.arrow_fill = v;
    }
}
