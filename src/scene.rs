//! Themed drawing primitives for one render pass.
//!
//! A [`Scene`] is rebuilt from scratch for every pass and painted onto a
//! [`DrawingSurface`] after clearing it. Nothing is carried over between passes.

use crate::config::LayoutConfig;
use crate::ir::ChainNode;
use crate::layout::{LabelRole, Layout, compute_layout};
use crate::surface::{DrawingSurface, SurfaceError};
use crate::theme::{Palette, Palettes, RenderTheme};

pub const ARROW_MARKER_ID: &str = "arrow";

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowMarker {
    pub id: String,
    pub size: f32,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_family: String,
    pub font_size: f32,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: String,
    pub stroke_width: f32,
    pub marker_end: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(RectPrimitive),
    Text(TextPrimitive),
    Line(LinePrimitive),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub frame: Frame,
    pub marker: ArrowMarker,
    /// Paint order: every edge first, then each box followed by its labels.
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn from_layout(layout: &Layout, palette: &Palette, config: &LayoutConfig) -> Self {
        let mut primitives = Vec::with_capacity(layout.edges.len() + layout.nodes.len() * 4);

        for edge in &layout.edges {
            primitives.push(Primitive::Line(LinePrimitive {
                x1: edge.x1,
                y1: edge.y1,
                x2: edge.x2,
                y2: edge.y2,
                stroke: palette.edge_stroke.clone(),
                stroke_width: config.edge_stroke_width,
                marker_end: Some(ARROW_MARKER_ID.to_string()),
            }));
        }

        for node in &layout.nodes {
            primitives.push(Primitive::Rect(RectPrimitive {
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                corner_radius: config.corner_radius,
                fill: palette.box_fill.clone(),
                stroke: palette.box_border.clone(),
                stroke_width: config.box_stroke_width,
            }));
            for label in &node.labels {
                let fill = match label.role {
                    LabelRole::Title => &palette.title_text,
                    LabelRole::Hash | LabelRole::Count => &palette.detail_text,
                };
                primitives.push(Primitive::Text(TextPrimitive {
                    x: label.x,
                    y: label.y,
                    text: label.text.clone(),
                    font_family: palette.font_family.clone(),
                    font_size: label.font_size,
                    fill: fill.clone(),
                }));
            }
        }

        Self {
            frame: Frame {
                width: layout.width,
                height: layout.height,
                background: palette.background.clone(),
            },
            marker: ArrowMarker {
                id: ARROW_MARKER_ID.to_string(),
                size: config.marker_size,
                fill: palette.arrow_fill.clone(),
            },
            primitives,
        }
    }

    pub fn boxes(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    /// Every color in paint order, starting with the frame and the marker.
    pub fn colors(&self) -> Vec<&str> {
        let mut colors = vec![self.frame.background.as_str(), self.marker.fill.as_str()];
        for primitive in &self.primitives {
            match primitive {
                Primitive::Rect(rect) => {
                    colors.push(&rect.fill);
                    colors.push(&rect.stroke);
                }
                Primitive::Text(text) => colors.push(&text.fill),
                Primitive::Line(line) => colors.push(&line.stroke),
            }
        }
        colors
    }

    /// Clears the surface and draws the whole scene onto it.
    pub fn paint<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.clear()?;
        surface.set_frame(&self.frame)?;
        surface.define_marker(&self.marker)?;
        for primitive in &self.primitives {
            match primitive {
                Primitive::Rect(rect) => surface.draw_rect(rect)?,
                Primitive::Text(text) => surface.draw_text(text)?,
                Primitive::Line(line) => surface.draw_line(line)?,
            }
        }
        Ok(())
    }
}

pub fn build_scene(
    nodes: &[ChainNode],
    theme: RenderTheme,
    container_width: f32,
    palettes: &Palettes,
    config: &LayoutConfig,
) -> Scene {
    let layout = compute_layout(nodes, container_width, config);
    Scene::from_layout(&layout, palettes.for_theme(theme), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn sample() -> Vec<ChainNode> {
        vec![
            ChainNode::new("1", "2025-04-15T10:00:00Z", 5, "0x7Fc9...3a24", "0x0000...0000"),
            ChainNode::new("2", "2025-04-15T10:05:00Z", 3, "0x3aB8...9c12", "0x7Fc9...3a24"),
            ChainNode::new("3", "2025-04-15T10:10:00Z", 7, "0x8dF1...6b45", "0x3aB8...9c12"),
        ]
    }

    fn scene(theme: RenderTheme) -> Scene {
        build_scene(&sample(), theme, 800.0, &Palettes::default(), &LayoutConfig::default())
    }

    #[test]
    fn counts_boxes_edges_and_labels() {
        let scene = scene(RenderTheme::Light);
        assert_eq!(scene.boxes().count(), 3);
        assert_eq!(scene.edges().count(), 2);
        assert_eq!(scene.labels().count(), 9);
        assert!(scene.edges().all(|e| e.marker_end.as_deref() == Some(ARROW_MARKER_ID)));
    }

    #[test]
    fn dark_theme_only_changes_colors() {
        let light = scene(RenderTheme::Light);
        let dark = scene(RenderTheme::Dark);
        assert_ne!(light.colors(), dark.colors());
        let light_boxes: Vec<(f32, f32)> = light.boxes().map(|b| (b.x, b.y)).collect();
        let dark_boxes: Vec<(f32, f32)> = dark.boxes().map(|b| (b.x, b.y)).collect();
        assert_eq!(light_boxes, dark_boxes);
        assert_eq!(dark.marker.fill, "#4B5563");
        assert!(dark.boxes().all(|b| b.fill == "#1F2937" && b.stroke == "#374151"));
    }

    #[test]
    fn theme_round_trip_restores_colors() {
        let first = scene(RenderTheme::Light);
        let _ = scene(RenderTheme::Dark);
        let again = scene(RenderTheme::Light);
        assert_eq!(first, again);
    }

    #[test]
    fn repaint_replaces_previous_content() {
        let mut surface = RecordingSurface::default();
        scene(RenderTheme::Light).paint(&mut surface).unwrap();
        scene(RenderTheme::Light).paint(&mut surface).unwrap();
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.rects.len(), 3);
        assert_eq!(surface.lines.len(), 2);
        assert_eq!(surface.texts.len(), 9);
        assert_eq!(surface.markers.len(), 1);
    }
}
