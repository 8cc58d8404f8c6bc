use crate::config::{Config, LayoutConfig, RenderConfig};
use crate::ir::ChainNode;
use crate::scene::build_scene;
use crate::surface::{DrawingSurface, SurfaceError, SvgSurface};
use crate::theme::{Palettes, RenderTheme};
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// No surface was attached; the next trigger retries.
    Skipped,
    Rendered { boxes: usize, edges: usize },
    /// A draw call failed. Only this pass is lost.
    Failed(SurfaceError),
}

/// Draws a chain of nodes into an optional surface. Each call to
/// [`ChainRenderer::render`] rebuilds the scene from its inputs and repaints
/// the surface from a cleared state.
#[derive(Debug)]
pub struct ChainRenderer<S> {
    surface: Option<S>,
    palettes: Palettes,
    layout: LayoutConfig,
}

impl<S: DrawingSurface> ChainRenderer<S> {
    pub fn new(palettes: Palettes, layout: LayoutConfig) -> Self {
        Self {
            surface: None,
            palettes,
            layout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.palettes.clone(), config.layout.clone())
    }

    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn detach(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn render(
        &mut self,
        nodes: &[ChainNode],
        theme: RenderTheme,
        container_width: f32,
    ) -> RenderOutcome {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!(nodes = nodes.len(), "drawing surface not attached, skipping render");
            return RenderOutcome::Skipped;
        };
        let scene = build_scene(nodes, theme, container_width, &self.palettes, &self.layout);
        match scene.paint(surface) {
            Ok(()) => {
                let boxes = scene.boxes().count();
                let edges = scene.edges().count();
                tracing::debug!(boxes, edges, %theme, width = scene.frame.width, "rendered chain");
                RenderOutcome::Rendered { boxes, edges }
            }
            Err(err) => {
                tracing::warn!(error = %err, "chain render pass failed");
                // A failed pass leaves a blank surface, never a partial scene.
                if let Err(clear_err) = surface.clear() {
                    tracing::warn!(error = %clear_err, "could not clear surface after failed pass");
                }
                RenderOutcome::Failed(err)
            }
        }
    }
}

impl<S: DrawingSurface> Default for ChainRenderer<S> {
    fn default() -> Self {
        Self::new(Palettes::default(), LayoutConfig::default())
    }
}

pub fn render_svg(
    nodes: &[ChainNode],
    theme: RenderTheme,
    container_width: f32,
    config: &Config,
) -> Result<String> {
    let mut renderer = ChainRenderer::from_config(config);
    renderer.attach(SvgSurface::new());
    match renderer.render(nodes, theme, container_width) {
        RenderOutcome::Failed(err) => Err(err.into()),
        _ => Ok(renderer
            .surface()
            .map(SvgSurface::finish)
            .unwrap_or_default()),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(800.0, 200.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid default PNG size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn sample() -> Vec<ChainNode> {
        vec![
            ChainNode::new("1", "2025-04-15T10:00:00Z", 5, "0x7Fc9...3a24", "0x0000...0000"),
            ChainNode::new("2", "2025-04-15T10:05:00Z", 3, "0x3aB8...9c12", "0x7Fc9...3a24"),
        ]
    }

    #[test]
    fn unattached_renderer_skips() {
        let mut renderer: ChainRenderer<RecordingSurface> = ChainRenderer::default();
        assert_eq!(
            renderer.render(&sample(), RenderTheme::Light, 800.0),
            RenderOutcome::Skipped
        );
        renderer.attach(RecordingSurface::default());
        assert_eq!(
            renderer.render(&sample(), RenderTheme::Light, 800.0),
            RenderOutcome::Rendered { boxes: 2, edges: 1 }
        );
    }

    #[test]
    fn failed_draw_is_contained() {
        let mut renderer = ChainRenderer::default();
        renderer.attach(RecordingSurface::failing_after(2));
        let outcome = renderer.render(&sample(), RenderTheme::Dark, 800.0);
        assert!(matches!(outcome, RenderOutcome::Failed(SurfaceError::Rejected { .. })));
        assert!(renderer.is_attached());
    }

    #[test]
    fn failed_pass_leaves_surface_blank() {
        let mut nodes = sample();
        nodes.push(ChainNode::new(
            "3",
            "2025-04-15T10:10:00Z",
            7,
            "0x8dF1...6b45",
            "0x3aB8...9c12",
        ));
        let mut renderer = ChainRenderer::default();
        // marker plus two edges fit, the first box does not
        renderer.attach(RecordingSurface::failing_after(3));
        let outcome = renderer.render(&nodes, RenderTheme::Light, 800.0);
        assert!(matches!(
            outcome,
            RenderOutcome::Failed(SurfaceError::Rejected { primitive: "rect", .. })
        ));
        let surface = renderer.surface().unwrap();
        assert!(surface.rects.is_empty());
        assert!(surface.lines.is_empty());
        assert!(surface.texts.is_empty());
        assert!(surface.markers.is_empty());
        assert!(surface.frame.is_none());
    }

    #[test]
    fn empty_chain_renders_blank_surface() {
        let mut renderer = ChainRenderer::default();
        renderer.attach(RecordingSurface::default());
        let outcome = renderer.render(&[], RenderTheme::Light, 400.0);
        assert_eq!(outcome, RenderOutcome::Rendered { boxes: 0, edges: 0 });
        let surface = renderer.detach().unwrap();
        assert!(surface.rects.is_empty());
        assert!(surface.lines.is_empty());
        assert_eq!(surface.frame.map(|f| f.width), Some(400.0));
    }

    #[test]
    fn render_svg_basic() {
        let svg = render_svg(&sample(), RenderTheme::Light, 800.0, &Config::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Block 1"));
        assert!(svg.contains("0x7Fc9...3a24"));
        assert!(svg.contains("3 txs"));
        assert!(svg.contains("marker-end=\"url(#arrow)\""));
        assert_eq!(svg.matches("<line").count(), 1);
    }
}
