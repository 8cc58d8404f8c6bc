use crate::ir::ChainNode;
use crate::render::{ChainRenderer, RenderOutcome};
use crate::surface::DrawingSurface;
use crate::theme::RenderTheme;

/// Host-side adapter: holds the latest inputs and re-renders whenever one of
/// them changes or a surface is mounted.
#[derive(Debug)]
pub struct ChainView<S> {
    renderer: ChainRenderer<S>,
    nodes: Vec<ChainNode>,
    theme: RenderTheme,
    container_width: f32,
}

impl<S: DrawingSurface> ChainView<S> {
    pub fn new(renderer: ChainRenderer<S>, theme: RenderTheme, container_width: f32) -> Self {
        Self {
            renderer,
            nodes: Vec::new(),
            theme,
            container_width,
        }
    }

    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    pub fn theme(&self) -> RenderTheme {
        self.theme
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn surface(&self) -> Option<&S> {
        self.renderer.surface()
    }

    pub fn mount(&mut self, surface: S) -> RenderOutcome {
        self.renderer.attach(surface);
        self.refresh()
    }

    pub fn unmount(&mut self) -> Option<S> {
        self.renderer.detach()
    }

    pub fn set_nodes(&mut self, nodes: Vec<ChainNode>) -> RenderOutcome {
        self.nodes = nodes;
        self.refresh()
    }

    pub fn set_theme(&mut self, theme: RenderTheme) -> RenderOutcome {
        self.theme = theme;
        self.refresh()
    }

    pub fn set_container_width(&mut self, width: f32) -> RenderOutcome {
        self.container_width = width;
        self.refresh()
    }

    pub fn refresh(&mut self) -> RenderOutcome {
        self.renderer.render(&self.nodes, self.theme, self.container_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn nodes(len: usize) -> Vec<ChainNode> {
        (0..len)
            .map(|i| {
                ChainNode::new(
                    i.to_string(),
                    "2025-04-15T10:00:00Z",
                    1,
                    format!("hash-{i:010}"),
                    "0000000000",
                )
            })
            .collect()
    }

    #[test]
    fn triggers_before_mount_are_skipped_then_retried() {
        let mut view: ChainView<RecordingSurface> =
            ChainView::new(ChainRenderer::default(), RenderTheme::Light, 600.0);
        assert_eq!(view.set_nodes(nodes(3)), RenderOutcome::Skipped);
        assert_eq!(view.set_theme(RenderTheme::Dark), RenderOutcome::Skipped);
        assert_eq!(
            view.mount(RecordingSurface::default()),
            RenderOutcome::Rendered { boxes: 3, edges: 2 }
        );
        let surface = view.surface().unwrap();
        assert_eq!(surface.clears, 1);
        assert!(surface.rects.iter().all(|r| r.fill == "#1F2937"));
    }

    #[test]
    fn every_change_repaints_from_scratch() {
        let mut view = ChainView::new(ChainRenderer::default(), RenderTheme::Light, 600.0);
        view.mount(RecordingSurface::default());
        view.set_nodes(nodes(4));
        view.set_container_width(1200.0);
        view.set_nodes(nodes(2));
        let surface = view.surface().unwrap();
        assert_eq!(surface.clears, 4);
        assert_eq!(surface.rects.len(), 2);
        assert_eq!(surface.lines.len(), 1);
        assert_eq!(surface.frame.as_ref().map(|f| f.width), Some(1200.0));
    }

    #[test]
    fn next_trigger_recovers_from_failed_pass() {
        let mut view = ChainView::new(ChainRenderer::default(), RenderTheme::Light, 600.0);
        assert_eq!(
            view.mount(RecordingSurface::failing_once_after(2)),
            RenderOutcome::Rendered { boxes: 0, edges: 0 }
        );
        assert!(matches!(view.set_nodes(nodes(3)), RenderOutcome::Failed(_)));
        let blank = view.surface().unwrap();
        assert!(blank.lines.is_empty() && blank.markers.is_empty());

        assert_eq!(
            view.set_theme(RenderTheme::Dark),
            RenderOutcome::Rendered { boxes: 3, edges: 2 }
        );
        let surface = view.surface().unwrap();
        assert_eq!(surface.rects.len(), 3);
        assert_eq!(surface.texts.len(), 9);
        assert_eq!(surface.lines.len(), 2);
        assert_eq!(surface.markers.len(), 1);
        assert!(surface.rects.iter().all(|r| r.fill == "#1F2937"));
    }

    #[test]
    fn unmount_returns_surface_and_stops_drawing() {
        let mut view = ChainView::new(ChainRenderer::default(), RenderTheme::Light, 600.0);
        view.mount(RecordingSurface::default());
        let surface = view.unmount().unwrap();
        assert_eq!(surface.clears, 1);
        assert_eq!(view.set_theme(RenderTheme::Dark), RenderOutcome::Skipped);
    }
}
