#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod integrity;
pub mod ir;
pub mod layout;
pub mod layout_dump;
#[cfg(feature = "cli")]
pub mod logging;
pub mod parser;
pub mod render;
pub mod scene;
pub mod surface;
pub mod theme;
pub mod view;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use ir::{ChainNode, truncate_hash};
pub use layout::compute_layout;
pub use parser::parse_chain;
pub use render::{ChainRenderer, RenderOutcome, render_svg};
pub use scene::{Scene, build_scene};
pub use surface::{DrawingSurface, RecordingSurface, SurfaceError, SvgSurface};
pub use theme::{Palette, Palettes, RenderTheme};
pub use view::ChainView;

/// Parses a chain document and renders it to SVG in one call.
pub fn render_document(
    input: &str,
    theme: RenderTheme,
    container_width: f32,
    config: &Config,
) -> anyhow::Result<String> {
    let nodes = parse_chain(input)?;
    render_svg(&nodes, theme, container_width, config)
}
