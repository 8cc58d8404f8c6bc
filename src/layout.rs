use crate::config::LayoutConfig;
use crate::ir::ChainNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    Title,
    Hash,
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub role: LabelRole,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub index: usize,
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub labels: Vec<LabelLayout>,
}

impl NodeLayout {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// A straight link from the right edge of one box to the left edge of the
/// next one. `from_index + 1 == to_index` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLayout {
    pub from_index: usize,
    pub to_index: usize,
    pub from: String,
    pub to: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Left edge of box 0 and the vertical center line of the chain.
    pub origin: (f32, f32),
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
}

/// Width needed to show `count` boxes with a gap of margin on both sides.
pub fn content_width(count: usize, config: &LayoutConfig) -> f32 {
    if count == 0 {
        return 0.0;
    }
    config.gap + count as f32 * config.pitch()
}

pub fn compute_layout(nodes: &[ChainNode], container_width: f32, config: &LayoutConfig) -> Layout {
    let container_width = if container_width.is_finite() {
        container_width.max(0.0)
    } else {
        0.0
    };
    let height = config.surface_height;
    let origin = (config.gap, height / 2.0);
    let box_y = origin.1 - config.box_height / 2.0;
    let center_x = config.box_width / 2.0;

    let node_layouts: Vec<NodeLayout> = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let x = origin.0 + index as f32 * config.pitch();
            let label = |role, text: String, offset: f32, font_size: f32| LabelLayout {
                role,
                text,
                x: x + center_x,
                y: box_y + offset,
                font_size,
            };
            NodeLayout {
                index,
                id: node.id.clone(),
                x,
                y: box_y,
                width: config.box_width,
                height: config.box_height,
                labels: vec![
                    label(
                        LabelRole::Title,
                        node.title(),
                        config.title_offset_y,
                        config.title_font_size,
                    ),
                    label(
                        LabelRole::Hash,
                        node.short_hash(),
                        config.hash_offset_y,
                        config.detail_font_size,
                    ),
                    label(
                        LabelRole::Count,
                        node.transactions_label(),
                        config.count_offset_y,
                        config.detail_font_size,
                    ),
                ],
            }
        })
        .collect();

    let edges = node_layouts
        .windows(2)
        .map(|pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            EdgeLayout {
                from_index: prev.index,
                to_index: next.index,
                from: prev.id.clone(),
                to: next.id.clone(),
                x1: prev.right(),
                y1: prev.center_y(),
                x2: next.x,
                y2: next.center_y(),
            }
        })
        .collect();

    Layout {
        width: container_width.max(content_width(nodes.len(), config)),
        height,
        origin,
        nodes: node_layouts,
        edges,
    }
}
