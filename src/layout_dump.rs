use crate::integrity::{LinkBreak, check_links};
use crate::ir::ChainNode;
use crate::layout::{LabelRole, Layout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub link_breaks: Vec<LinkBreak>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub index: usize,
    pub id: String,
    pub timestamp: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub hash_label: String,
    pub count_label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub points: [[f32; 2]; 2],
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, nodes: &[ChainNode]) -> Self {
        let node_dumps = layout
            .nodes
            .iter()
            .map(|node| {
                let label = |role: LabelRole| {
                    node.labels
                        .iter()
                        .find(|label| label.role == role)
                        .map(|label| label.text.clone())
                        .unwrap_or_default()
                };
                NodeDump {
                    index: node.index,
                    id: node.id.clone(),
                    timestamp: nodes
                        .get(node.index)
                        .map(|source| source.timestamp.clone())
                        .unwrap_or_default(),
                    x: node.x,
                    y: node.y,
                    width: node.width,
                    height: node.height,
                    title: label(LabelRole::Title),
                    hash_label: label(LabelRole::Hash),
                    count_label: label(LabelRole::Count),
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                points: [[edge.x1, edge.y1], [edge.x2, edge.y2]],
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            origin: [layout.origin.0, layout.origin.1],
            nodes: node_dumps,
            edges,
            link_breaks: check_links(nodes),
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, nodes: &[ChainNode]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, nodes);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;

    #[test]
    fn dump_serializes_boxes_edges_and_breaks() {
        let nodes = vec![
            ChainNode::new("1", "2025-04-15T10:00:00Z", 5, "0x7Fc9...3a24", "0x0000...0000"),
            ChainNode::new("2", "2025-04-15T10:05:00Z", 3, "0x3aB8...9c12", "0xffff...ffff"),
        ];
        let layout = compute_layout(&nodes, 800.0, &LayoutConfig::default());
        let dump = LayoutDump::from_layout(&layout, &nodes);
        let value = serde_json::to_value(&dump).unwrap();
        assert_eq!(value["nodes"][1]["timestamp"], "2025-04-15T10:05:00Z");
        assert_eq!(value["nodes"][0]["hashLabel"], "0x7Fc9...3a24");
        assert_eq!(value["edges"][0]["points"][0][0], 180.0);
        assert_eq!(value["linkBreaks"][0]["kind"], "mismatch");
        assert_eq!(value["linkBreaks"][0]["found"], "0xffff...ffff");
    }
}
