//! Optional hash-link report for callers that want to check their input.
//!
//! The renderer never consults this: it only connects positional neighbours.

use crate::ir::ChainNode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LinkBreak {
    /// The first node points at something other than the all-zero sentinel.
    MissingGenesis { id: String, previous_hash: String },
    /// A node's `previousHash` does not match its predecessor's `hash`.
    Mismatch {
        index: usize,
        id: String,
        expected: String,
        found: String,
    },
}

/// True for an all-zero hash, tolerating a `0x` prefix and `.` ellipsis
/// characters left by display shortening (`0x0000...0000`).
pub fn is_genesis_sentinel(hash: &str) -> bool {
    let body = hash
        .strip_prefix("0x")
        .or_else(|| hash.strip_prefix("0X"))
        .unwrap_or(hash);
    body.contains('0') && body.chars().all(|c| c == '0' || c == '.')
}

pub fn check_links(nodes: &[ChainNode]) -> Vec<LinkBreak> {
    let mut breaks = Vec::new();
    if let Some(first) = nodes.first() {
        if !is_genesis_sentinel(&first.previous_hash) {
            breaks.push(LinkBreak::MissingGenesis {
                id: first.id.clone(),
                previous_hash: first.previous_hash.clone(),
            });
        }
    }
    for (index, pair) in nodes.windows(2).enumerate() {
        let (prev, node) = (&pair[0], &pair[1]);
        if node.previous_hash != prev.hash {
            breaks.push(LinkBreak::Mismatch {
                index: index + 1,
                id: node.id.clone(),
                expected: prev.hash.clone(),
                found: node.previous_hash.clone(),
            });
        }
    }
    breaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, hash: &str, previous: &str) -> ChainNode {
        ChainNode::new(id, "2025-04-15T10:00:00Z", 1, hash, previous)
    }

    #[test]
    fn recognises_sentinels() {
        assert!(is_genesis_sentinel("0x0000...0000"));
        assert!(is_genesis_sentinel("0000000000"));
        assert!(!is_genesis_sentinel("0x"));
        assert!(!is_genesis_sentinel("0x7Fc9...3a24"));
        assert!(!is_genesis_sentinel("..."));
    }

    #[test]
    fn intact_chain_has_no_breaks() {
        let nodes = vec![
            node("1", "0xaaaa", "0x0000...0000"),
            node("2", "0xbbbb", "0xaaaa"),
            node("3", "0xcccc", "0xbbbb"),
        ];
        assert!(check_links(&nodes).is_empty());
        assert!(check_links(&[]).is_empty());
    }

    #[test]
    fn reports_each_break() {
        let nodes = vec![
            node("1", "0xaaaa", "0xffff"),
            node("2", "0xbbbb", "0xaaaa"),
            node("3", "0xcccc", "0xdead"),
        ];
        let breaks = check_links(&nodes);
        assert_eq!(breaks.len(), 2);
        assert!(matches!(&breaks[0], LinkBreak::MissingGenesis { id, .. } if id == "1"));
        assert_eq!(
            breaks[1],
            LinkBreak::Mismatch {
                index: 2,
                id: "3".to_string(),
                expected: "0xbbbb".to_string(),
                found: "0xdead".to_string(),
            }
        );
    }
}
