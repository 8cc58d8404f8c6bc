use crate::ir::ChainNode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("chain document is empty")]
    Empty,
    #[error("invalid chain document: {0}")]
    Syntax(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChainDocument {
    List(Vec<ChainNode>),
    Wrapped { nodes: Vec<ChainNode> },
}

impl ChainDocument {
    fn into_nodes(self) -> Vec<ChainNode> {
        match self {
            Self::List(nodes) | Self::Wrapped { nodes } => nodes,
        }
    }
}

/// Parses a chain from a JSON array of nodes or a `{ "nodes": [...] }`
/// object. Strict JSON is tried first, then JSON5.
pub fn parse_chain(input: &str) -> Result<Vec<ChainNode>, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    match serde_json::from_str::<ChainDocument>(trimmed) {
        Ok(doc) => Ok(doc.into_nodes()),
        Err(json_err) => json5::from_str::<ChainDocument>(trimmed)
            .map(ChainDocument::into_nodes)
            .map_err(|json5_err| {
                tracing::debug!(error = %json_err, "strict JSON parse failed, JSON5 also failed");
                ParseError::Syntax(json5_err.to_string())
            }),
    }
}

/// Collects the bodies of fenced `chain` blocks in a Markdown document.
pub fn extract_chain_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut in_block = false;
    let mut current = Vec::new();
    let mut fence = String::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if !in_block {
            if let Some(start_fence) = detect_chain_fence(trimmed) {
                in_block = true;
                fence = start_fence;
            }
            continue;
        }
        if is_fence_end(trimmed, &fence) {
            in_block = false;
            blocks.push(current.join("\n"));
            current.clear();
            continue;
        }
        current.push(line.to_string());
    }

    blocks
}

fn detect_chain_fence(line: &str) -> Option<String> {
    let marker = line.chars().next().filter(|c| matches!(c, '`' | '~' | ':'))?;
    let run = line.chars().take_while(|&c| c == marker).count();
    if run < 3 {
        return None;
    }
    let (fence, rest) = line.split_at(run);
    rest.trim().starts_with("chain").then(|| fence.to_string())
}

/// A closing fence repeats the opening character at least as many times.
fn is_fence_end(line: &str, fence: &str) -> bool {
    let Some(marker) = fence.chars().next() else {
        return false;
    };
    line.len() >= fence.len() && line.chars().all(|c| c == marker)
}
