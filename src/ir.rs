use serde::{Deserialize, Serialize};

/// One display record of a chain. Nodes are immutable for the duration of a
/// render pass; the renderer only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainNode {
    pub id: String,
    pub timestamp: String,
    #[serde(alias = "transactions")]
    pub transaction_count: u64,
    pub hash: String,
    pub previous_hash: String,
}

impl ChainNode {
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        transaction_count: u64,
        hash: impl Into<String>,
        previous_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            transaction_count,
            hash: hash.into(),
            previous_hash: previous_hash.into(),
        }
    }

    pub fn title(&self) -> String {
        format!("Block {}", self.id)
    }

    pub fn short_hash(&self) -> String {
        truncate_hash(&self.hash)
    }

    pub fn transactions_label(&self) -> String {
        format!("{} txs", self.transaction_count)
    }
}

const HASH_HEAD: usize = 6;
const HASH_TAIL: usize = 4;

/// Shortens a hash to its first 6 and last 4 characters joined by `...`.
/// Hashes shorter than 10 characters are returned unchanged since the head
/// and tail would overlap.
pub fn truncate_hash(hash: &str) -> String {
    let count = hash.chars().count();
    if count < HASH_HEAD + HASH_TAIL {
        return hash.to_string();
    }
    let head: String = hash.chars().take(HASH_HEAD).collect();
    let tail: String = hash.chars().skip(count - HASH_TAIL).collect();
    format!("{head}...{tail}")
}
