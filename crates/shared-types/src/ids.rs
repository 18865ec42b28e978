//! Stable identifiers for highlight records
//!
//! Upstream results arrive without ids (or with ids that only make sense as
//! list keys). Ids are derived from the record content and its position so
//! that re-running an analysis on identical input yields identical ids.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Prefix for ids of reference-analysis highlights
pub const ANALYSIS_ID_PREFIX: &str = "ref";

/// Prefix for ids of rewrite change records
pub const CHANGE_ID_PREFIX: &str = "change";

/// Number of hex digits of the digest kept in an id
const DIGEST_CHARS: usize = 12;

/// Derive `{prefix}-{hash}` from concept, snippet and list position
pub fn derive_highlight_id(prefix: &str, concept: &str, snippet: &str, position: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(concept.as_bytes());
    hasher.update([0u8]);
    hasher.update(snippet.as_bytes());
    hasher.update([0u8]);
    hasher.update(position.to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}-{}", prefix, &digest[..DIGEST_CHARS])
}

/// Tracks ids already handed out within one result
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    seen: HashSet<String>,
}

impl IdAllocator {
    /// Keep `current` when it is non-blank and unused, otherwise derive one
    pub(crate) fn resolve(
        &mut self,
        current: &str,
        prefix: &str,
        concept: &str,
        snippet: &str,
        position: usize,
    ) -> String {
        let id = if current.trim().is_empty() || self.seen.contains(current) {
            derive_highlight_id(prefix, concept, snippet, position)
        } else {
            current.to_string()
        };
        self.seen.insert(id.clone());
        id
    }
}
