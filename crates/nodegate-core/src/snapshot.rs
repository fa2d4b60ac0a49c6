//! Immutable allow-list snapshot.
//!
//! A snapshot is built once from a complete fetch and never mutated after.
//! Replacing the admitted set means building a new snapshot.

use std::collections::HashSet;

use crate::key::NodeIdentity;

/// Point-in-time set of admitted nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    nodes: HashSet<NodeIdentity>,
}

impl Snapshot {
    /// Snapshot that admits nobody.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &NodeIdentity) -> bool {
        self.nodes.contains(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<NodeIdentity> for Snapshot {
    fn from_iter<I: IntoIterator<Item = NodeIdentity>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<NodeIdentity>> for Snapshot {
    fn from(nodes: Vec<NodeIdentity>) -> Self {
        nodes.into_iter().collect()
    }
}
