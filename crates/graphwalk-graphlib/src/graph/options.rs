//! Graph mode flags.

use serde::{Deserialize, Serialize};

/// Mode flags shared by every edge of a [`Graph`](super::Graph).
///
/// The flags are not stored per edge: toggling them changes how existing edges are read
/// (adjacency derivation, duplicate detection, default weights) without rewriting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    pub directed: bool,
    pub weighted: bool,
    /// Vertex positions are grid cell indices (column, row) instead of canvas coordinates.
    pub grid: bool,
}
