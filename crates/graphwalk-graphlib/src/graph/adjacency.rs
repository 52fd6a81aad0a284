//! Derived adjacency views of a [`Graph`](super::Graph).
//!
//! Neither view is cached: both are rebuilt from the edge list on request, so they always
//! reflect the current mode flags.

use super::{Neighbor, Vertex, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vertex id to neighbor list, sorted by target id ascending.
///
/// Every present vertex has an entry, isolated vertices map to an empty list.
pub type Adjacency = BTreeMap<VertexId, Vec<Neighbor>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacencyMatrix {
    /// `matrix[i][j]` is the weight of the edge from `vertex_order[i]` to `vertex_order[j]`
    /// (1 when unweighted) or 0 when there is none.
    pub matrix: Vec<Vec<f64>>,
    pub vertex_order: Vec<Vertex>,
}

impl AdjacencyMatrix {
    pub fn len(&self) -> usize {
        self.vertex_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_order.is_empty()
    }

    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.vertex_order.iter().position(|v| v.id == id)
    }

    pub fn get(&self, u: VertexId, v: VertexId) -> Option<f64> {
        let i = self.index_of(u)?;
        let j = self.index_of(v)?;
        Some(self.matrix[i][j])
    }
}

/// Summary shown next to the graph representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphProperties {
    pub vertices: usize,
    pub edges: usize,
    /// Weakly connected component count.
    pub components: usize,
    /// `|E| == |V| - 1`; a cheap hint, not a proof.
    pub likely_tree: bool,
}
