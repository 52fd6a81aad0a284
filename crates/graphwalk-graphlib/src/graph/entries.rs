//! Storage entries for [`Graph`](super::Graph).

use super::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
    pub is_wall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
    /// `None` unless the edge was added while the graph was in weighted mode.
    pub weight: Option<f64>,
}

impl Edge {
    /// Weight used by the algorithms: a missing weight counts as 1.
    pub fn cost(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    pub fn connects(&self, u: VertexId, v: VertexId, directed: bool) -> bool {
        (self.source == u && self.target == v)
            || (!directed && self.source == v && self.target == u)
    }

    pub fn touches(&self, v: VertexId) -> bool {
        self.source == v || self.target == v
    }
}

/// One entry of a derived neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub to: VertexId,
    pub weight: Option<f64>,
}

impl Neighbor {
    pub fn cost(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }
}
