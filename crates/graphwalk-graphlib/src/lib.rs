#![forbid(unsafe_code)]

//! Graph container APIs used by `graphwalk`.
//!
//! The graph is a flat, insertion-ordered store of vertices and edges with monotonic ids.
//! Adjacency is never stored: [`Graph::adjacency`] derives it from the edge list on every
//! call, with neighbor lists sorted by target id so traversals are reproducible.

mod graph;

pub use graph::alg;
pub use graph::{
    Adjacency, AdjacencyMatrix, Edge, EdgeId, Graph, GraphOptions, GraphProperties, Neighbor,
    Vertex, VertexId,
};
