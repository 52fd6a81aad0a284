//! The mutable [`Graph`] container.
//!
//! Vertices and edges live in insertion-ordered vectors. A side index maps vertex ids to
//! their slot, and a pair set answers duplicate-edge queries without scanning.

use rustc_hash::FxBuildHasher;
use std::collections::BTreeMap;

mod adjacency;
mod entries;
mod ids;
mod options;

pub mod alg;

pub use adjacency::{Adjacency, AdjacencyMatrix, GraphProperties};
pub use entries::{Edge, Neighbor, Vertex};
pub use ids::{EdgeId, VertexId};
pub use options::GraphOptions;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    options: GraphOptions,

    vertices: Vec<Vertex>,
    vertex_index: HashMap<VertexId, usize>,

    edges: Vec<Edge>,
    // Ordered (source, target) pairs as inserted; undirected lookups check both orders.
    edge_pairs: HashSet<(VertexId, VertexId)>,

    next_vertex_id: u32,
    next_edge_id: u32,
}

impl Graph {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.options.weighted
    }

    pub fn is_grid(&self) -> bool {
        self.options.grid
    }

    pub fn set_directed(&mut self, directed: bool) -> &mut Self {
        self.options.directed = directed;
        self
    }

    pub fn set_weighted(&mut self, weighted: bool) -> &mut Self {
        self.options.weighted = weighted;
        self
    }

    pub fn set_grid(&mut self, grid: bool) -> &mut Self {
        self.options.grid = grid;
        self
    }

    pub fn set_options(&mut self, options: GraphOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn add_vertex(&mut self, x: f64, y: f64) -> Vertex {
        let vertex = Vertex {
            id: VertexId(self.next_vertex_id),
            x,
            y,
            is_wall: false,
        };
        self.next_vertex_id += 1;
        self.vertex_index.insert(vertex.id, self.vertices.len());
        self.vertices.push(vertex);
        vertex
    }

    /// Adds an edge with the default weight of 1.
    ///
    /// Returns `None` for self loops, missing endpoints and duplicates. In undirected mode
    /// `{u, v}` and `{v, u}` are the same edge.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> Option<Edge> {
        self.add_edge_weighted(source, target, 1.0)
    }

    /// Adds an edge; `weight` is only recorded when the graph is in weighted mode.
    pub fn add_edge_weighted(
        &mut self,
        source: VertexId,
        target: VertexId,
        weight: f64,
    ) -> Option<Edge> {
        if source == target {
            tracing::trace!(%source, "rejected self loop");
            return None;
        }
        if !self.has_vertex(source) || !self.has_vertex(target) {
            tracing::trace!(%source, %target, "rejected edge with a missing endpoint");
            return None;
        }
        if self.has_edge_between(source, target) {
            tracing::trace!(%source, %target, "rejected duplicate edge");
            return None;
        }

        let edge = Edge {
            id: EdgeId(self.next_edge_id),
            source,
            target,
            weight: self.options.weighted.then_some(weight),
        };
        self.next_edge_id += 1;
        self.edge_pairs.insert((source, target));
        self.edges.push(edge);
        Some(edge)
    }

    /// Adds an edge between each consecutive pair of `path`.
    pub fn set_path(&mut self, path: &[VertexId]) -> &mut Self {
        for pair in path.windows(2) {
            let _ = self.add_edge(pair[0], pair[1]);
        }
        self
    }

    /// Removes a vertex and every edge referencing it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        let idx = self.vertex_index.remove(&id)?;
        let removed = self.vertices.remove(idx);
        for (i, v) in self.vertices.iter().enumerate().skip(idx) {
            self.vertex_index.insert(v.id, i);
        }

        let edge_pairs = &mut self.edge_pairs;
        self.edges.retain(|e| {
            if e.touches(id) {
                edge_pairs.remove(&(e.source, e.target));
                false
            } else {
                true
            }
        });
        Some(removed)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let idx = self.edges.iter().position(|e| e.id == id)?;
        let removed = self.edges.remove(idx);
        self.edge_pairs.remove(&(removed.source, removed.target));
        Some(removed)
    }

    /// Drops every edge and restarts the edge id counter, keeping the vertices.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        self.edge_pairs.clear();
        self.next_edge_id = 0;
    }

    /// Empties the graph and resets both id counters. Mode flags are kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.vertex_index.clear();
        self.clear_edges();
        self.next_vertex_id = 0;
    }

    pub fn move_vertex(&mut self, id: VertexId, x: f64, y: f64) -> bool {
        let Some(v) = self.vertex_mut(id) else {
            return false;
        };
        v.x = x;
        v.y = y;
        true
    }

    pub fn set_wall(&mut self, id: VertexId, is_wall: bool) -> bool {
        let Some(v) = self.vertex_mut(id) else {
            return false;
        };
        v.is_wall = is_wall;
        true
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertex_index.contains_key(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertex_index.get(&id).map(|&idx| &self.vertices[idx])
    }

    fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertex_index
            .get(&id)
            .copied()
            .map(move |idx| &mut self.vertices[idx])
    }

    /// Finds the vertex sitting exactly at `(x, y)`; meant for grid cell indices.
    pub fn vertex_at(&self, x: f64, y: f64) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.x == x && v.y == y)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.iter().map(|v| v.id).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn first_vertex(&self) -> Option<&Vertex> {
        self.vertices.first()
    }

    pub fn last_vertex(&self) -> Option<&Vertex> {
        self.vertices.last()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True if an edge `u -> v` exists, or `v -> u` in undirected mode.
    pub fn has_edge_between(&self, u: VertexId, v: VertexId) -> bool {
        self.edge_pairs.contains(&(u, v))
            || (!self.options.directed && self.edge_pairs.contains(&(v, u)))
    }

    pub fn find_edge(&self, u: VertexId, v: VertexId) -> Option<&Edge> {
        if !self.has_edge_between(u, v) {
            return None;
        }
        let directed = self.options.directed;
        self.edges.iter().find(|e| e.connects(u, v, directed))
    }

    pub fn adjacency(&self) -> Adjacency {
        let mut adj: Adjacency = BTreeMap::new();
        for v in &self.vertices {
            adj.insert(v.id, Vec::new());
        }
        for e in &self.edges {
            if let Some(out) = adj.get_mut(&e.source) {
                out.push(Neighbor {
                    to: e.target,
                    weight: e.weight,
                });
            }
            if !self.options.directed {
                if let Some(out) = adj.get_mut(&e.target) {
                    out.push(Neighbor {
                        to: e.source,
                        weight: e.weight,
                    });
                }
            }
        }
        // `sort_by_key` is stable: equal targets keep edge insertion order.
        for neighbors in adj.values_mut() {
            neighbors.sort_by_key(|n| n.to);
        }
        adj
    }

    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        let size = self.vertices.len();
        let mut matrix = vec![vec![0.0; size]; size];
        for e in &self.edges {
            let (Some(&u), Some(&v)) = (
                self.vertex_index.get(&e.source),
                self.vertex_index.get(&e.target),
            ) else {
                continue;
            };
            let w = if self.options.weighted { e.cost() } else { 1.0 };
            matrix[u][v] = w;
            if !self.options.directed {
                matrix[v][u] = w;
            }
        }
        AdjacencyMatrix {
            matrix,
            vertex_order: self.vertices.clone(),
        }
    }

    /// `(source, target, weight)` triples in insertion order, weight only in weighted mode.
    pub fn edge_list(&self) -> Vec<(VertexId, VertexId, Option<f64>)> {
        self.edges
            .iter()
            .map(|e| {
                let w = if self.options.weighted {
                    Some(e.cost())
                } else {
                    None
                };
                (e.source, e.target, w)
            })
            .collect()
    }

    pub fn properties(&self) -> GraphProperties {
        let vertices = self.vertex_count();
        let edges = self.edge_count();
        GraphProperties {
            vertices,
            edges,
            components: alg::components(self).len(),
            likely_tree: vertices > 0 && edges + 1 == vertices,
        }
    }
}
