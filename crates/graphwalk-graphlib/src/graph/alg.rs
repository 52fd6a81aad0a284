//! Plain (non-stepping) helper algorithms.
//!
//! These answer structural questions in one call. The stepping engine in `graphwalk` is
//! checked against them, and [`Graph::properties`](super::Graph::properties) uses
//! [`components`].

use super::{Adjacency, Graph, VertexId};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Vertices reachable from `roots`, in depth-first preorder (ascending-id neighbor order).
pub fn preorder(g: &Graph, roots: &[VertexId]) -> Vec<VertexId> {
    fn dfs(
        adj: &Adjacency,
        v: VertexId,
        visited: &mut BTreeSet<VertexId>,
        out: &mut Vec<VertexId>,
    ) {
        if !visited.insert(v) {
            return;
        }
        out.push(v);
        for n in adj.get(&v).into_iter().flatten() {
            dfs(adj, n.to, visited, out);
        }
    }

    let adj = g.adjacency();
    let mut visited: BTreeSet<VertexId> = BTreeSet::new();
    let mut out: Vec<VertexId> = Vec::new();
    for &r in roots {
        if g.has_vertex(r) {
            dfs(&adj, r, &mut visited, &mut out);
        }
    }
    out
}

pub fn reachable(g: &Graph, start: VertexId) -> BTreeSet<VertexId> {
    preorder(g, &[start]).into_iter().collect()
}

/// Weakly connected components, each listed in discovery order.
///
/// Edge direction is ignored, so a directed graph reports the same components as its
/// undirected shadow.
pub fn components(g: &Graph) -> Vec<Vec<VertexId>> {
    let mut undirected: BTreeMap<VertexId, Vec<VertexId>> =
        g.vertex_ids().into_iter().map(|v| (v, Vec::new())).collect();
    for e in g.edges() {
        if let Some(out) = undirected.get_mut(&e.source) {
            out.push(e.target);
        }
        if let Some(out) = undirected.get_mut(&e.target) {
            out.push(e.source);
        }
    }

    let mut seen: BTreeSet<VertexId> = BTreeSet::new();
    let mut out: Vec<Vec<VertexId>> = Vec::new();
    for start in g.vertex_ids() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<VertexId> = Vec::new();
        let mut q: VecDeque<VertexId> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for &n in undirected.get(&v).into_iter().flatten() {
                if seen.insert(n) {
                    q.push_back(n);
                }
            }
        }
        out.push(comp);
    }
    out
}

/// True when `order` lists every vertex once and puts `u` before `v` for every edge `u -> v`.
pub fn is_topological_order(g: &Graph, order: &[VertexId]) -> bool {
    if order.len() != g.vertex_count() {
        return false;
    }
    let position = |id: VertexId| order.iter().position(|&v| v == id);
    g.edges()
        .iter()
        .all(|e| match (position(e.source), position(e.target)) {
            (Some(i), Some(j)) => i < j,
            _ => false,
        })
}
