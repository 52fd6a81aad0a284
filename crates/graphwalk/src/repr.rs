//! Plain-text renderings of a graph and of algorithm payloads.

use crate::step::{Distances, format_distance};
use graphwalk_graphlib::{Graph, VertexId};
use std::fmt::Write as _;

/// One line per vertex: `id: a -> b -> c`, with `(w)` after each target in weighted mode and
/// `null` for a vertex without neighbors.
pub fn adjacency_list(g: &Graph) -> String {
    let mut out = String::new();
    for (id, neighbors) in g.adjacency() {
        let targets = neighbors
            .iter()
            .map(|n| {
                if g.is_weighted() {
                    format!("{}({})", n.to, format_distance(n.cost()))
                } else {
                    n.to.to_string()
                }
            })
            .collect::<Vec<_>>();
        let joined = if targets.is_empty() {
            "null".to_string()
        } else {
            targets.join(" -> ")
        };
        let _ = writeln!(out, "{id}: {joined}");
    }
    out
}

/// Adjacency matrix with a header row and a header column of vertex ids.
pub fn adjacency_matrix(g: &Graph) -> String {
    let m = g.adjacency_matrix();
    let ids: Vec<VertexId> = m.vertex_order.iter().map(|v| v.id).collect();
    grid(&ids, &m.matrix)
}

/// `(u, v)` per edge in insertion order, `(u, v, w)` in weighted mode, or `// No edges`.
pub fn edge_list(g: &Graph) -> String {
    let edges = g.edge_list();
    if edges.is_empty() {
        return "// No edges".to_string();
    }
    let mut out = String::new();
    for (u, v, w) in edges {
        let _ = match w {
            Some(w) => writeln!(out, "({u}, {v}, {})", format_distance(w)),
            None => writeln!(out, "({u}, {v})"),
        };
    }
    out
}

/// An all-pairs distance grid labelled with `order`; unreachable pairs print as `∞`.
pub fn distance_grid(order: &[VertexId], matrix: &[Vec<f64>]) -> String {
    grid(order, matrix)
}

/// `id=distance` pairs in id order.
pub fn distances(distances: &Distances) -> String {
    distances
        .iter()
        .map(|(v, d)| format!("{v}={}", format_distance(*d)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn grid(ids: &[VertexId], matrix: &[Vec<f64>]) -> String {
    let header: Vec<String> = ids.iter().map(VertexId::to_string).collect();
    let rows: Vec<Vec<String>> = matrix
        .iter()
        .map(|row| row.iter().map(|d| format_distance(*d)).collect())
        .collect();
    let width = header
        .iter()
        .chain(rows.iter().flatten())
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    let _ = write!(out, "{:>width$}", "");
    for h in &header {
        let _ = write!(out, " {h:>width$}");
    }
    out.push('\n');
    for (h, row) in header.iter().zip(&rows) {
        let _ = write!(out, "{h:>width$}");
        for cell in row {
            let _ = write!(out, " {cell:>width$}");
        }
        out.push('\n');
    }
    out
}
