//! Maze carving on grid-mode graphs.
//!
//! Every cell becomes a wall, then a randomized iterative backtracker opens cells two steps
//! apart together with the cell between them. The first and last cells are always opened.
//! Finally the edge list is rebuilt with right and down edges between open cells; edge ids
//! restart from zero while vertex ids stay untouched.

use crate::error::{Error, Result};
use graphwalk_graphlib::{Graph, VertexId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

const JUMPS: [(i64, i64); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// Carves with a [`StdRng`] seeded from `seed`; the same seed yields the same maze.
pub fn carve_seeded(g: &mut Graph, seed: u64) -> Result<usize> {
    carve(g, &mut StdRng::seed_from_u64(seed))
}

/// Carves a maze into `g` and returns the number of open cells.
pub fn carve<R: Rng>(g: &mut Graph, rng: &mut R) -> Result<usize> {
    if !g.is_grid() {
        return Err(Error::NotAGrid);
    }
    let (Some(first), Some(last)) = (g.first_vertex(), g.last_vertex()) else {
        return Err(Error::NotAGrid);
    };
    let (first, last) = (first.id, last.id);

    let cells: BTreeMap<(i64, i64), VertexId> = g
        .vertices()
        .iter()
        .filter(|v| v.x.fract() == 0.0 && v.y.fract() == 0.0)
        .map(|v| ((v.x as i64, v.y as i64), v.id))
        .collect();
    let position: BTreeMap<VertexId, (i64, i64)> =
        cells.iter().map(|(&pos, &id)| (id, pos)).collect();
    let Some(&origin) = position.get(&first) else {
        return Err(Error::NotAGrid);
    };

    for id in g.vertex_ids() {
        g.set_wall(id, true);
    }

    let mut visited = BTreeSet::from([origin]);
    let mut stack = vec![origin];
    g.set_wall(first, false);
    while let Some((x, y)) = stack.pop() {
        let candidates: Vec<(i64, i64)> = JUMPS
            .iter()
            .map(|(dx, dy)| (x + dx, y + dy))
            .filter(|p| cells.contains_key(p) && !visited.contains(p))
            .collect();
        if candidates.is_empty() {
            continue;
        }
        stack.push((x, y));
        let next = candidates[rng.gen_range(0..candidates.len())];
        let mid = ((x + next.0) / 2, (y + next.1) / 2);
        for pos in [mid, next] {
            if let Some(&id) = cells.get(&pos) {
                g.set_wall(id, false);
            }
        }
        visited.insert(next);
        stack.push(next);
    }
    g.set_wall(first, false);
    g.set_wall(last, false);

    rebuild_edges(g, &cells);
    let open = g.vertices().iter().filter(|v| !v.is_wall).count();
    tracing::debug!(open, edges = g.edge_count(), "maze carved");
    Ok(open)
}

/// Clears the edge list and links every open cell to its open right and down neighbors.
fn rebuild_edges(g: &mut Graph, cells: &BTreeMap<(i64, i64), VertexId>) {
    g.clear_edges();
    let open = |g: &Graph, id: VertexId| g.vertex(id).is_some_and(|v| !v.is_wall);
    let mut rows: Vec<_> = cells.iter().collect();
    rows.sort_by_key(|((x, y), _)| (*y, *x));
    for (&(x, y), &u) in rows {
        if !open(g, u) {
            continue;
        }
        for pos in [(x + 1, y), (x, y + 1)] {
            if let Some(&v) = cells.get(&pos) {
                if open(g, v) {
                    g.add_edge(u, v);
                }
            }
        }
    }
}
