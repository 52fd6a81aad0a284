//! Built-in example graphs.

use crate::error::{Error, Result};
use graphwalk_graphlib::{Graph, GraphOptions, VertexId};
use std::fmt;
use std::str::FromStr;

/// Cells per side of the [`Preset::Grid`] graph.
pub const GRID_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Seven-vertex binary tree, undirected.
    Tree,
    /// Directed 4-cycle `0 -> 1 -> 2 -> 3 -> 0`.
    Cycle,
    /// Directed diamond `0 -> 1 -> 2`, `0 -> 3 -> 2`.
    Dag,
    /// 10x10 grid-mode lattice with right and down edges, undirected.
    Grid,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Tree, Preset::Cycle, Preset::Dag, Preset::Grid];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Tree => "tree",
            Preset::Cycle => "cycle",
            Preset::Dag => "dag",
            Preset::Grid => "grid",
        }
    }

    /// Clears `g` and rebuilds it as this preset, centered on a canvas `width` wide.
    ///
    /// The weighted flag is left as it was.
    pub fn load(self, g: &mut Graph, width: f64) {
        let weighted = g.is_weighted();
        g.clear();
        let cx = width / 2.0;
        match self {
            Preset::Tree => {
                g.set_options(GraphOptions {
                    directed: false,
                    weighted,
                    grid: false,
                });
                let ids = add_vertices(
                    g,
                    &[
                        (cx, 50.0),
                        (cx - 100.0, 150.0),
                        (cx + 100.0, 150.0),
                        (cx - 150.0, 250.0),
                        (cx - 50.0, 250.0),
                        (cx + 50.0, 250.0),
                        (cx + 150.0, 250.0),
                    ],
                );
                for (u, v) in [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)] {
                    g.add_edge(ids[u], ids[v]);
                }
            }
            Preset::Cycle => {
                g.set_options(GraphOptions {
                    directed: true,
                    weighted,
                    grid: false,
                });
                let ids = add_vertices(
                    g,
                    &[
                        (cx, 50.0),
                        (cx + 100.0, 150.0),
                        (cx, 250.0),
                        (cx - 100.0, 150.0),
                    ],
                );
                g.set_path(&[ids[0], ids[1], ids[2], ids[3], ids[0]]);
            }
            Preset::Dag => {
                g.set_options(GraphOptions {
                    directed: true,
                    weighted,
                    grid: false,
                });
                let ids = add_vertices(
                    g,
                    &[(100.0, 150.0), (250.0, 150.0), (400.0, 150.0), (250.0, 50.0)],
                );
                for (u, v) in [(0, 1), (1, 2), (0, 3), (3, 2)] {
                    g.add_edge(ids[u], ids[v]);
                }
            }
            Preset::Grid => {
                g.set_options(GraphOptions {
                    directed: false,
                    weighted,
                    grid: true,
                });
                load_lattice(g, GRID_SIZE, GRID_SIZE);
            }
        }
        tracing::debug!(
            preset = self.name(),
            vertices = g.vertex_count(),
            edges = g.edge_count(),
            "preset loaded"
        );
    }
}

fn add_vertices(g: &mut Graph, positions: &[(f64, f64)]) -> Vec<VertexId> {
    positions.iter().map(|&(x, y)| g.add_vertex(x, y).id).collect()
}

/// Adds a `cols` x `rows` lattice of cells at integer coordinates, row by row, with an edge to
/// the right and below each cell.
pub fn load_lattice(g: &mut Graph, cols: u32, rows: u32) {
    let mut cells = Vec::with_capacity((cols * rows) as usize);
    for y in 0..rows {
        for x in 0..cols {
            cells.push(g.add_vertex(f64::from(x), f64::from(y)).id);
        }
    }
    let id = |x: u32, y: u32| cells[(y * cols + x) as usize];
    for y in 0..rows {
        for x in 0..cols {
            if x + 1 < cols {
                g.add_edge(id(x, y), id(x + 1, y));
            }
            if y + 1 < rows {
                g.add_edge(id(x, y), id(x, y + 1));
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownPreset {
                name: s.to_string(),
            })
    }
}
