//! Floyd-Warshall all-pairs shortest paths. Every step carries a copy of the grid.

use super::{Flow, Outbox, StepMachine, Stepper, require_vertices};
use crate::alg::Algorithm;
use crate::step::{DistanceGrid, Step, format_distance};
use graphwalk_graphlib::{Graph, VertexId};

#[derive(Debug, Clone, Copy)]
enum Phase {
    Init,
    Pivot(usize),
    Row { k: usize, i: usize },
}

pub struct FloydWarshall {
    order: Vec<VertexId>,
    dist: DistanceGrid,
    phase: Phase,
}

impl FloydWarshall {
    pub fn start(g: &Graph) -> Stepper<Self> {
        if let Err(message) = require_vertices(g, &[]) {
            return Stepper::rejected(message);
        }
        let order = g.vertex_ids();
        let n = order.len();
        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        let index_of = |v: VertexId| order.iter().position(|&o| o == v);
        for e in g.edges() {
            let (Some(u), Some(v)) = (index_of(e.source), index_of(e.target)) else {
                continue;
            };
            dist[u][v] = e.cost();
            if !g.is_directed() {
                dist[v][u] = e.cost();
            }
        }
        Stepper::new(Self {
            order,
            dist,
            phase: Phase::Init,
        })
    }

    /// Row-major distances indexed like [`vertex_order`](Self::vertex_order).
    pub fn matrix(&self) -> &DistanceGrid {
        &self.dist
    }

    pub fn vertex_order(&self) -> &[VertexId] {
        &self.order
    }
}

impl StepMachine for FloydWarshall {
    const ALGORITHM: Algorithm = Algorithm::FloydWarshall;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        let n = self.order.len();
        match self.phase {
            Phase::Init => {
                out.emit(Step::init("Init Distance Matrix").matrix(&self.dist).tag("init"));
                self.phase = Phase::Pivot(0);
            }
            Phase::Pivot(k) => {
                let Some(&pivot) = self.order.get(k) else {
                    out.emit(
                        Step::done("Floyd-Warshall Complete")
                            .matrix(&self.dist)
                            .tag("done"),
                    );
                    return Flow::Halt;
                };
                out.emit(
                    Step::visit(format!("Pivot k={pivot}"))
                        .node(pivot)
                        .matrix(&self.dist)
                        .tag("pivot"),
                );
                self.phase = Phase::Row { k, i: 0 };
            }
            Phase::Row { k, i } => {
                if i >= n {
                    self.phase = Phase::Pivot(k + 1);
                    return Flow::Continue;
                }
                for j in 0..n {
                    let through = self.dist[i][k] + self.dist[k][j];
                    if self.dist[i][j] > through {
                        self.dist[i][j] = through;
                        out.emit(
                            Step::relax(format!(
                                "Update dist[{}][{}] via {} to {}",
                                self.order[i],
                                self.order[j],
                                self.order[k],
                                format_distance(through)
                            ))
                            .matrix(&self.dist)
                            .tag("relax"),
                        );
                    }
                }
                self.phase = Phase::Row { k, i: i + 1 };
            }
        }
        Flow::Continue
    }
}
