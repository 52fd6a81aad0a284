//! Bellman-Ford single-source shortest paths.
//!
//! Runs at most `|V| - 1` passes over the arcs in edge insertion order and stops early after a
//! pass without improvement. An undirected edge contributes two arcs, `u->v` then `v->u`.
//! A final sweep reports the first arc that still relaxes as a negative cycle and halts.

use super::{Flow, Outbox, StepMachine, Stepper, require_vertices};
use crate::alg::Algorithm;
use crate::step::{Distances, Step, format_distance};
use graphwalk_graphlib::{Graph, VertexId};

#[derive(Debug, Clone, Copy)]
struct Arc {
    from: VertexId,
    to: VertexId,
    weight: f64,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Init,
    Pass(usize),
    Sweep { pass: usize, next: usize },
    NegativeCheck,
}

pub struct BellmanFord {
    arcs: Vec<Arc>,
    start: VertexId,
    passes: usize,
    dist: Distances,
    changed: bool,
    negative_cycle: Option<(VertexId, VertexId)>,
    phase: Phase,
}

impl BellmanFord {
    pub fn start(g: &Graph, start: Option<VertexId>) -> Stepper<Self> {
        match require_vertices(g, &[start]) {
            Ok(v) => {
                let mut arcs = Vec::with_capacity(g.edge_count() * 2);
                for e in g.edges() {
                    let weight = e.cost();
                    arcs.push(Arc {
                        from: e.source,
                        to: e.target,
                        weight,
                    });
                    if !g.is_directed() {
                        arcs.push(Arc {
                            from: e.target,
                            to: e.source,
                            weight,
                        });
                    }
                }
                Stepper::new(Self {
                    arcs,
                    start: v[0],
                    passes: g.vertex_count().saturating_sub(1),
                    dist: g
                        .vertex_ids()
                        .into_iter()
                        .map(|id| (id, f64::INFINITY))
                        .collect(),
                    changed: false,
                    negative_cycle: None,
                    phase: Phase::Init,
                })
            }
            Err(message) => Stepper::rejected(message),
        }
    }

    pub fn distances(&self) -> &Distances {
        &self.dist
    }

    /// The arc that still relaxed after the last pass, if any.
    pub fn negative_cycle(&self) -> Option<(VertexId, VertexId)> {
        self.negative_cycle
    }

    fn distance(&self, v: VertexId) -> f64 {
        self.dist.get(&v).copied().unwrap_or(f64::INFINITY)
    }

    fn improves(&self, arc: &Arc) -> Option<f64> {
        let du = self.distance(arc.from);
        let alt = du + arc.weight;
        (du.is_finite() && alt < self.distance(arc.to)).then_some(alt)
    }
}

impl StepMachine for BellmanFord {
    const ALGORITHM: Algorithm = Algorithm::BellmanFord;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Init => {
                let s = self.start;
                self.dist.insert(s, 0.0);
                out.emit(
                    Step::init(format!("Init Bellman-Ford. Start: {s}"))
                        .node(s)
                        .distances(&self.dist)
                        .tag("init"),
                );
                self.phase = Phase::Pass(0);
            }
            Phase::Pass(pass) => {
                if pass >= self.passes {
                    self.phase = Phase::NegativeCheck;
                    return Flow::Continue;
                }
                self.changed = false;
                out.emit(
                    Step::visit(format!("Iteration {}/{}", pass + 1, self.passes))
                        .distances(&self.dist)
                        .tag("pass"),
                );
                self.phase = Phase::Sweep { pass, next: 0 };
            }
            Phase::Sweep { pass, next } => {
                let Some(arc) = self.arcs.get(next).copied() else {
                    self.phase = if self.changed {
                        Phase::Pass(pass + 1)
                    } else {
                        Phase::NegativeCheck
                    };
                    return Flow::Continue;
                };
                let (u, v) = (arc.from, arc.to);
                out.emit(
                    Step::explore(format!("Check {u}->{v} (w:{})", format_distance(arc.weight)))
                        .edge(u, v)
                        .tag("arc"),
                );
                if let Some(alt) = self.improves(&arc) {
                    self.dist.insert(v, alt);
                    self.changed = true;
                    out.emit(
                        Step::relax(format!("Relax {u}->{v}. New dist: {}", format_distance(alt)))
                            .edge(u, v)
                            .distances(&self.dist)
                            .tag("relax"),
                    );
                }
                self.phase = Phase::Sweep {
                    pass,
                    next: next + 1,
                };
            }
            Phase::NegativeCheck => {
                let violated = self.arcs.iter().find(|a| self.improves(a).is_some());
                if let Some(arc) = violated.copied() {
                    self.negative_cycle = Some((arc.from, arc.to));
                    out.emit(
                        Step::process("Negative Cycle Detected!")
                            .edge(arc.from, arc.to)
                            .distances(&self.dist)
                            .tag("negative-cycle"),
                    );
                    return Flow::Halt;
                }
                out.emit(
                    Step::done("Bellman-Ford Complete")
                        .distances(&self.dist)
                        .tag("done"),
                );
                return Flow::Halt;
            }
        }
        Flow::Continue
    }
}
