//! Kahn's topological sort.
//!
//! In-degrees are taken from the derived adjacency, so an undirected graph with any edge
//! never reaches zero in-degree for its endpoints and reports a cycle.

use super::{Flow, HashMap, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, VertexId};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
enum Phase {
    Begin,
    Degrees,
    Seed,
    Guard,
    Dequeue,
    Scan { u: VertexId, next: usize },
}

pub struct Kahn {
    adj: Adjacency,
    vertices: Vec<VertexId>,
    in_degree: HashMap<VertexId, usize>,
    queue: VecDeque<VertexId>,
    order: Vec<VertexId>,
    cycle_detected: bool,
    phase: Phase,
}

impl Kahn {
    pub fn start(g: &Graph) -> Stepper<Self> {
        match require_vertices(g, &[]) {
            Ok(_) => Stepper::new(Self {
                adj: g.adjacency(),
                vertices: g.vertex_ids(),
                in_degree: HashMap::default(),
                queue: VecDeque::new(),
                order: Vec::new(),
                cycle_detected: false,
                phase: Phase::Begin,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    /// The order produced so far; shorter than the vertex count when a cycle blocks it.
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    pub fn cycle_detected(&self) -> bool {
        self.cycle_detected
    }

    fn finish(&mut self, out: &mut Outbox) -> Flow {
        if self.order.len() != self.vertices.len() {
            self.cycle_detected = true;
            out.emit(Step::done("Cycle detected! Topological sort impossible.").tag("done"));
        } else {
            let joined = self
                .order
                .iter()
                .map(VertexId::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            out.emit(
                Step::done(format!("Topological Sort: {joined}"))
                    .frontier(&self.order)
                    .tag("done"),
            );
        }
        Flow::Halt
    }
}

impl StepMachine for Kahn {
    const ALGORITHM: Algorithm = Algorithm::Topological;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Begin => {
                out.emit(Step::init("Calculating in-degrees...").tag("in-degree"));
                self.phase = Phase::Degrees;
            }
            Phase::Degrees => {
                for &v in &self.vertices {
                    self.in_degree.insert(v, 0);
                }
                for list in self.adj.values() {
                    for n in list {
                        *self.in_degree.entry(n.to).or_insert(0) += 1;
                    }
                }
                out.emit(Step::init("In-degrees calculated").tag("in-degree-done"));
                self.phase = Phase::Seed;
            }
            Phase::Seed => {
                for &v in &self.vertices {
                    if self.in_degree.get(&v) == Some(&0) {
                        self.queue.push_back(v);
                    }
                }
                out.emit(
                    Step::visit("Enqueue nodes with 0 in-degree")
                        .frontier(&self.queue)
                        .tag("seed"),
                );
                self.phase = Phase::Guard;
            }
            Phase::Guard => {
                if self.queue.is_empty() {
                    return self.finish(out);
                }
                out.emit(
                    Step::check("Queue not empty")
                        .frontier(&self.queue)
                        .tag("loop"),
                );
                self.phase = Phase::Dequeue;
            }
            Phase::Dequeue => {
                let Some(u) = self.queue.pop_front() else {
                    self.phase = Phase::Guard;
                    return Flow::Continue;
                };
                self.order.push(u);
                out.emit(
                    Step::process(format!("Process {u}"))
                        .node(u)
                        .frontier(&self.queue)
                        .tag("dequeue"),
                );
                out.emit(
                    Step::process(format!("Add {u} to result"))
                        .node(u)
                        .frontier(&self.queue)
                        .tag("append"),
                );
                self.phase = Phase::Scan { u, next: 0 };
            }
            Phase::Scan { u, next } => {
                let Some(n) = neighbors(&self.adj, u).get(next).copied() else {
                    self.phase = Phase::Guard;
                    return Flow::Continue;
                };
                let v = n.to;
                out.emit(
                    Step::explore(format!("Check neighbor {v}"))
                        .edge(u, v)
                        .frontier(&self.queue)
                        .tag("neighbor"),
                );
                let degree = self.in_degree.entry(v).or_insert(0);
                *degree = degree.saturating_sub(1);
                let remaining = *degree;
                out.emit(
                    Step::explore(format!("Decrement in-degree of {v} to {remaining}"))
                        .edge(u, v)
                        .frontier(&self.queue)
                        .tag("decrement"),
                );
                if remaining == 0 {
                    self.queue.push_back(v);
                    out.emit(
                        Step::visit(format!("{v} has 0 in-degree. Enqueue."))
                            .node(v)
                            .frontier(&self.queue)
                            .tag("enqueue"),
                    );
                }
                self.phase = Phase::Scan { u, next: next + 1 };
            }
        }
        Flow::Continue
    }
}
