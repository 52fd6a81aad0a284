//! Breadth-first search with a FIFO frontier.

use super::{Flow, HashSet, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, VertexId};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
enum Phase {
    Seed,
    Guard,
    Dequeue,
    Scan { u: VertexId, next: usize },
}

pub struct Bfs {
    adj: Adjacency,
    start: VertexId,
    visited: HashSet<VertexId>,
    order: Vec<VertexId>,
    queue: VecDeque<VertexId>,
    phase: Phase,
}

impl Bfs {
    pub fn start(g: &Graph, start: Option<VertexId>) -> Stepper<Self> {
        match require_vertices(g, &[start]) {
            Ok(v) => Stepper::new(Self {
                adj: g.adjacency(),
                start: v[0],
                visited: HashSet::default(),
                order: Vec::new(),
                queue: VecDeque::new(),
                phase: Phase::Seed,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    /// Vertices in discovery order.
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    fn discover(&mut self, v: VertexId) {
        self.visited.insert(v);
        self.order.push(v);
        self.queue.push_back(v);
    }
}

impl StepMachine for Bfs {
    const ALGORITHM: Algorithm = Algorithm::Bfs;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Seed => {
                let s = self.start;
                self.discover(s);
                out.emit(
                    Step::visit(format!("Start BFS. Enqueue {s}"))
                        .node(s)
                        .frontier(&self.queue)
                        .tag("enqueue-start"),
                );
                self.phase = Phase::Guard;
            }
            Phase::Guard => {
                if self.queue.is_empty() {
                    out.emit(Step::done("BFS Complete").tag("done"));
                    return Flow::Halt;
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
                out.emit(
                    Step::process(format!("Dequeue {u}"))
                        .node(u)
                        .frontier(&self.queue)
                        .tag("dequeue"),
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
                if !self.visited.contains(&v) {
                    self.discover(v);
                    out.emit(
                        Step::visit(format!("Enqueue {v} and mark visited"))
                            .node(v)
                            .edge(u, v)
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
