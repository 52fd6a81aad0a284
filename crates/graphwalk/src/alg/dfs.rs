//! Depth-first search over an explicit stack of resumable frames.
//!
//! Each frame is a vertex plus a cursor into its neighbor list. A call on a vertex that is
//! already visited still shows up in the trace (`visit` then `check`) before it returns.

use super::{Flow, HashSet, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, VertexId};

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    cursor: usize,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Call(VertexId),
    Resume,
}

pub struct Dfs {
    adj: Adjacency,
    visited: HashSet<VertexId>,
    order: Vec<VertexId>,
    frames: Vec<Frame>,
    phase: Phase,
}

impl Dfs {
    pub fn start(g: &Graph, start: Option<VertexId>) -> Stepper<Self> {
        match require_vertices(g, &[start]) {
            Ok(v) => Stepper::new(Self {
                adj: g.adjacency(),
                visited: HashSet::default(),
                order: Vec::new(),
                frames: Vec::new(),
                phase: Phase::Call(v[0]),
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    /// Vertices in the order they were marked visited.
    pub fn order(&self) -> &[VertexId] {
        &self.order
    }

    fn call_stack(&self) -> Vec<VertexId> {
        self.frames.iter().map(|f| f.vertex).collect()
    }
}

impl StepMachine for Dfs {
    const ALGORITHM: Algorithm = Algorithm::Dfs;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Call(u) => {
                let mut stack = self.call_stack();
                stack.push(u);
                out.emit(
                    Step::visit(format!("DFS({u}) called"))
                        .node(u)
                        .frontier(&stack)
                        .tag("call"),
                );
                if !self.visited.insert(u) {
                    out.emit(
                        Step::check(format!("{u} visited. Return."))
                            .node(u)
                            .frontier(&stack)
                            .tag("visited-guard"),
                    );
                } else {
                    self.order.push(u);
                    self.frames.push(Frame {
                        vertex: u,
                        cursor: 0,
                    });
                    out.emit(
                        Step::process(format!("Mark {u} visited"))
                            .node(u)
                            .frontier(&stack)
                            .tag("mark"),
                    );
                }
                self.phase = Phase::Resume;
            }
            Phase::Resume => {
                let Some(frame) = self.frames.last_mut() else {
                    out.emit(Step::done("DFS Complete").tag("done"));
                    return Flow::Halt;
                };
                let u = frame.vertex;
                if let Some(n) = neighbors(&self.adj, u).get(frame.cursor).copied() {
                    frame.cursor += 1;
                    out.emit(
                        Step::explore(format!("Loop neighbor {}", n.to))
                            .edge(u, n.to)
                            .frontier(self.call_stack())
                            .tag("neighbor"),
                    );
                    self.phase = Phase::Call(n.to);
                } else {
                    self.frames.pop();
                    out.emit(
                        Step::backtrack(format!("Finished {u}"))
                            .node(u)
                            .frontier(self.call_stack())
                            .tag("return"),
                    );
                }
            }
        }
        Flow::Continue
    }
}
