//! Cycle detection by depth-first search.
//!
//! Directed graphs report a back edge into the current recursion stack. Undirected graphs
//! report an edge to any visited vertex other than the DFS parent. The run halts on the first
//! cycle without a `done` step.

use super::{Flow, HashSet, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, VertexId};

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    parent: Option<VertexId>,
    cursor: usize,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    NextRoot,
    Enter {
        v: VertexId,
        parent: Option<VertexId>,
    },
    Resume,
}

pub struct CycleDetection {
    adj: Adjacency,
    directed: bool,
    vertices: Vec<VertexId>,
    next_root: usize,
    visited: HashSet<VertexId>,
    on_stack: HashSet<VertexId>,
    frames: Vec<Frame>,
    cycle_edge: Option<(VertexId, VertexId)>,
    phase: Phase,
}

impl CycleDetection {
    pub fn start(g: &Graph) -> Stepper<Self> {
        match require_vertices(g, &[]) {
            Ok(_) => Stepper::new(Self {
                adj: g.adjacency(),
                directed: g.is_directed(),
                vertices: g.vertex_ids(),
                next_root: 0,
                visited: HashSet::default(),
                on_stack: HashSet::default(),
                frames: Vec::new(),
                cycle_edge: None,
                phase: Phase::NextRoot,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    /// The edge that closed the first cycle found, as `(from, to)`.
    pub fn cycle_edge(&self) -> Option<(VertexId, VertexId)> {
        self.cycle_edge
    }

    pub fn cycle_found(&self) -> bool {
        self.cycle_edge.is_some()
    }

    fn closes_cycle(&self, v: VertexId, parent: Option<VertexId>) -> bool {
        if self.directed {
            self.on_stack.contains(&v)
        } else {
            self.visited.contains(&v) && parent != Some(v)
        }
    }
}

impl StepMachine for CycleDetection {
    const ALGORITHM: Algorithm = Algorithm::Cycle;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::NextRoot => {
                while let Some(&v) = self.vertices.get(self.next_root) {
                    self.next_root += 1;
                    if !self.visited.contains(&v) {
                        self.phase = Phase::Enter { v, parent: None };
                        return Flow::Continue;
                    }
                }
                out.emit(Step::done("No cycles detected").tag("done"));
                return Flow::Halt;
            }
            Phase::Enter { v, parent } => {
                self.visited.insert(v);
                self.on_stack.insert(v);
                self.frames.push(Frame {
                    vertex: v,
                    parent,
                    cursor: 0,
                });
                out.emit(Step::visit(format!("Visiting {v}")).node(v).tag("enter"));
                self.phase = Phase::Resume;
            }
            Phase::Resume => {
                let Some(frame) = self.frames.last_mut() else {
                    self.phase = Phase::NextRoot;
                    return Flow::Continue;
                };
                let (u, parent) = (frame.vertex, frame.parent);
                let Some(n) = neighbors(&self.adj, u).get(frame.cursor).copied() else {
                    self.frames.pop();
                    self.on_stack.remove(&u);
                    out.emit(Step::backtrack(format!("Finished {u}")).node(u).tag("exit"));
                    return Flow::Continue;
                };
                frame.cursor += 1;
                let v = n.to;
                out.emit(
                    Step::explore(format!("Checking edge {u}->{v}"))
                        .edge(u, v)
                        .tag("edge"),
                );
                if self.closes_cycle(v, parent) {
                    self.cycle_edge = Some((u, v));
                    out.emit(
                        Step::process(format!("Cycle detected! Back edge to {v}"))
                            .node(v)
                            .edge(u, v)
                            .tag("cycle"),
                    );
                    return Flow::Halt;
                }
                if !self.visited.contains(&v) {
                    self.phase = Phase::Enter { v, parent: Some(u) };
                }
            }
        }
        Flow::Continue
    }
}
