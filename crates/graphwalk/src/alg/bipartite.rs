//! Bipartite check by BFS two-coloring, one component at a time.

use super::{Flow, HashMap, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, VertexId};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
}

impl Color {
    fn other(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Color::Red => "Red (0)",
            Color::Blue => "Blue (1)",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Begin,
    NextRoot,
    Dequeue,
    Scan { u: VertexId, next: usize },
}

pub struct Bipartite {
    adj: Adjacency,
    vertices: Vec<VertexId>,
    next_root: usize,
    colors: HashMap<VertexId, Color>,
    queue: VecDeque<VertexId>,
    conflict: Option<(VertexId, VertexId)>,
    phase: Phase,
}

impl Bipartite {
    pub fn start(g: &Graph) -> Stepper<Self> {
        match require_vertices(g, &[]) {
            Ok(_) => Stepper::new(Self {
                adj: g.adjacency(),
                vertices: g.vertex_ids(),
                next_root: 0,
                colors: HashMap::default(),
                queue: VecDeque::new(),
                conflict: None,
                phase: Phase::Begin,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    pub fn color_of(&self, v: VertexId) -> Option<Color> {
        self.colors.get(&v).copied()
    }

    /// The same-colored edge that ended the run, if any.
    pub fn conflict(&self) -> Option<(VertexId, VertexId)> {
        self.conflict
    }
}

impl StepMachine for Bipartite {
    const ALGORITHM: Algorithm = Algorithm::Bipartite;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Begin => {
                out.emit(Step::init("Start Bipartite Check").tag("init"));
                self.phase = Phase::NextRoot;
            }
            Phase::NextRoot => {
                while let Some(&v) = self.vertices.get(self.next_root) {
                    self.next_root += 1;
                    if self.colors.contains_key(&v) {
                        continue;
                    }
                    self.colors.insert(v, Color::Red);
                    self.queue.push_back(v);
                    out.emit(
                        Step::visit(format!("Start component at {v}. Color: Red (0)"))
                            .node(v)
                            .tag("root"),
                    );
                    self.phase = Phase::Dequeue;
                    return Flow::Continue;
                }
                out.emit(Step::done("Graph is Bipartite").tag("done"));
                return Flow::Halt;
            }
            Phase::Dequeue => {
                self.phase = match self.queue.pop_front() {
                    Some(u) => Phase::Scan { u, next: 0 },
                    None => Phase::NextRoot,
                };
            }
            Phase::Scan { u, next } => {
                let Some(n) = neighbors(&self.adj, u).get(next).copied() else {
                    self.phase = Phase::Dequeue;
                    return Flow::Continue;
                };
                let v = n.to;
                let Some(&cu) = self.colors.get(&u) else {
                    self.phase = Phase::Dequeue;
                    return Flow::Continue;
                };
                match self.colors.get(&v).copied() {
                    None => {
                        let color = cu.other();
                        self.colors.insert(v, color);
                        self.queue.push_back(v);
                        out.emit(
                            Step::visit(format!("Color {v} {}", color.label()))
                                .node(v)
                                .edge(u, v)
                                .tag("color"),
                        );
                    }
                    Some(cv) if cv == cu => {
                        self.conflict = Some((u, v));
                        out.emit(
                            Step::process(format!(
                                "Conflict! {u} & {v} same color. Not Bipartite."
                            ))
                            .node(v)
                            .edge(u, v)
                            .tag("conflict"),
                        );
                        return Flow::Halt;
                    }
                    Some(_) => {}
                }
                self.phase = Phase::Scan { u, next: next + 1 };
            }
        }
        Flow::Continue
    }
}
