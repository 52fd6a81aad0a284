//! Tarjan's strongly connected components.
//!
//! The recursion is a stack of frames; a frame waiting on a child records it in `awaiting`
//! so the low-link update happens on the transition after the child returns.

use super::{Flow, HashMap, HashSet, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, VertexId};

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    cursor: usize,
    awaiting: Option<VertexId>,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    NextRoot,
    Enter(VertexId),
    Resume,
}

pub struct Tarjan {
    adj: Adjacency,
    vertices: Vec<VertexId>,
    next_root: usize,
    index: HashMap<VertexId, usize>,
    low: HashMap<VertexId, usize>,
    stack: Vec<VertexId>,
    on_stack: HashSet<VertexId>,
    frames: Vec<Frame>,
    counter: usize,
    components: Vec<Vec<VertexId>>,
    phase: Phase,
}

impl Tarjan {
    pub fn start(g: &Graph) -> Stepper<Self> {
        match require_vertices(g, &[]) {
            Ok(_) => Stepper::new(Self {
                adj: g.adjacency(),
                vertices: g.vertex_ids(),
                next_root: 0,
                index: HashMap::default(),
                low: HashMap::default(),
                stack: Vec::new(),
                on_stack: HashSet::default(),
                frames: Vec::new(),
                counter: 0,
                components: Vec::new(),
                phase: Phase::NextRoot,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    /// Components found so far, each in pop order (root last).
    pub fn components(&self) -> &[Vec<VertexId>] {
        &self.components
    }

    fn low(&self, v: VertexId) -> usize {
        self.low.get(&v).copied().unwrap_or(usize::MAX)
    }

    fn lower(&mut self, v: VertexId, candidate: usize) -> usize {
        let low = self.low(v).min(candidate);
        self.low.insert(v, low);
        low
    }

    fn close(&mut self, at: VertexId, out: &mut Outbox) {
        if self.index.get(&at) != self.low.get(&at) {
            return;
        }
        let n = self.components.len() + 1;
        out.emit(
            Step::process(format!("SCC #{n} found (Root: {at})"))
                .node(at)
                .frontier(&self.stack)
                .tag("root"),
        );
        let mut members = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack.remove(&w);
            members.push(w);
            out.emit(
                Step::relax(format!("Pop {w} from stack (SCC #{n})"))
                    .node(w)
                    .frontier(&self.stack)
                    .tag("pop"),
            );
            if w == at {
                break;
            }
        }
        self.components.push(members);
    }
}

impl StepMachine for Tarjan {
    const ALGORITHM: Algorithm = Algorithm::Tarjan;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::NextRoot => {
                while let Some(&v) = self.vertices.get(self.next_root) {
                    self.next_root += 1;
                    if !self.index.contains_key(&v) {
                        self.phase = Phase::Enter(v);
                        return Flow::Continue;
                    }
                }
                out.emit(
                    Step::done(format!(
                        "Tarjan's Complete. Found {} SCCs.",
                        self.components.len()
                    ))
                    .tag("done"),
                );
                return Flow::Halt;
            }
            Phase::Enter(v) => {
                let id = self.counter;
                self.counter += 1;
                self.index.insert(v, id);
                self.low.insert(v, id);
                self.stack.push(v);
                self.on_stack.insert(v);
                self.frames.push(Frame {
                    vertex: v,
                    cursor: 0,
                    awaiting: None,
                });
                out.emit(
                    Step::visit(format!("Visit {v}. ID/Low: {id}"))
                        .node(v)
                        .frontier(&self.stack)
                        .tag("visit"),
                );
                self.phase = Phase::Resume;
            }
            Phase::Resume => {
                let Some(frame) = self.frames.last_mut() else {
                    self.phase = Phase::NextRoot;
                    return Flow::Continue;
                };
                let at = frame.vertex;
                if let Some(child) = frame.awaiting.take() {
                    let child_low = self.low(child);
                    let low = self.lower(at, child_low);
                    out.emit(
                        Step::process(format!("Update low[{at}] via DFS child {child}: {low}"))
                            .node(at)
                            .frontier(&self.stack)
                            .tag("child"),
                    );
                    return Flow::Continue;
                }
                let Some(n) = neighbors(&self.adj, at).get(frame.cursor).copied() else {
                    self.frames.pop();
                    self.close(at, out);
                    return Flow::Continue;
                };
                frame.cursor += 1;
                let to = n.to;
                if !self.index.contains_key(&to) {
                    frame.awaiting = Some(to);
                    self.phase = Phase::Enter(to);
                } else if self.on_stack.contains(&to) {
                    let id = self.index.get(&to).copied().unwrap_or(usize::MAX);
                    let low = self.lower(at, id);
                    out.emit(
                        Step::process(format!("Update low[{at}] via back-edge {to}: {low}"))
                            .node(at)
                            .frontier(&self.stack)
                            .tag("back-edge"),
                    );
                }
            }
        }
        Flow::Continue
    }
}
