//! Connected components: an outer scan in id order with an inner BFS per new component.

use super::{Flow, HashMap, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, VertexId};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
enum Phase {
    Begin,
    Outer(usize),
    Drain { resume_at: usize },
}

pub struct Components {
    adj: Adjacency,
    vertices: Vec<VertexId>,
    component_of: HashMap<VertexId, usize>,
    queue: VecDeque<VertexId>,
    count: usize,
    phase: Phase,
}

impl Components {
    pub fn start(g: &Graph) -> Stepper<Self> {
        match require_vertices(g, &[]) {
            Ok(_) => Stepper::new(Self {
                adj: g.adjacency(),
                vertices: g.vertex_ids(),
                component_of: HashMap::default(),
                queue: VecDeque::new(),
                count: 0,
                phase: Phase::Begin,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// 1-based component number of `v`, once it has been reached.
    pub fn component_of(&self, v: VertexId) -> Option<usize> {
        self.component_of.get(&v).copied()
    }

    /// Members of each component found so far, in vertex insertion order.
    pub fn groups(&self) -> Vec<Vec<VertexId>> {
        let mut groups = vec![Vec::new(); self.count];
        for v in &self.vertices {
            if let Some(&c) = self.component_of.get(v) {
                groups[c - 1].push(*v);
            }
        }
        groups
    }
}

impl StepMachine for Components {
    const ALGORITHM: Algorithm = Algorithm::Components;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Begin => {
                out.emit(Step::init("Start Connected Components").tag("init"));
                self.phase = Phase::Outer(0);
            }
            Phase::Outer(i) => {
                let Some(&v) = self.vertices.get(i) else {
                    out.emit(
                        Step::done(format!("Found {} connected components", self.count))
                            .tag("done"),
                    );
                    return Flow::Halt;
                };
                out.emit(Step::check(format!("Check node {v}")).node(v).tag("outer"));
                if self.component_of.contains_key(&v) {
                    self.phase = Phase::Outer(i + 1);
                } else {
                    self.count += 1;
                    self.component_of.insert(v, self.count);
                    self.queue.push_back(v);
                    out.emit(
                        Step::process(format!("New Component #{} found at {v}", self.count))
                            .node(v)
                            .tag("new-component"),
                    );
                    self.phase = Phase::Drain { resume_at: i + 1 };
                }
            }
            Phase::Drain { resume_at } => {
                let Some(u) = self.queue.pop_front() else {
                    self.phase = Phase::Outer(resume_at);
                    return Flow::Continue;
                };
                for n in neighbors(&self.adj, u) {
                    let v = n.to;
                    if self.component_of.contains_key(&v) {
                        continue;
                    }
                    self.component_of.insert(v, self.count);
                    self.queue.push_back(v);
                    out.emit(
                        Step::visit(format!("Mark {v} as part of Component #{}", self.count))
                            .node(v)
                            .edge(u, v)
                            .tag("mark"),
                    );
                }
            }
        }
        Flow::Continue
    }
}
