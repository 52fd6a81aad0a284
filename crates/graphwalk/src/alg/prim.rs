//! Prim's minimum spanning tree grown from the start vertex.
//!
//! Only the start vertex's component is spanned; on a disconnected graph the total covers
//! that component alone.

use super::{
    Flow, HashMap, HashSet, Outbox, StepMachine, Stepper, neighbors, require_vertices,
    sort_by_priority,
};
use crate::alg::Algorithm;
use crate::step::{Step, format_distance};
use graphwalk_graphlib::{Adjacency, Graph, VertexId};

#[derive(Debug, Clone, Copy)]
enum Phase {
    Init,
    Pop,
    Scan { u: VertexId, next: usize },
}

pub struct Prim {
    adj: Adjacency,
    start: VertexId,
    key: HashMap<VertexId, f64>,
    parent: HashMap<VertexId, VertexId>,
    visited: HashSet<VertexId>,
    frontier: Vec<(VertexId, f64)>,
    total: f64,
    tree: Vec<(VertexId, VertexId)>,
    phase: Phase,
}

impl Prim {
    pub fn start(g: &Graph, start: Option<VertexId>) -> Stepper<Self> {
        match require_vertices(g, &[start]) {
            Ok(v) => Stepper::new(Self {
                key: g
                    .vertex_ids()
                    .into_iter()
                    .map(|id| (id, f64::INFINITY))
                    .collect(),
                adj: g.adjacency(),
                start: v[0],
                parent: HashMap::default(),
                visited: HashSet::default(),
                frontier: Vec::new(),
                total: 0.0,
                tree: Vec::new(),
                phase: Phase::Init,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Tree edges as `(parent, child)`, in acceptance order.
    pub fn mst_edges(&self) -> &[(VertexId, VertexId)] {
        &self.tree
    }

    fn key(&self, v: VertexId) -> f64 {
        self.key.get(&v).copied().unwrap_or(f64::INFINITY)
    }
}

impl StepMachine for Prim {
    const ALGORITHM: Algorithm = Algorithm::Prim;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Init => {
                let s = self.start;
                self.key.insert(s, 0.0);
                self.frontier.push((s, 0.0));
                out.emit(Step::init(format!("Start Prim's from {s}")).node(s).tag("init"));
                self.phase = Phase::Pop;
            }
            Phase::Pop => {
                if self.frontier.is_empty() {
                    out.emit(
                        Step::done(format!(
                            "Prim's MST Complete. Total Cost: {}",
                            format_distance(self.total)
                        ))
                        .tag("done"),
                    );
                    return Flow::Halt;
                }
                sort_by_priority(&mut self.frontier, |(_, k)| *k);
                let (u, k) = self.frontier.remove(0);
                if !self.visited.insert(u) {
                    out.emit(
                        Step::check(format!("Node {u} already visited. Skip."))
                            .node(u)
                            .tag("skip"),
                    );
                    return Flow::Continue;
                }
                self.total += k;
                let cost = format_distance(self.total);
                match self.parent.get(&u).copied() {
                    Some(p) => {
                        self.tree.push((p, u));
                        out.emit(
                            Step::relax(format!("Add edge {p}-{u} to MST. Cost: {cost}"))
                                .edge(p, u)
                                .tag("accept"),
                        );
                    }
                    None => {
                        out.emit(
                            Step::process(format!("Visit {u}. Cost: {cost}"))
                                .node(u)
                                .tag("accept"),
                        );
                    }
                }
                self.phase = Phase::Scan { u, next: 0 };
            }
            Phase::Scan { u, next } => {
                let Some(n) = neighbors(&self.adj, u).get(next).copied() else {
                    self.phase = Phase::Pop;
                    return Flow::Continue;
                };
                let (v, w) = (n.to, n.cost());
                out.emit(
                    Step::explore(format!("Check neighbor {v} (w:{})", format_distance(w)))
                        .edge(u, v)
                        .tag("neighbor"),
                );
                if !self.visited.contains(&v) && w < self.key(v) {
                    self.key.insert(v, w);
                    self.parent.insert(v, u);
                    self.frontier.push((v, w));
                    out.emit(
                        Step::visit(format!("Update {v} dist to {}", format_distance(w)))
                            .node(v)
                            .tag("update"),
                    );
                }
                self.phase = Phase::Scan { u, next: next + 1 };
            }
        }
        Flow::Continue
    }
}
