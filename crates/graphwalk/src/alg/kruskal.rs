//! Kruskal's minimum spanning tree over a stable weight-sorted edge list.

use super::{Flow, HashMap, Outbox, StepMachine, Stepper, require_vertices, sort_by_priority};
use crate::alg::Algorithm;
use crate::step::{Step, format_distance};
use graphwalk_graphlib::{Edge, Graph, VertexId};

/// Union-find with path compression.
#[derive(Debug, Default)]
struct DisjointSet {
    parent: HashMap<VertexId, VertexId>,
}

impl DisjointSet {
    fn find(&mut self, v: VertexId) -> VertexId {
        let mut root = v;
        while let Some(&p) = self.parent.get(&root) {
            if p == root {
                break;
            }
            root = p;
        }
        let mut cur = v;
        while cur != root {
            let next = self.parent.get(&cur).copied().unwrap_or(root);
            self.parent.insert(cur, root);
            cur = next;
        }
        root
    }

    /// Returns `false` when both ends already share a root.
    fn union(&mut self, a: VertexId, b: VertexId) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent.insert(ra, rb);
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Begin,
    Consider(usize),
}

pub struct Kruskal {
    edges: Vec<Edge>,
    sets: DisjointSet,
    total: f64,
    accepted: Vec<Edge>,
    phase: Phase,
}

impl Kruskal {
    pub fn start(g: &Graph) -> Stepper<Self> {
        match require_vertices(g, &[]) {
            Ok(_) => {
                let mut edges = g.edges().to_vec();
                sort_by_priority(&mut edges, Edge::cost);
                let sets = DisjointSet {
                    parent: g.vertex_ids().into_iter().map(|v| (v, v)).collect(),
                };
                Stepper::new(Self {
                    edges,
                    sets,
                    total: 0.0,
                    accepted: Vec::new(),
                    phase: Phase::Begin,
                })
            }
            Err(message) => Stepper::rejected(message),
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Accepted edges, in acceptance order.
    pub fn mst_edges(&self) -> &[Edge] {
        &self.accepted
    }
}

impl StepMachine for Kruskal {
    const ALGORITHM: Algorithm = Algorithm::Kruskal;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Begin => {
                out.emit(Step::init("Sort edges by weight").tag("sort"));
                self.phase = Phase::Consider(0);
            }
            Phase::Consider(i) => {
                let Some(edge) = self.edges.get(i).cloned() else {
                    out.emit(
                        Step::done(format!("MST Complete. Cost: {}", format_distance(self.total)))
                            .tag("done"),
                    );
                    return Flow::Halt;
                };
                let (u, v) = (edge.source, edge.target);
                out.emit(
                    Step::explore(format!(
                        "Check edge {u}-{v} (w:{})",
                        format_distance(edge.cost())
                    ))
                    .edge(u, v)
                    .tag("edge"),
                );
                if self.sets.union(u, v) {
                    self.total += edge.cost();
                    self.accepted.push(edge);
                    out.emit(
                        Step::relax(format!("Add to MST. Total: {}", format_distance(self.total)))
                            .edge(u, v)
                            .tag("accept"),
                    );
                } else {
                    out.emit(Step::process("Cycle detected. Skip.").edge(u, v).tag("skip"));
                }
                self.phase = Phase::Consider(i + 1);
            }
        }
        Flow::Continue
    }
}
