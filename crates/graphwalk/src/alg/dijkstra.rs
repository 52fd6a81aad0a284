//! Dijkstra's shortest paths with a sort-on-pop frontier.
//!
//! The frontier is a plain vector stable-sorted by tentative distance before every pop, so
//! ties are broken by insertion order. Stale entries are popped and reported, then skipped.
//! A vertex is settled once, on its first pop, and is never relaxed again afterwards, so a
//! negative edge cannot keep the frontier alive.

use super::{
    Flow, HashMap, HashSet, Outbox, StepMachine, Stepper, neighbors, require_vertices, sort_by_priority,
};
use crate::alg::Algorithm;
use crate::step::{Distances, Step, format_distance};
use graphwalk_graphlib::{Adjacency, Graph, VertexId};

#[derive(Debug, Clone, Copy)]
enum Phase {
    Init,
    Pop,
    Scan { u: VertexId, d: f64, next: usize },
}

pub struct Dijkstra {
    adj: Adjacency,
    start: VertexId,
    dist: Distances,
    prev: HashMap<VertexId, VertexId>,
    settled: HashSet<VertexId>,
    frontier: Vec<(VertexId, f64)>,
    phase: Phase,
}

impl Dijkstra {
    pub fn start(g: &Graph, start: Option<VertexId>) -> Stepper<Self> {
        match require_vertices(g, &[start]) {
            Ok(v) => Stepper::new(Self {
                dist: g.vertex_ids().into_iter().map(|id| (id, f64::INFINITY)).collect(),
                adj: g.adjacency(),
                start: v[0],
                prev: HashMap::default(),
                settled: HashSet::default(),
                frontier: Vec::new(),
                phase: Phase::Init,
            }),
            Err(message) => Stepper::rejected(message),
        }
    }

    pub fn distances(&self) -> &Distances {
        &self.dist
    }

    /// Shortest path from the start vertex to `target`, if one has been found so far.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.dist.get(&target).is_some_and(|d| d.is_finite()) {
            return None;
        }
        let mut path = vec![target];
        let mut cur = target;
        while cur != self.start {
            let Some(&p) = self.prev.get(&cur) else {
                break;
            };
            path.push(p);
            cur = p;
        }
        path.reverse();
        (path.first() == Some(&self.start)).then_some(path)
    }

    fn frontier_tokens(&self) -> Vec<String> {
        self.frontier
            .iter()
            .map(|(v, d)| format!("{v}({})", format_distance(*d)))
            .collect()
    }

    fn distance(&self, v: VertexId) -> f64 {
        self.dist.get(&v).copied().unwrap_or(f64::INFINITY)
    }
}

impl StepMachine for Dijkstra {
    const ALGORITHM: Algorithm = Algorithm::Dijkstra;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Init => {
                let s = self.start;
                self.dist.insert(s, 0.0);
                self.frontier.push((s, 0.0));
                out.emit(
                    Step::init(format!("Initialize distances. Start: {s}"))
                        .distances(&self.dist)
                        .frontier(self.frontier_tokens())
                        .tag("init"),
                );
                self.phase = Phase::Pop;
            }
            Phase::Pop => {
                if self.frontier.is_empty() {
                    out.emit(
                        Step::done("Shortest paths calculated")
                            .distances(&self.dist)
                            .tag("done"),
                    );
                    return Flow::Halt;
                }
                sort_by_priority(&mut self.frontier, |(_, d)| *d);
                let (u, d) = self.frontier.remove(0);
                out.emit(
                    Step::process(format!(
                        "Processing node {u} (dist: {})",
                        format_distance(d)
                    ))
                    .node(u)
                    .distances(&self.dist)
                    .frontier(self.frontier_tokens())
                    .tag("pop"),
                );
                if d <= self.distance(u) && self.settled.insert(u) {
                    self.phase = Phase::Scan { u, d, next: 0 };
                }
            }
            Phase::Scan { u, d, next } => {
                let Some(n) = neighbors(&self.adj, u).get(next).copied() else {
                    self.phase = Phase::Pop;
                    return Flow::Continue;
                };
                let v = n.to;
                let alt = d + n.cost();
                if !self.settled.contains(&v) && alt < self.distance(v) {
                    self.dist.insert(v, alt);
                    self.prev.insert(v, u);
                    self.frontier.push((v, alt));
                    out.emit(
                        Step::relax(format!(
                            "Relaxing edge {u}->{v}. New dist: {}",
                            format_distance(alt)
                        ))
                        .edge(u, v)
                        .distances(&self.dist)
                        .frontier(self.frontier_tokens())
                        .tag("relax"),
                    );
                }
                self.phase = Phase::Scan { u, d, next: next + 1 };
            }
        }
        Flow::Continue
    }
}
