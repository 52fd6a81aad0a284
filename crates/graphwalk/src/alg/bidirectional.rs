//! Bidirectional breadth-first search.
//!
//! The two sides take turns expanding one vertex each. On a directed graph the backward side
//! follows arcs in reverse, so a meeting always joins a real start-to-goal path. The run stops
//! at the first neighbor already reached by the other side.

use super::{Flow, HashMap, HashSet, Outbox, StepMachine, Stepper, neighbors, require_vertices};
use crate::alg::Algorithm;
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, Neighbor, VertexId};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Forward,
    Backward,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Forward => "Forward",
            Side::Backward => "Backward",
        }
    }

    fn other(self) -> Self {
        match self {
            Side::Forward => Side::Backward,
            Side::Backward => Side::Forward,
        }
    }
}

#[derive(Debug, Default)]
struct Frontier {
    queue: VecDeque<VertexId>,
    visited: HashSet<VertexId>,
    parent: HashMap<VertexId, VertexId>,
}

impl Frontier {
    fn seeded(root: VertexId) -> Self {
        let mut frontier = Self::default();
        frontier.queue.push_back(root);
        frontier.visited.insert(root);
        frontier
    }

    /// `v` followed by its parents back to this side's root.
    fn chain(&self, v: VertexId) -> Vec<VertexId> {
        let mut out = vec![v];
        let mut cur = v;
        while let Some(&p) = self.parent.get(&cur) {
            if out.len() > self.visited.len() {
                break;
            }
            out.push(p);
            cur = p;
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Init,
    Pop(Side),
    Scan { side: Side, u: VertexId, next: usize },
}

pub struct Bidirectional {
    forward_adj: Adjacency,
    backward_adj: Adjacency,
    start: VertexId,
    goal: VertexId,
    walls: HashSet<VertexId>,
    forward: Frontier,
    backward: Frontier,
    meeting: Option<VertexId>,
    path: Option<Vec<VertexId>>,
    phase: Phase,
}

impl Bidirectional {
    pub fn start(g: &Graph, start: Option<VertexId>, goal: Option<VertexId>) -> Stepper<Self> {
        let (start, goal) = match require_vertices(g, &[start, goal]) {
            Ok(v) => (v[0], v[1]),
            Err(message) => return Stepper::rejected(message),
        };
        let forward_adj = g.adjacency();
        let backward_adj = if g.is_directed() {
            reversed(&forward_adj)
        } else {
            forward_adj.clone()
        };
        Stepper::new(Self {
            forward_adj,
            backward_adj,
            start,
            goal,
            walls: g
                .vertices()
                .iter()
                .filter(|v| v.is_wall)
                .map(|v| v.id)
                .collect(),
            forward: Frontier::seeded(start),
            backward: Frontier::seeded(goal),
            meeting: None,
            path: None,
            phase: Phase::Init,
        })
    }

    /// The vertex where the two searches touched.
    pub fn meeting_point(&self) -> Option<VertexId> {
        self.meeting
    }

    /// The start-to-goal path through the meeting point.
    pub fn path(&self) -> Option<&[VertexId]> {
        self.path.as_deref()
    }

    fn side(&self, side: Side) -> &Frontier {
        match side {
            Side::Forward => &self.forward,
            Side::Backward => &self.backward,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Frontier {
        match side {
            Side::Forward => &mut self.forward,
            Side::Backward => &mut self.backward,
        }
    }

    fn adjacency(&self, side: Side) -> &Adjacency {
        match side {
            Side::Forward => &self.forward_adj,
            Side::Backward => &self.backward_adj,
        }
    }

    fn passable(&self, v: VertexId) -> bool {
        v == self.start || v == self.goal || !self.walls.contains(&v)
    }

    /// Records the path for a meeting across the edge `u -> v`, where `u` belongs to `side`.
    fn join(&mut self, side: Side, u: VertexId, v: VertexId) {
        let (near, far) = match side {
            Side::Forward => (u, v),
            Side::Backward => (v, u),
        };
        let mut path = self.forward.chain(near);
        path.reverse();
        path.extend(self.backward.chain(far));
        self.meeting = Some(v);
        self.path = Some(path);
    }
}

fn reversed(adj: &Adjacency) -> Adjacency {
    let mut out: Adjacency = adj.keys().map(|&v| (v, Vec::new())).collect();
    for (&u, list) in adj {
        for n in list {
            if let Some(back) = out.get_mut(&n.to) {
                back.push(Neighbor {
                    to: u,
                    weight: n.weight,
                });
            }
        }
    }
    out
}

impl StepMachine for Bidirectional {
    const ALGORITHM: Algorithm = Algorithm::Bidirectional;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Init => {
                let (s, t) = (self.start, self.goal);
                out.emit(
                    Step::init(format!("Start Bidirectional Search from {s} and {t}"))
                        .node(s)
                        .tag("init"),
                );
                if s == t {
                    self.meeting = Some(s);
                    self.path = Some(vec![s]);
                    out.emit(Step::done("Path Found!").node(s).tag("found"));
                    return Flow::Halt;
                }
                self.phase = Phase::Pop(Side::Forward);
            }
            Phase::Pop(side) => {
                if side == Side::Forward
                    && (self.forward.queue.is_empty() || self.backward.queue.is_empty())
                {
                    out.emit(Step::done("No Path Found").tag("no-path"));
                    return Flow::Halt;
                }
                let Some(u) = self.side_mut(side).queue.pop_front() else {
                    self.phase = Phase::Pop(side.other());
                    return Flow::Continue;
                };
                let label = side.label();
                out.emit(
                    Step::process(format!("{label} Search: Visit {u}"))
                        .node(u)
                        .frontier(&self.side(side).queue)
                        .tag("expand"),
                );
                self.phase = Phase::Scan { side, u, next: 0 };
            }
            Phase::Scan { side, u, next } => {
                let Some(n) = neighbors(self.adjacency(side), u).get(next).copied() else {
                    self.phase = Phase::Pop(side.other());
                    return Flow::Continue;
                };
                self.phase = Phase::Scan {
                    side,
                    u,
                    next: next + 1,
                };
                let v = n.to;
                if !self.passable(v) {
                    return Flow::Continue;
                }
                if self.side(side.other()).visited.contains(&v) {
                    self.join(side, u, v);
                    out.emit(
                        Step::relax(format!("Meeting Point Found at {v}!"))
                            .node(v)
                            .edge(u, v)
                            .tag("meet"),
                    );
                    out.emit(Step::done("Path Found!").tag("found"));
                    return Flow::Halt;
                }
                let frontier = self.side_mut(side);
                if frontier.visited.insert(v) {
                    frontier.parent.insert(v, u);
                    frontier.queue.push_back(v);
                    out.emit(
                        Step::visit(format!("{}: Enqueue {v}", side.label()))
                            .node(v)
                            .edge(u, v)
                            .frontier(&frontier.queue)
                            .tag("enqueue"),
                    );
                }
            }
        }
        Flow::Continue
    }
}
