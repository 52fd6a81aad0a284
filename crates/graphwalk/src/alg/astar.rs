//! A* search guided by the Manhattan distance between vertex positions.
//!
//! Wall cells are never entered unless they are the start or the goal. When the goal is popped
//! the path is replayed backwards, one `relax` step per edge, before the terminal step.

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
    Reconstruct(VertexId),
}

pub struct AStar {
    adj: Adjacency,
    start: VertexId,
    goal: VertexId,
    positions: HashMap<VertexId, (f64, f64)>,
    walls: HashSet<VertexId>,
    g_score: HashMap<VertexId, f64>,
    came_from: HashMap<VertexId, VertexId>,
    open: Vec<(VertexId, f64)>,
    path: Option<Vec<VertexId>>,
    phase: Phase,
}

impl AStar {
    pub fn start(g: &Graph, start: Option<VertexId>, goal: Option<VertexId>) -> Stepper<Self> {
        let (start, goal) = match require_vertices(g, &[start, goal]) {
            Ok(v) => (v[0], v[1]),
            Err(message) => return Stepper::rejected(message),
        };
        Stepper::new(Self {
            adj: g.adjacency(),
            start,
            goal,
            positions: g.vertices().iter().map(|v| (v.id, (v.x, v.y))).collect(),
            walls: g
                .vertices()
                .iter()
                .filter(|v| v.is_wall)
                .map(|v| v.id)
                .collect(),
            g_score: HashMap::default(),
            came_from: HashMap::default(),
            open: Vec::new(),
            path: None,
            phase: Phase::Init,
        })
    }

    /// Start-to-goal path once the goal has been reached.
    pub fn path(&self) -> Option<&[VertexId]> {
        self.path.as_deref()
    }

    fn position(&self, v: VertexId) -> (f64, f64) {
        self.positions.get(&v).copied().unwrap_or_default()
    }

    fn heuristic(&self, v: VertexId) -> f64 {
        let (ax, ay) = self.position(v);
        let (bx, by) = self.position(self.goal);
        (ax - bx).abs() + (ay - by).abs()
    }

    fn g_score(&self, v: VertexId) -> f64 {
        self.g_score.get(&v).copied().unwrap_or(f64::INFINITY)
    }

    fn passable(&self, v: VertexId) -> bool {
        v == self.start || v == self.goal || !self.walls.contains(&v)
    }
}

fn coords((x, y): (f64, f64)) -> String {
    format!("({},{})", format_distance(x), format_distance(y))
}

impl StepMachine for AStar {
    const ALGORITHM: Algorithm = Algorithm::AStar;

    fn advance(&mut self, out: &mut Outbox) -> Flow {
        match self.phase {
            Phase::Init => {
                self.g_score.insert(self.start, 0.0);
                self.open.push((self.start, 0.0));
                out.emit(
                    Step::init(format!(
                        "Start A* from {} to {}",
                        coords(self.position(self.start)),
                        coords(self.position(self.goal))
                    ))
                    .node(self.start)
                    .tag("init"),
                );
                self.phase = Phase::Pop;
            }
            Phase::Pop => {
                if self.open.is_empty() {
                    out.emit(Step::done("No Path Found").tag("no-path"));
                    return Flow::Halt;
                }
                sort_by_priority(&mut self.open, |(_, f)| *f);
                let (u, _) = self.open.remove(0);
                if u == self.goal {
                    self.path = Some(vec![u]);
                    self.phase = Phase::Reconstruct(u);
                    return Flow::Continue;
                }
                out.emit(
                    Step::process(format!("Visit {}", coords(self.position(u))))
                        .node(u)
                        .tag("visit"),
                );
                self.phase = Phase::Scan { u, next: 0 };
            }
            Phase::Scan { u, next } => {
                let Some(n) = neighbors(&self.adj, u).get(next).copied() else {
                    self.phase = Phase::Pop;
                    return Flow::Continue;
                };
                self.phase = Phase::Scan { u, next: next + 1 };
                let v = n.to;
                if !self.passable(v) {
                    return Flow::Continue;
                }
                let tentative = self.g_score(u) + n.cost();
                if tentative < self.g_score(v) {
                    self.came_from.insert(v, u);
                    self.g_score.insert(v, tentative);
                    let f = tentative + self.heuristic(v);
                    self.open.push((v, f));
                    out.emit(
                        Step::visit(format!("Update neighbor. f={}", format_distance(f)))
                            .node(v)
                            .tag("update"),
                    );
                }
            }
            Phase::Reconstruct(cur) => {
                let Some(&prev) = self.came_from.get(&cur).filter(|_| cur != self.start) else {
                    if let Some(path) = self.path.as_mut() {
                        path.reverse();
                    }
                    out.emit(Step::done("Path Found!").tag("found"));
                    return Flow::Halt;
                };
                if let Some(path) = self.path.as_mut() {
                    path.push(prev);
                }
                out.emit(
                    Step::relax("Reconstructing Path")
                        .edge(prev, cur)
                        .tag("reconstruct"),
                );
                self.phase = Phase::Reconstruct(prev);
            }
        }
        Flow::Continue
    }
}
