//! The algorithm engine.
//!
//! Every algorithm is a [`StepMachine`]: an explicit state machine that performs one
//! transition per [`advance`](StepMachine::advance) call and emits the resulting steps into
//! an [`Outbox`]. [`Stepper`] wraps a machine into a lazy, fused [`StepProducer`].
//!
//! Machines snapshot the parts of the graph they need when constructed (adjacency, vertex
//! order, edge list), so a producer never borrows the live [`Graph`] and is discarded, not
//! rewound, when a run is abandoned.

use crate::error::{Error, Result};
use crate::step::Step;
use graphwalk_graphlib::{Adjacency, Graph, Neighbor, VertexId};
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

pub mod astar;
pub mod bellman_ford;
pub mod bfs;
pub mod bidirectional;
pub mod bipartite;
pub mod components;
pub mod cycle;
pub mod dfs;
pub mod dijkstra;
pub mod floyd_warshall;
pub mod kruskal;
pub mod prim;
pub mod tarjan;
pub mod topological;

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
pub(crate) type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    Topological,
    Components,
    Cycle,
    Bipartite,
    Kruskal,
    Prim,
    Tarjan,
    BellmanFord,
    FloydWarshall,
    AStar,
    Bidirectional,
}

impl Algorithm {
    pub const ALL: [Algorithm; 14] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::Topological,
        Algorithm::Components,
        Algorithm::Cycle,
        Algorithm::Bipartite,
        Algorithm::Kruskal,
        Algorithm::Prim,
        Algorithm::Tarjan,
        Algorithm::BellmanFord,
        Algorithm::FloydWarshall,
        Algorithm::AStar,
        Algorithm::Bidirectional,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Topological => "topological",
            Algorithm::Components => "components",
            Algorithm::Cycle => "cycle",
            Algorithm::Bipartite => "bipartite",
            Algorithm::Kruskal => "kruskal",
            Algorithm::Prim => "prim",
            Algorithm::Tarjan => "tarjan",
            Algorithm::BellmanFord => "bellman-ford",
            Algorithm::FloydWarshall => "floyd-warshall",
            Algorithm::AStar => "astar",
            Algorithm::Bidirectional => "bidirectional",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-first search",
            Algorithm::Dfs => "Depth-first search",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Topological => "Topological sort (Kahn)",
            Algorithm::Components => "Connected components",
            Algorithm::Cycle => "Cycle detection",
            Algorithm::Bipartite => "Bipartite check",
            Algorithm::Kruskal => "Kruskal MST",
            Algorithm::Prim => "Prim MST",
            Algorithm::Tarjan => "Tarjan SCC",
            Algorithm::BellmanFord => "Bellman-Ford",
            Algorithm::FloydWarshall => "Floyd-Warshall",
            Algorithm::AStar => "A*",
            Algorithm::Bidirectional => "Bidirectional search",
        }
    }

    pub fn needs_start(self) -> bool {
        matches!(
            self,
            Algorithm::Bfs
                | Algorithm::Dfs
                | Algorithm::Dijkstra
                | Algorithm::Prim
                | Algorithm::BellmanFord
                | Algorithm::AStar
                | Algorithm::Bidirectional
        )
    }

    pub fn needs_goal(self) -> bool {
        matches!(self, Algorithm::AStar | Algorithm::Bidirectional)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let algorithm = match key.as_str() {
            "bfs" => Algorithm::Bfs,
            "dfs" => Algorithm::Dfs,
            "dijkstra" => Algorithm::Dijkstra,
            "topological" | "topo" | "kahn" => Algorithm::Topological,
            "components" => Algorithm::Components,
            "cycle" => Algorithm::Cycle,
            "bipartite" => Algorithm::Bipartite,
            "kruskal" => Algorithm::Kruskal,
            "prim" | "prims" => Algorithm::Prim,
            "tarjan" | "scc" => Algorithm::Tarjan,
            "bellman-ford" | "bellman" => Algorithm::BellmanFord,
            "floyd-warshall" | "floyd" => Algorithm::FloydWarshall,
            "astar" | "a*" => Algorithm::AStar,
            "bidirectional" => Algorithm::Bidirectional,
            _ => {
                return Err(Error::UnknownAlgorithm {
                    name: s.to_string(),
                });
            }
        };
        Ok(algorithm)
    }
}

/// A suspendable source of [`Step`]s.
///
/// `next_step` returns `None` once the run is exhausted and keeps returning `None` on every
/// later call.
pub trait StepProducer {
    fn algorithm(&self) -> Algorithm;

    fn next_step(&mut self) -> Option<Step>;

    fn is_exhausted(&self) -> bool;
}

/// Pending steps produced by one transition.
#[derive(Debug, Default)]
pub struct Outbox {
    steps: VecDeque<Step>,
}

impl Outbox {
    pub fn emit(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    fn pop(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Whether a machine has further transitions after the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

pub trait StepMachine {
    const ALGORITHM: Algorithm;

    /// Performs one transition. Must eventually return [`Flow::Halt`].
    fn advance(&mut self, out: &mut Outbox) -> Flow;
}

/// Drives a [`StepMachine`] lazily, one transition at a time.
pub struct Stepper<M> {
    machine: Option<M>,
    outbox: Outbox,
    halted: bool,
    algorithm: Algorithm,
}

impl<M: StepMachine> Stepper<M> {
    pub fn new(machine: M) -> Self {
        Self {
            machine: Some(machine),
            outbox: Outbox::default(),
            halted: false,
            algorithm: M::ALGORITHM,
        }
    }

    /// A producer that emits a single terminal step explaining why the run cannot start.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message = message.into();
        let algorithm = M::ALGORITHM;
        tracing::debug!(%algorithm, %message, "precondition failed");
        let mut outbox = Outbox::default();
        outbox.emit(Step::done(message).tag("precondition"));
        Self {
            machine: None,
            outbox,
            halted: true,
            algorithm,
        }
    }

    /// The underlying machine, `None` for rejected runs.
    pub fn machine(&self) -> Option<&M> {
        self.machine.as_ref()
    }

    /// Pulls every remaining step.
    pub fn drain(&mut self) -> Vec<Step> {
        std::iter::from_fn(|| self.next_step()).collect()
    }
}

impl<M: StepMachine> StepProducer for Stepper<M> {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn next_step(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.outbox.pop() {
                return Some(step);
            }
            if self.halted {
                return None;
            }
            let Some(machine) = self.machine.as_mut() else {
                self.halted = true;
                return None;
            };
            if machine.advance(&mut self.outbox) == Flow::Halt {
                self.halted = true;
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.halted && self.outbox.is_empty()
    }
}

impl<M: StepMachine> Iterator for Stepper<M> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.next_step()
    }
}

impl<M: StepMachine> FusedIterator for Stepper<M> {}

/// Start/goal inputs for [`producer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub start: Option<VertexId>,
    pub goal: Option<VertexId>,
}

impl Endpoints {
    /// Explicit choices, falling back to the first and last vertex in insertion order.
    pub fn resolve(self, g: &Graph) -> Self {
        Self {
            start: self.start.or_else(|| g.first_vertex().map(|v| v.id)),
            goal: self.goal.or_else(|| g.last_vertex().map(|v| v.id)),
        }
    }
}

pub(crate) fn neighbors(adj: &Adjacency, v: VertexId) -> &[Neighbor] {
    adj.get(&v).map(Vec::as_slice).unwrap_or(&[])
}

/// Stable ascending sort on an `f64` key; equal keys keep insertion order.
pub(crate) fn sort_by_priority<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(a).total_cmp(&key(b)));
}

/// Checks the inputs every algorithm shares; the error string becomes the terminal message.
pub(crate) fn require_vertices(
    g: &Graph,
    vertices: &[Option<VertexId>],
) -> std::result::Result<Vec<VertexId>, String> {
    if g.is_empty() {
        return Err("Graph is empty. Nothing to run.".to_string());
    }
    let mut out = Vec::with_capacity(vertices.len());
    for v in vertices {
        match v {
            Some(id) if g.has_vertex(*id) => out.push(*id),
            Some(id) => return Err(format!("Vertex {id} is not in the graph.")),
            None => return Err("No start vertex selected.".to_string()),
        }
    }
    Ok(out)
}

/// Builds the producer for `algorithm`, bound to a snapshot of `g`.
pub fn producer(algorithm: Algorithm, g: &Graph, endpoints: Endpoints) -> Box<dyn StepProducer> {
    let Endpoints { start, goal } = endpoints.resolve(g);
    match algorithm {
        Algorithm::Bfs => Box::new(bfs::Bfs::start(g, start)),
        Algorithm::Dfs => Box::new(dfs::Dfs::start(g, start)),
        Algorithm::Dijkstra => Box::new(dijkstra::Dijkstra::start(g, start)),
        Algorithm::Topological => Box::new(topological::Kahn::start(g)),
        Algorithm::Components => Box::new(components::Components::start(g)),
        Algorithm::Cycle => Box::new(cycle::CycleDetection::start(g)),
        Algorithm::Bipartite => Box::new(bipartite::Bipartite::start(g)),
        Algorithm::Kruskal => Box::new(kruskal::Kruskal::start(g)),
        Algorithm::Prim => Box::new(prim::Prim::start(g, start)),
        Algorithm::Tarjan => Box::new(tarjan::Tarjan::start(g)),
        Algorithm::BellmanFord => Box::new(bellman_ford::BellmanFord::start(g, start)),
        Algorithm::FloydWarshall => Box::new(floyd_warshall::FloydWarshall::start(g)),
        Algorithm::AStar => Box::new(astar::AStar::start(g, start, goal)),
        Algorithm::Bidirectional => {
            Box::new(bidirectional::Bidirectional::start(g, start, goal))
        }
    }
}
