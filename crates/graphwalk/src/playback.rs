//! Playback controller: owns the graph, the active run and the stepping clock.
//!
//! The controller never sleeps. A host feeds elapsed wall-clock time through
//! [`Controller::advance`], and every full [`Speed::delay`] of accumulated time applies one
//! step while the controller is [`PlaybackState::Running`].

use crate::alg::{self, Algorithm, Endpoints, StepProducer};
use crate::error::{Error, Result};
use crate::render::{Highlights, Renderer};
use crate::step::Step;
use graphwalk_graphlib::{Graph, VertexId};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Running => "running",
            PlaybackState::Paused => "paused",
            PlaybackState::Finished => "finished",
        })
    }
}

/// Playback speed; one step fires every `2000 ms / speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed(f64);

impl Speed {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 100.0;

    /// Clamps into `[MIN, MAX]`. Non-finite and non-positive values are rejected.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidSpeed { value });
        }
        Ok(Self(value.clamp(Self::MIN, Self::MAX)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn delay(self) -> Duration {
        Duration::from_secs_f64(2.0 / self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(2.0)
    }
}

pub struct Controller<R: Renderer> {
    graph: Graph,
    renderer: R,
    algorithm: Algorithm,
    start: Option<VertexId>,
    goal: Option<VertexId>,
    speed: Speed,
    highlights: Highlights,
    producer: Option<Box<dyn StepProducer>>,
    state: PlaybackState,
    pending: Duration,
    applied: usize,
    last: Option<Step>,
}

impl<R: Renderer> Controller<R> {
    pub fn new(graph: Graph, renderer: R) -> Self {
        let highlights = Highlights::new(graph.is_directed());
        Self {
            graph,
            renderer,
            algorithm: Algorithm::default(),
            start: None,
            goal: None,
            speed: Speed::default(),
            highlights,
            producer: None,
            state: PlaybackState::Idle,
            pending: Duration::ZERO,
            applied: 0,
            last: None,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (Graph, R) {
        (self.graph, self.renderer)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Steps applied since the run was instantiated.
    pub fn applied_steps(&self) -> usize {
        self.applied
    }

    /// The most recently applied step of the current run.
    pub fn last_step(&self) -> Option<&Step> {
        self.last.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.producer.is_some()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Selects the algorithm for the next run; an active run is reset.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm != self.algorithm && self.is_active() {
            self.reset();
        }
        self.algorithm = algorithm;
    }

    /// Overrides the start vertex; `None` falls back to the first vertex.
    pub fn set_start(&mut self, start: Option<VertexId>) {
        if start != self.start && self.is_active() {
            self.reset();
        }
        self.start = start;
    }

    /// Overrides the goal vertex; `None` falls back to the last vertex.
    pub fn set_goal(&mut self, goal: Option<VertexId>) {
        if goal != self.goal && self.is_active() {
            self.reset();
        }
        self.goal = goal;
    }

    /// The start/goal pair the next run will use.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            start: self.start,
            goal: self.goal,
        }
        .resolve(&self.graph)
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    pub fn delay(&self) -> Duration {
        self.speed.delay()
    }

    /// Starts automatic playback and applies the first step right away.
    ///
    /// Resumes a paused run; restarts a finished one.
    pub fn start(&mut self) -> Option<Step> {
        match self.state {
            PlaybackState::Running => return None,
            PlaybackState::Finished => self.reset(),
            PlaybackState::Idle | PlaybackState::Paused => {}
        }
        self.ensure_producer();
        self.pending = Duration::ZERO;
        self.state = PlaybackState::Running;
        tracing::debug!(algorithm = %self.algorithm, "playback running");
        self.pull()
    }

    pub fn pause(&mut self) {
        self.pending = Duration::ZERO;
        if self.state == PlaybackState::Running {
            self.state = PlaybackState::Paused;
            tracing::debug!(algorithm = %self.algorithm, "playback paused");
        }
    }

    /// Pulls and applies exactly one step.
    ///
    /// A step from `Idle` instantiates the run first. Returns `None` once the run is finished.
    pub fn step(&mut self) -> Option<Step> {
        if self.state == PlaybackState::Finished {
            return None;
        }
        self.ensure_producer();
        self.state = PlaybackState::Running;
        self.pull()
    }

    /// Discards the active run and clears every highlight.
    pub fn reset(&mut self) {
        self.producer = None;
        self.pending = Duration::ZERO;
        self.applied = 0;
        self.last = None;
        self.state = PlaybackState::Idle;
        self.highlights = Highlights::new(self.graph.is_directed());
        self.renderer.reset_highlights();
        tracing::debug!(algorithm = %self.algorithm, "playback reset");
    }

    /// Feeds elapsed time to the clock; returns how many steps fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if self.state != PlaybackState::Running {
            return 0;
        }
        self.pending += elapsed;
        let delay = self.delay();
        let mut fired = 0;
        while self.state == PlaybackState::Running && self.pending >= delay {
            self.pending -= delay;
            if self.pull().is_some() {
                fired += 1;
            }
        }
        fired
    }

    /// Time left until the next automatic step, `None` unless running.
    pub fn time_to_next_step(&self) -> Option<Duration> {
        (self.state == PlaybackState::Running).then(|| self.delay().saturating_sub(self.pending))
    }

    /// Applies every remaining step of the current (or a new) run.
    pub fn run_to_end(&mut self) -> Vec<Step> {
        std::iter::from_fn(|| self.step()).collect()
    }

    /// Mutates the graph. An active run is reset first and the renderer redraws afterwards.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Graph) -> T) -> T {
        if self.is_active() {
            self.reset();
        }
        let out = f(&mut self.graph);
        self.highlights = Highlights::new(self.graph.is_directed());
        self.renderer.redraw(&self.graph);
        out
    }

    /// Moves a vertex without disturbing the active run.
    pub fn move_vertex(&mut self, id: VertexId, x: f64, y: f64) -> bool {
        let moved = self.graph.move_vertex(id, x, y);
        if moved {
            self.renderer.redraw(&self.graph);
        }
        moved
    }

    fn ensure_producer(&mut self) {
        if self.producer.is_some() {
            return;
        }
        self.renderer.reset_highlights();
        self.highlights = Highlights::new(self.graph.is_directed());
        self.applied = 0;
        self.last = None;
        let endpoints = self.endpoints();
        tracing::debug!(
            algorithm = %self.algorithm,
            start = ?endpoints.start,
            goal = ?endpoints.goal,
            vertices = self.graph.vertex_count(),
            edges = self.graph.edge_count(),
            "instantiating run"
        );
        self.producer = Some(alg::producer(self.algorithm, &self.graph, endpoints));
    }

    fn pull(&mut self) -> Option<Step> {
        let producer = self.producer.as_mut()?;
        let Some(step) = producer.next_step() else {
            self.finish();
            return None;
        };
        let exhausted = producer.is_exhausted();
        tracing::trace!(kind = %step.kind, tag = %step.tag, message = %step.message, "step");
        for command in self.highlights.apply(&step) {
            command.dispatch(&mut self.renderer, &self.graph);
        }
        self.applied += 1;
        self.last = Some(step.clone());
        if exhausted {
            self.finish();
        }
        Some(step)
    }

    fn finish(&mut self) {
        if self.state == PlaybackState::Finished {
            return;
        }
        self.state = PlaybackState::Finished;
        self.pending = Duration::ZERO;
        self.renderer.finished();
        tracing::debug!(algorithm = %self.algorithm, steps = self.applied, "playback finished");
    }
}
