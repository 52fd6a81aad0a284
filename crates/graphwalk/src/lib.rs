#![forbid(unsafe_code)]

//! Step-by-step graph algorithm playback.
//!
//! An algorithm run is a lazy stream of [`Step`]s produced from a snapshot of a
//! [`graphwalk_graphlib::Graph`]. The [`Controller`] pulls steps one at a time (manually or
//! on a host-driven clock) and turns them into highlight commands for a [`Renderer`].

pub mod alg;
pub mod config;
pub mod edges;
pub mod error;
pub mod maze;
pub mod playback;
pub mod presets;
pub mod render;
pub mod repr;
pub mod step;

pub use alg::{Algorithm, Endpoints, StepProducer, producer};
pub use config::VisualizerConfig;
pub use edges::EdgeSpec;
pub use error::{Error, Result};
pub use graphwalk_graphlib as graphlib;
pub use playback::{Controller, PlaybackState, Speed};
pub use presets::Preset;
pub use render::{
    EdgeMark, Highlights, NullRenderer, RecordingRenderer, RenderCommand, Renderer, VertexMark,
};
pub use step::{Step, StepKind};

use graphwalk_graphlib::Graph;

/// Drains a fresh run of `algorithm` on `g`.
pub fn trace(algorithm: Algorithm, g: &Graph, endpoints: Endpoints) -> Vec<Step> {
    let mut producer = producer(algorithm, g, endpoints);
    std::iter::from_fn(|| producer.next_step()).collect()
}
