//! JSON-backed visualizer settings.

use crate::alg::Algorithm;
use crate::error::Result;
use crate::maze;
use crate::playback::{Controller, Speed};
use crate::presets::Preset;
use crate::render::Renderer;
use graphwalk_graphlib::VertexId;
use serde::{Deserialize, Serialize};

/// Canvas width assumed when a preset is loaded from configuration.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Every field is optional; absent fields leave the controller as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<VertexId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<VertexId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maze_seed: Option<u64>,
}

impl VisualizerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fields set in `other` win.
    pub fn merge(mut self, other: VisualizerConfig) -> Self {
        self.algorithm = other.algorithm.or(self.algorithm);
        self.speed = other.speed.or(self.speed);
        self.start = other.start.or(self.start);
        self.goal = other.goal.or(self.goal);
        self.directed = other.directed.or(self.directed);
        self.weighted = other.weighted.or(self.weighted);
        self.grid = other.grid.or(self.grid);
        self.preset = other.preset.or(self.preset);
        self.maze_seed = other.maze_seed.or(self.maze_seed);
        self
    }

    pub fn parsed_algorithm(&self) -> Result<Option<Algorithm>> {
        self.algorithm.as_deref().map(str::parse::<Algorithm>).transpose()
    }

    pub fn parsed_preset(&self) -> Result<Option<Preset>> {
        self.preset.as_deref().map(str::parse::<Preset>).transpose()
    }

    /// Configures `controller`.
    ///
    /// Order: preset, then mode flags, then maze carving, then algorithm and playback
    /// settings. Graph changes are staged on a copy, so an error leaves the controller as it
    /// was.
    pub fn apply_to<R: Renderer>(&self, controller: &mut Controller<R>) -> Result<()> {
        let algorithm = self.parsed_algorithm()?;
        let preset = self.parsed_preset()?;
        let speed = self.speed.map(Speed::new).transpose()?;

        let touches_graph = preset.is_some()
            || self.directed.is_some()
            || self.weighted.is_some()
            || self.grid.is_some()
            || self.maze_seed.is_some();
        if touches_graph {
            let mut staged = controller.graph().clone();
            if let Some(preset) = preset {
                preset.load(&mut staged, DEFAULT_CANVAS_WIDTH);
            }
            let mut options = staged.options();
            options.directed = self.directed.unwrap_or(options.directed);
            options.weighted = self.weighted.unwrap_or(options.weighted);
            options.grid = self.grid.unwrap_or(options.grid);
            staged.set_options(options);
            if let Some(seed) = self.maze_seed {
                maze::carve_seeded(&mut staged, seed)?;
            }
            controller.edit(|g| *g = staged);
        }
        if let Some(algorithm) = algorithm {
            controller.set_algorithm(algorithm);
        }
        if let Some(speed) = speed {
            controller.set_speed(speed);
        }
        if self.start.is_some() {
            controller.set_start(self.start);
        }
        if self.goal.is_some() {
            controller.set_goal(self.goal);
        }
        Ok(())
    }
}
