//! Display side of playback: highlight state and the renderer interface.

use crate::step::{DistanceGrid, Distances, Step, StepKind};
use graphwalk_graphlib::{Graph, VertexId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VertexMark {
    Visited,
    InProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMark {
    Examined,
    Accepted,
}

/// Receives the visual effects of playback.
///
/// Every method has an empty default body so a front-end only overrides what it can show.
pub trait Renderer {
    fn reset_highlights(&mut self) {}

    fn highlight_vertex(&mut self, _id: VertexId, _mark: VertexMark) {}

    fn highlight_edge(&mut self, _u: VertexId, _v: VertexId, _mark: EdgeMark) {}

    fn show_frontier(&mut self, _tokens: &[String]) {}

    fn show_matrix(&mut self, _matrix: &[Vec<f64>]) {}

    fn show_distances(&mut self, _distances: &Distances) {}

    fn set_status(&mut self, _message: &str) {}

    fn finished(&mut self) {}

    fn redraw(&mut self, _graph: &Graph) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {}

/// One renderer call, as captured by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum RenderCommand {
    ResetHighlights,
    Vertex {
        id: VertexId,
        mark: VertexMark,
    },
    Edge {
        u: VertexId,
        v: VertexId,
        mark: EdgeMark,
    },
    Frontier {
        tokens: Vec<String>,
    },
    Matrix {
        #[serde(serialize_with = "crate::step::wire::grid")]
        matrix: DistanceGrid,
    },
    Distances {
        #[serde(serialize_with = "crate::step::wire::distances")]
        distances: Distances,
    },
    Status {
        message: String,
    },
    Finished,
    Redraw {
        vertices: usize,
        edges: usize,
    },
}

/// Stores every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<RenderCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn statuses(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Status { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn reset_highlights(&mut self) {
        self.commands.push(RenderCommand::ResetHighlights);
    }

    fn highlight_vertex(&mut self, id: VertexId, mark: VertexMark) {
        self.commands.push(RenderCommand::Vertex { id, mark });
    }

    fn highlight_edge(&mut self, u: VertexId, v: VertexId, mark: EdgeMark) {
        self.commands.push(RenderCommand::Edge { u, v, mark });
    }

    fn show_frontier(&mut self, tokens: &[String]) {
        self.commands.push(RenderCommand::Frontier {
            tokens: tokens.to_vec(),
        });
    }

    fn show_matrix(&mut self, matrix: &[Vec<f64>]) {
        self.commands.push(RenderCommand::Matrix {
            matrix: matrix.to_vec(),
        });
    }

    fn show_distances(&mut self, distances: &Distances) {
        self.commands.push(RenderCommand::Distances {
            distances: distances.clone(),
        });
    }

    fn set_status(&mut self, message: &str) {
        self.commands.push(RenderCommand::Status {
            message: message.to_string(),
        });
    }

    fn finished(&mut self) {
        self.commands.push(RenderCommand::Finished);
    }

    fn redraw(&mut self, graph: &Graph) {
        self.commands.push(RenderCommand::Redraw {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
        });
    }
}

/// Accumulated highlight state of the current run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlights {
    directed: bool,
    pub vertices: BTreeMap<VertexId, VertexMark>,
    pub edges: BTreeMap<(VertexId, VertexId), EdgeMark>,
    pub frontier: Vec<String>,
    pub distances: Option<Distances>,
    pub matrix: Option<DistanceGrid>,
    pub status: String,
}

impl Highlights {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    /// Edge key: ordered pair when directed, `(min, max)` otherwise.
    pub fn edge_key(&self, u: VertexId, v: VertexId) -> (VertexId, VertexId) {
        if self.directed || u <= v {
            (u, v)
        } else {
            (v, u)
        }
    }

    pub fn vertex_mark(&self, v: VertexId) -> Option<VertexMark> {
        self.vertices.get(&v).copied()
    }

    pub fn edge_mark(&self, u: VertexId, v: VertexId) -> Option<EdgeMark> {
        self.edges.get(&self.edge_key(u, v)).copied()
    }

    /// Records the visual effect of `step` and returns the renderer calls it implies.
    ///
    /// `visit` marks its vertex visited, `process` marks it in progress, `explore` marks its
    /// edge examined and `relax` marks its edge accepted (a `relax` with only a vertex marks
    /// the vertex visited). Every step updates the status line.
    pub fn apply(&mut self, step: &Step) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        match (step.kind, step.node, step.edge) {
            (StepKind::Visit, Some(v), _) => {
                self.vertices.insert(v, VertexMark::Visited);
                commands.push(RenderCommand::Vertex {
                    id: v,
                    mark: VertexMark::Visited,
                });
            }
            (StepKind::Process, Some(v), _) => {
                self.vertices.insert(v, VertexMark::InProgress);
                commands.push(RenderCommand::Vertex {
                    id: v,
                    mark: VertexMark::InProgress,
                });
            }
            (StepKind::Explore, _, Some((u, v))) => {
                self.edges.insert(self.edge_key(u, v), EdgeMark::Examined);
                commands.push(RenderCommand::Edge {
                    u,
                    v,
                    mark: EdgeMark::Examined,
                });
            }
            (StepKind::Relax, _, Some((u, v))) => {
                self.edges.insert(self.edge_key(u, v), EdgeMark::Accepted);
                commands.push(RenderCommand::Edge {
                    u,
                    v,
                    mark: EdgeMark::Accepted,
                });
            }
            (StepKind::Relax, Some(v), None) => {
                self.vertices.insert(v, VertexMark::Visited);
                commands.push(RenderCommand::Vertex {
                    id: v,
                    mark: VertexMark::Visited,
                });
            }
            _ => {}
        }
        if let Some(tokens) = &step.frontier {
            self.frontier = tokens.clone();
            commands.push(RenderCommand::Frontier {
                tokens: tokens.clone(),
            });
        }
        if let Some(distances) = &step.distances {
            self.distances = Some(distances.clone());
            commands.push(RenderCommand::Distances {
                distances: distances.clone(),
            });
        }
        if let Some(matrix) = &step.matrix {
            self.matrix = Some(matrix.clone());
            commands.push(RenderCommand::Matrix {
                matrix: matrix.clone(),
            });
        }
        self.status = step.message.clone();
        commands.push(RenderCommand::Status {
            message: step.message.clone(),
        });
        commands
    }
}

impl RenderCommand {
    /// Replays this command on `renderer`.
    pub fn dispatch<R: Renderer + ?Sized>(&self, renderer: &mut R, graph: &Graph) {
        match self {
            RenderCommand::ResetHighlights => renderer.reset_highlights(),
            RenderCommand::Vertex { id, mark } => renderer.highlight_vertex(*id, *mark),
            RenderCommand::Edge { u, v, mark } => renderer.highlight_edge(*u, *v, *mark),
            RenderCommand::Frontier { tokens } => renderer.show_frontier(tokens),
            RenderCommand::Matrix { matrix } => renderer.show_matrix(matrix),
            RenderCommand::Distances { distances } => renderer.show_distances(distances),
            RenderCommand::Status { message } => renderer.set_status(message),
            RenderCommand::Finished => renderer.finished(),
            RenderCommand::Redraw { .. } => renderer.redraw(graph),
        }
    }
}
