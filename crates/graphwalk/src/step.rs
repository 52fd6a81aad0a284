//! The step-trace protocol shared by every algorithm.

use graphwalk_graphlib::VertexId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Distance map payload, ordered by vertex id.
pub type Distances = BTreeMap<VertexId, f64>;

/// Row-major all-pairs distance grid, indexed by vertex insertion order.
pub type DistanceGrid = Vec<Vec<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// One-time setup complete.
    Init,
    /// A vertex (or the edge leading to it) entered the frontier or was discovered.
    Visit,
    /// A loop guard was evaluated.
    Check,
    /// A vertex was dequeued or finalized; also used for early-exit findings.
    Process,
    /// An edge is being examined.
    Explore,
    /// An improvement or acceptance: distance update, MST edge, path segment.
    Relax,
    /// A depth-first frame returned.
    Backtrack,
    /// Terminal.
    Done,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Init => "init",
            StepKind::Visit => "visit",
            StepKind::Check => "check",
            StepKind::Process => "process",
            StepKind::Explore => "explore",
            StepKind::Relax => "relax",
            StepKind::Backtrack => "backtrack",
            StepKind::Done => "done",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inspection event.
///
/// Payload fields are optional; an algorithm only fills what its display needs. `tag` is an
/// opaque label naming the step site inside the algorithm, stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<VertexId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<(VertexId, VertexId)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontier: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "wire::opt_distances")]
    pub distances: Option<Distances>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "wire::opt_grid")]
    pub matrix: Option<DistanceGrid>,
    pub message: String,
    #[serde(default)]
    pub tag: String,
}

impl Step {
    pub fn new(kind: StepKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            node: None,
            edge: None,
            frontier: None,
            distances: None,
            matrix: None,
            message: message.into(),
            tag: String::new(),
        }
    }

    pub fn init(message: impl Into<String>) -> Self {
        Self::new(StepKind::Init, message)
    }

    pub fn visit(message: impl Into<String>) -> Self {
        Self::new(StepKind::Visit, message)
    }

    pub fn check(message: impl Into<String>) -> Self {
        Self::new(StepKind::Check, message)
    }

    pub fn process(message: impl Into<String>) -> Self {
        Self::new(StepKind::Process, message)
    }

    pub fn explore(message: impl Into<String>) -> Self {
        Self::new(StepKind::Explore, message)
    }

    pub fn relax(message: impl Into<String>) -> Self {
        Self::new(StepKind::Relax, message)
    }

    pub fn backtrack(message: impl Into<String>) -> Self {
        Self::new(StepKind::Backtrack, message)
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self::new(StepKind::Done, message)
    }

    pub fn node(mut self, v: VertexId) -> Self {
        self.node = Some(v);
        self
    }

    pub fn edge(mut self, u: VertexId, v: VertexId) -> Self {
        self.edge = Some((u, v));
        self
    }

    pub fn frontier<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.frontier = Some(tokens.into_iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn distances(mut self, distances: &Distances) -> Self {
        self.distances = Some(distances.clone());
        self
    }

    pub fn matrix(mut self, matrix: &[Vec<f64>]) -> Self {
        self.matrix = Some(matrix.to_vec());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == StepKind::Done
    }
}

/// Formats a distance for messages and displays: infinity prints as `∞`.
pub fn format_distance(d: f64) -> String {
    if d.is_infinite() {
        if d > 0.0 { "∞".to_string() } else { "-∞".to_string() }
    } else if d.fract() == 0.0 && d.abs() < 1e15 {
        format!("{}", d as i64)
    } else {
        format!("{d}")
    }
}

/// Serde adapters for distance payloads.
///
/// JSON has no literal for infinity, so non-finite values travel as the strings `"Infinity"`,
/// `"-Infinity"` and `"NaN"`; finite values stay plain numbers.
pub(crate) mod wire {
    use super::{DistanceGrid, Distances};
    use graphwalk_graphlib::VertexId;
    use serde::de::{Error as _, Unexpected};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, Copy)]
    struct Number(f64);

    impl Serialize for Number {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            let v = self.0;
            if v.is_finite() {
                s.serialize_f64(v)
            } else if v.is_nan() {
                s.serialize_str("NaN")
            } else if v > 0.0 {
                s.serialize_str("Infinity")
            } else {
                s.serialize_str("-Infinity")
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        Token(String),
    }

    impl<'de> Deserialize<'de> for Number {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            match Repr::deserialize(d)? {
                Repr::Finite(v) => Ok(Number(v)),
                Repr::Token(token) => match token.as_str() {
                    "Infinity" => Ok(Number(f64::INFINITY)),
                    "-Infinity" => Ok(Number(f64::NEG_INFINITY)),
                    "NaN" => Ok(Number(f64::NAN)),
                    other => Err(D::Error::invalid_value(
                        Unexpected::Str(other),
                        &"a number, \"Infinity\", \"-Infinity\" or \"NaN\"",
                    )),
                },
            }
        }
    }

    fn wrap_distances(d: &Distances) -> BTreeMap<VertexId, Number> {
        d.iter().map(|(&k, &v)| (k, Number(v))).collect()
    }

    fn wrap_grid(grid: &DistanceGrid) -> Vec<Vec<Number>> {
        grid.iter()
            .map(|row| row.iter().copied().map(Number).collect())
            .collect()
    }

    pub(crate) fn distances<S: Serializer>(d: &Distances, s: S) -> Result<S::Ok, S::Error> {
        wrap_distances(d).serialize(s)
    }

    pub(crate) fn grid<S: Serializer>(grid: &DistanceGrid, s: S) -> Result<S::Ok, S::Error> {
        wrap_grid(grid).serialize(s)
    }

    pub(crate) mod opt_distances {
        use super::*;

        pub(crate) fn serialize<S: Serializer>(
            d: &Option<Distances>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            d.as_ref().map(wrap_distances).serialize(s)
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<Distances>, D::Error> {
            let wire = Option::<BTreeMap<VertexId, Number>>::deserialize(d)?;
            Ok(wire.map(|m| m.into_iter().map(|(k, v)| (k, v.0)).collect()))
        }
    }

    pub(crate) mod opt_grid {
        use super::*;

        pub(crate) fn serialize<S: Serializer>(
            grid: &Option<DistanceGrid>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            grid.as_ref().map(wrap_grid).serialize(s)
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DistanceGrid>, D::Error> {
            let wire = Option::<Vec<Vec<Number>>>::deserialize(d)?;
            Ok(wire.map(|rows| {
                rows.into_iter()
                    .map(|row| row.into_iter().map(|n| n.0).collect())
                    .collect()
            }))
        }
    }
}
