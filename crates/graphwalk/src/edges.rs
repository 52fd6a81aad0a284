//! Textual edge descriptions of the form `u-v` or `u-v:w`.

use crate::error::{Error, Result};
use graphwalk_graphlib::{Edge, Graph, VertexId};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpec {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: Option<f64>,
}

impl EdgeSpec {
    /// Adds the edge to `g`; `None` when the graph rejects it.
    pub fn add_to(&self, g: &mut Graph) -> Option<Edge> {
        match self.weight {
            Some(w) => g.add_edge_weighted(self.source, self.target, w),
            None => g.add_edge(self.source, self.target),
        }
    }

    /// Largest vertex id mentioned.
    pub fn max_vertex(&self) -> VertexId {
        self.source.max(self.target)
    }
}

impl fmt::Display for EdgeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.source, self.target)?;
        if let Some(w) = self.weight {
            write!(f, ":{w}")?;
        }
        Ok(())
    }
}

impl FromStr for EdgeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidEdgeSpec {
            spec: s.to_string(),
            message: message.to_string(),
        };
        let (pair, weight) = match s.trim().split_once(':') {
            Some((pair, w)) => {
                let w = w
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid("weight is not a number"))?;
                if !w.is_finite() {
                    return Err(invalid("weight must be finite"));
                }
                (pair, Some(w))
            }
            None => (s.trim(), None),
        };
        let Some((u, v)) = pair.split_once('-') else {
            return Err(invalid("expected `u-v` or `u-v:w`"));
        };
        let id = |t: &str| {
            t.trim()
                .parse::<u32>()
                .map(VertexId)
                .map_err(|_| invalid("vertex ids must be non-negative integers"))
        };
        Ok(Self {
            source: id(u)?,
            target: id(v)?,
            weight,
        })
    }
}
