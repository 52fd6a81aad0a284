pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown algorithm: {name}")]
    UnknownAlgorithm { name: String },

    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    #[error("Invalid speed {value}: expected a positive number")]
    InvalidSpeed { value: f64 },

    #[error("Invalid edge spec `{spec}`: {message}")]
    InvalidEdgeSpec { spec: String, message: String },

    #[error("Invalid config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Maze carving needs a grid graph with at least one cell")]
    NotAGrid,
}
