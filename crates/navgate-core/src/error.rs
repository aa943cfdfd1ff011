use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    // IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0}; run `navgate init` first")]
    ConfigNotFound(String),

    #[error("Invalid source type: {0}")]
    InvalidSourceType(String),

    // Access sources
    #[error("Access source error: {0}")]
    Source(String),

    // Navigation shape
    #[error("Navigation nesting exceeds {max} levels at {path}")]
    DepthExceeded { max: usize, path: String },

    #[error("Cyclic navigation detected at node {0}")]
    CyclicNavigation(String),

    // Serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),
}

pub type Result<T> = std::result::Result<T, NavError>;
