use thiserror::Error;

/// Errors from setting up the engine.
///
/// Running scripts never fails: authored-content defects degrade to no-ops
/// and log lines instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("World error: {0}")]
    World(#[from] adventure_world::WorldError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
