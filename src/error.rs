//! Error types for configuration and the tick loop.

use bevy::ecs::entity::Entity;
use thiserror::Error;

/// Errors raised while loading or validating [`crate::game::GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Internal-consistency faults. None of them is recoverable: the loop halts
/// instead of carrying on with corrupted state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A non-owning handle points at an entity that no longer exists.
    #[error("{holder} references dead entity {target}")]
    DanglingReference { holder: Entity, target: Entity },

    /// An entity is missing a component the simulation relies on.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("no snake body aggregate exists")]
    MissingSnakeBody,

    #[error("expected one snake body aggregate, found {0}")]
    DuplicateSnakeBody(usize),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The loop already stopped on an earlier fault.
    #[error("simulation halted after an earlier fault")]
    Halted,
}

impl From<ConfigError> for SimulationError {
    fn from(err: ConfigError) -> Self {
        SimulationError::InvalidConfig(err.to_string())
    }
}
