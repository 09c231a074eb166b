//! Game resources (singleton state).

use bevy::ecs::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::SimulationError;

/// Random source for fruit placement.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Fixed seed when given, OS entropy otherwise.
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self(StdRng::from_rng(&mut rand::rng())),
        }
    }
}

/// The snake body aggregate the loop drives.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnake(pub Entity);

/// First fault raised by a system. Once set, no further system runs.
#[derive(Resource, Default, Debug)]
pub struct SimulationFault(pub Option<SimulationError>);

impl SimulationFault {
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}
