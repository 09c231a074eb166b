//! Snake on the bevy entity/component store.
//!
//! The crate is the simulation core only: the per-tick systems, the input
//! queue and the loop driver, all running against a bevy [`World`]. Drawing,
//! windowing and the keyboard live with the caller (see the `snake_ecs`
//! binary), which feeds [`InputEvent`]s in, calls
//! [`Simulation::advance_one_tick`] at its own cadence and paints the
//! returned [`RenderFrame`].
//!
//! [`World`]: bevy::ecs::world::World

pub mod ecs;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod rendering;
pub mod simulation;
pub mod snake;

pub use ecs::EntityStore;
pub use error::{ConfigError, SimulationError};
pub use game::{Direction, GameConfig, GameEvent, Position};
pub use input::InputEvent;
pub use rendering::{CellCategory, RenderCell, RenderFrame};
pub use simulation::Simulation;
