//! Player input: turns raw key codes into validated direction changes.
//!
//! Events arrive whenever the input source produces them. Turns are queued on
//! the controlled entities' [`Movement`] right away and only consumed by the
//! movement system when a step is taken.

use bevy::ecs::prelude::*;
use tracing::trace;

use crate::game::{Direction, Movement, PlayerControlled};

/// A discrete input delivered by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    /// Debug trigger: grow every snake by one segment immediately.
    GrowNow,
}

impl InputEvent {
    /// Map a keyboard code (`"ArrowUp"`, `"KeyW"`, `"Space"`, ...) to an event.
    ///
    /// Unrecognised codes map to `None` and are meant to be ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let event = match code {
            "ArrowLeft" | "KeyA" => InputEvent::Turn(Direction::Left),
            "ArrowUp" | "KeyW" => InputEvent::Turn(Direction::Up),
            "ArrowRight" | "KeyD" => InputEvent::Turn(Direction::Right),
            "ArrowDown" | "KeyS" => InputEvent::Turn(Direction::Down),
            "Space" => InputEvent::GrowNow,
            _ => return None,
        };
        Some(event)
    }
}

type Players = QueryState<(Entity, &'static mut Movement), With<PlayerControlled>>;

/// Queues turns on every player-controlled entity.
///
/// The query is built once and refreshed before each use, so players spawned
/// or despawned in between are picked up.
pub struct PlayerInput {
    players: Players,
}

impl PlayerInput {
    pub fn new(world: &mut World) -> Self {
        Self {
            players: world.query_filtered(),
        }
    }

    /// Offer `direction` to every player. Returns how many queued it.
    pub fn turn(&mut self, world: &mut World, direction: Direction) -> usize {
        self.players.update_archetypes(world);
        let mut queued = 0;
        for (player, mut movement) in self.players.iter_mut(world) {
            if movement.request_turn(direction) {
                queued += 1;
            } else {
                trace!(%player, ?direction, current = ?movement.direction, "turn rejected");
            }
        }
        queued
    }
}
