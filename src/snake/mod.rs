//! Snake systems: stepping the head, chasing segments along the chain and
//! growing the tail.

mod follow;
mod growth;
mod movement;

pub use follow::segment_follow_system;
pub use growth::{growth_system, request_growth};
pub use movement::{movement_system, step};

use std::collections::HashSet;

use bevy::ecs::prelude::*;
use tracing::debug;

use crate::ecs::EntityStore;
use crate::error::SimulationError;
use crate::game::{
    GameConfig, INITIAL_DIRECTION, INITIAL_ENERGY, INITIAL_HEAD_POSITION, Movement,
    PlayerControlled, Position, Segment, SnakeBody, SnakeHead,
};

/// Read-only lookup that matches every live entity, with or without a
/// position.
pub(crate) type PositionLookup<'w, 's> = Query<'w, 's, Option<&'static Position>>;

/// Spawns the player-controlled head and the snake body aggregate.
///
/// Returns the aggregate entity. The head starts as both ends of the chain.
pub fn spawn_snake(world: &mut World, config: &GameConfig) -> Entity {
    let start = if config.contains(INITIAL_HEAD_POSITION) {
        INITIAL_HEAD_POSITION
    } else {
        Position::default()
    };
    let head = world.create((
        start,
        Movement::new(INITIAL_DIRECTION).with_energy(INITIAL_ENERGY),
        SnakeHead,
        PlayerControlled,
    ));
    let snake = world.create(SnakeBody {
        head,
        tail: head,
        grow: false,
    });
    debug!(%head, %snake, x = start.x, y = start.y, "snake spawned");
    snake
}

/// Number of entities in the follow-chain, head included.
///
/// Walks from the tail through each segment's parent until it reaches the
/// head. A dead link or a walk that revisits an entity is a structural fault.
pub fn chain_length(world: &World, body: &SnakeBody) -> Result<usize, SimulationError> {
    let mut visited = HashSet::from([body.tail]);
    let mut current = body.tail;
    while current != body.head {
        let segment = world
            .get::<Segment>(current)
            .ok_or(SimulationError::MissingComponent {
                entity: current,
                component: "Segment",
            })?;
        let parent = segment.parent.ok_or(SimulationError::MissingComponent {
            entity: current,
            component: "Segment parent",
        })?;
        if !world.is_alive(parent) {
            return Err(SimulationError::DanglingReference {
                holder: current,
                target: parent,
            });
        }
        if !visited.insert(parent) {
            return Err(SimulationError::DanglingReference {
                holder: current,
                target: body.head,
            });
        }
        current = parent;
    }
    Ok(visited.len())
}

/// Position of `target` as seen through a non-owning handle held by `holder`.
pub(crate) fn referenced_position(
    positions: &PositionLookup,
    holder: Entity,
    target: Entity,
) -> Result<Position, SimulationError> {
    match positions.get(target) {
        Err(_) => Err(SimulationError::DanglingReference { holder, target }),
        Ok(None) => Err(SimulationError::MissingComponent {
            entity: target,
            component: "Position",
        }),
        Ok(Some(position)) => Ok(*position),
    }
}
