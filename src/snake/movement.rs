//! Movement/action system: the speed governor, buffered turns and toroidal
//! stepping.

use bevy::ecs::prelude::*;

use crate::game::{Direction, GameConfig, Movement, Position};

/// Step one cell from `pos` in `direction`, wrapping at every grid edge.
pub fn step(pos: Position, direction: Direction, config: &GameConfig) -> Position {
    let cell = config.cell_size;
    let (width, height) = (config.width(), config.height());
    let mut next = pos;
    match direction {
        Direction::Left => {
            next.x = if pos.x < cell { width - cell } else { pos.x - cell };
        }
        Direction::Up => {
            next.y = if pos.y < cell { height - cell } else { pos.y - cell };
        }
        Direction::Right => {
            next.x = if pos.x >= width - cell { 0 } else { pos.x + cell };
        }
        Direction::Down => {
            next.y = if pos.y >= height - cell { 0 } else { pos.y + cell };
        }
    }
    next
}

/// Advances every Position+Movement entity.
///
/// Each tick adds one unit of energy. When energy exceeds the threshold the
/// next queued turn (if any) becomes the heading, the entity steps one cell
/// and energy drops back to zero.
pub fn movement_system(config: Res<GameConfig>, mut movers: Query<(&mut Position, &mut Movement)>) {
    for (mut pos, mut movement) in movers.iter_mut() {
        movement.energy = movement.energy.saturating_add(1);
        if movement.energy <= config.energy_threshold {
            continue;
        }
        let direction = movement.advance_direction();
        *pos = step(*pos, direction, &config);
        movement.energy = 0;
    }
}
