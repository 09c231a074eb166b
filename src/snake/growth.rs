//! Growth system: appends a segment behind the current tail.

use bevy::ecs::prelude::*;
use tracing::debug;

use crate::error::SimulationError;
use crate::game::{GameEvent, Segment, SnakeBody};

use super::{PositionLookup, referenced_position};

/// Grows every snake whose `grow` flag is set by one segment.
///
/// The new segment sits on the tail's cell, follows the tail and already
/// holds the tail's position as its snapshot, so it stays put until the tail
/// moves away.
pub fn growth_system(
    mut commands: Commands,
    mut snakes: Query<(Entity, &mut SnakeBody)>,
    positions: PositionLookup,
    mut events: MessageWriter<GameEvent>,
) -> Result<(), SimulationError> {
    for (snake, mut body) in snakes.iter_mut() {
        if !body.grow {
            continue;
        }

        let tail_pos = referenced_position(&positions, snake, body.tail)?;
        let segment = commands
            .spawn((
                tail_pos,
                Segment {
                    parent: Some(body.tail),
                    parent_snapshot: Some(tail_pos),
                },
            ))
            .id();
        body.tail = segment;
        body.grow = false;

        debug!(%snake, %segment, x = tail_pos.x, y = tail_pos.y, "snake grew");
        events.write(GameEvent::SegmentGrown {
            segment,
            position: tail_pos,
        });
    }
    Ok(())
}

/// Flags every snake to grow on the next growth pass.
pub fn request_growth(mut snakes: Query<&mut SnakeBody>) {
    for mut body in snakes.iter_mut() {
        body.grow = true;
    }
    debug!("growth requested by input");
}
