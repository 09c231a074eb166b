//! Collision system: the head eats any fruit it lands on.

use bevy::ecs::prelude::*;
use tracing::debug;

use crate::ecs::PendingDestroy;
use crate::error::SimulationError;
use crate::game::{Fruit, GameEvent, Position, SnakeBody};
use crate::snake::{PositionLookup, referenced_position};

type LiveFruit<'w, 's> =
    Query<'w, 's, (Entity, &'static Position), (With<Fruit>, Without<PendingDestroy>)>;

/// Marks every fruit sharing a cell with a snake head for destruction and
/// flags that snake to grow. Each matching fruit is eaten on its own.
pub fn collision_system(
    mut commands: Commands,
    mut snakes: Query<(Entity, &mut SnakeBody)>,
    positions: PositionLookup,
    fruit: LiveFruit,
    mut events: MessageWriter<GameEvent>,
) -> Result<(), SimulationError> {
    let mut eaten = Vec::new();
    for (snake, mut body) in snakes.iter_mut() {
        let head_pos = referenced_position(&positions, snake, body.head)?;

        for (entity, fruit_pos) in fruit.iter() {
            if !head_pos.collides_with(fruit_pos) || eaten.contains(&entity) {
                continue;
            }
            eaten.push(entity);
            commands.entity(entity).insert(PendingDestroy);
            body.grow = true;
            debug!(%snake, fruit = %entity, x = fruit_pos.x, y = fruit_pos.y, "fruit eaten");
            events.write(GameEvent::FruitEaten {
                fruit: entity,
                position: *fruit_pos,
            });
        }
    }
    Ok(())
}
