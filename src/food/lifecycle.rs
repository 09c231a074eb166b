//! Fruit-lifecycle system.

use bevy::ecs::prelude::*;
use tracing::debug;

use crate::ecs::PendingDestroy;
use crate::game::{Fruit, GameConfig, GameEvent, GameRng};

use super::spawn_fruit;

/// Ages every fruit by one tick, marks the expired ones for destruction and
/// makes sure one fruit is on the board when the pass ends.
pub fn fruit_lifecycle_system(
    mut commands: Commands,
    mut fruit: Query<(Entity, &mut Fruit), Without<PendingDestroy>>,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut events: MessageWriter<GameEvent>,
) {
    let mut remaining = 0;
    for (entity, mut state) in fruit.iter_mut() {
        state.lifetime -= 1;
        if state.lifetime <= 0 {
            commands.entity(entity).insert(PendingDestroy);
            debug!(fruit = %entity, "fruit expired");
            events.write(GameEvent::FruitExpired { fruit: entity });
        } else {
            remaining += 1;
        }
    }

    if remaining == 0 {
        spawn_fruit(&mut commands, &config, &mut rng.0, &mut events);
    }
}
