//! Food systems: fruit lifetime, respawning and head/fruit collision.

mod collision;
mod lifecycle;

pub use collision::collision_system;
pub use lifecycle::fruit_lifecycle_system;

use bevy::ecs::prelude::*;
use rand::Rng;
use tracing::debug;

use crate::game::{Fruit, GameConfig, GameEvent};

/// Spawns one fruit on a uniformly random cell with a full lifetime.
pub fn spawn_fruit(
    commands: &mut Commands,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut MessageWriter<GameEvent>,
) -> Entity {
    let position = config.cell(
        rng.random_range(0..config.grid_width),
        rng.random_range(0..config.grid_height),
    );
    let fruit = commands
        .spawn((
            position,
            Fruit {
                lifetime: config.fruit_lifetime,
            },
        ))
        .id();
    debug!(%fruit, x = position.x, y = position.y, "fruit spawned");
    events.write(GameEvent::FruitSpawned { fruit, position });
    fruit
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::game::{GameRng, Position};
    use crate::simulation::seeded_world;

    #[test]
    fn spawned_fruit_is_on_the_grid() {
        let config = GameConfig::default();
        let mut world = seeded_world(config.clone(), 11);
        world
            .run_system_once(
                |mut commands: Commands,
                 config: Res<GameConfig>,
                 mut rng: ResMut<GameRng>,
                 mut events: MessageWriter<GameEvent>| {
                    for _ in 0..200 {
                        spawn_fruit(&mut commands, &config, &mut rng.0, &mut events);
                    }
                },
            )
            .unwrap();

        let mut fruit = world.query::<(&Position, &Fruit)>();
        assert_eq!(fruit.iter(&world).count(), 200);
        for (pos, state) in fruit.iter(&world) {
            assert!(config.contains(*pos), "{pos:?} is off the grid");
            assert_eq!(state.lifetime, 900);
        }
    }
}
