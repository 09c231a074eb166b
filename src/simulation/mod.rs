//! # Game loop driver
//!
//! One call to [`Simulation::advance_one_tick`] runs the [`TickSchedule`]
//! once. Its systems are chained in a fixed order:
//!
//! ```text
//! movement → segment follow → render capture → fruit lifecycle → collision → growth
//! ```
//!
//! with destroyed entities purged right after the passes that destroy them.
//! The driver does no timing of its own; whoever calls it decides the
//! cadence.
//!
//! Faults are not recovered. A failing system records its error in
//! [`SimulationFault`], every later system in the tick is skipped and every
//! later call reports [`SimulationError::Halted`].

use bevy::ecs::message::Messages;
use bevy::ecs::prelude::*;
use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use tracing::{debug, error, info, trace};

use crate::ecs::{EntityStore, purge_destroyed};
use crate::error::SimulationError;
use crate::food::{collision_system, fruit_lifecycle_system};
use crate::game::{GameConfig, GameEvent, GameRng, PlayerSnake, SimulationFault, SnakeBody};
use crate::input::{InputEvent, PlayerInput};
use crate::rendering::{RenderFrame, render_capture_system};
use crate::snake::{
    chain_length, growth_system, movement_system, request_growth, segment_follow_system,
    spawn_snake,
};

/// Schedule run once per tick.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TickSchedule;

/// Schedule run for the grow-now debug trigger.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrowNowSchedule;

/// Inserts the resources every system expects.
pub fn init_world(world: &mut World, config: GameConfig, rng: GameRng) {
    world.insert_resource(config);
    world.insert_resource(rng);
    world.init_resource::<RenderFrame>();
    world.init_resource::<Messages<GameEvent>>();
    world.init_resource::<SimulationFault>();
}

/// A fresh world with every resource in place and a deterministic RNG.
pub fn seeded_world(config: GameConfig, seed: u64) -> World {
    let mut world = World::new();
    init_world(&mut world, config, GameRng::seeded(seed));
    world
}

/// The per-tick pipeline.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::new(TickSchedule);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            check_snake_body.pipe(record_fault).run_if(healthy),
            movement_system.run_if(healthy),
            segment_follow_system.pipe(record_fault).run_if(healthy),
            render_capture_system.run_if(healthy),
            fruit_lifecycle_system.run_if(healthy),
            purge_destroyed.run_if(healthy),
            collision_system.pipe(record_fault).run_if(healthy),
            purge_destroyed.run_if(healthy),
            growth_system.pipe(record_fault).run_if(healthy),
            check_snake_body.pipe(record_fault).run_if(healthy),
        )
            .chain(),
    );
    schedule
}

/// Flag every snake, then grow it right away.
pub fn grow_now_schedule() -> Schedule {
    let mut schedule = Schedule::new(GrowNowSchedule);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            request_growth.run_if(healthy),
            growth_system.pipe(record_fault).run_if(healthy),
        )
            .chain(),
    );
    schedule
}

/// Keeps the first fault; later ones never run.
fn record_fault(In(result): In<Result<(), SimulationError>>, mut fault: ResMut<SimulationFault>) {
    if let Err(err) = result
        && !fault.is_set()
    {
        fault.0 = Some(err);
    }
}

fn healthy(fault: Res<SimulationFault>) -> bool {
    !fault.is_set()
}

/// Exactly one snake aggregate must exist, and it must be ours.
fn check_snake_body(
    snake: Res<PlayerSnake>,
    bodies: Query<Entity, With<SnakeBody>>,
) -> Result<(), SimulationError> {
    let bodies: Vec<Entity> = bodies.iter().collect();
    match bodies.as_slice() {
        [only] if *only == snake.0 => Ok(()),
        [] | [_] => Err(SimulationError::MissingSnakeBody),
        many => Err(SimulationError::DuplicateSnakeBody(many.len())),
    }
}

/// Owns the world and drives it one tick at a time.
pub struct Simulation {
    world: World,
    tick_schedule: Schedule,
    grow_schedule: Schedule,
    input: PlayerInput,
    snake: Entity,
    tick: u64,
}

impl Simulation {
    /// Validates `config`, then spawns the snake. The first fruit appears on
    /// the first tick.
    pub fn new(config: GameConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        info!(
            width = config.grid_width,
            height = config.grid_height,
            cell = config.cell_size,
            seed = ?config.seed,
            "simulation started"
        );
        let rng = GameRng::from_seed_or_entropy(config.seed);
        let mut world = World::new();
        let snake = spawn_snake(&mut world, &config);
        init_world(&mut world, config, rng);
        world.insert_resource(PlayerSnake(snake));
        let input = PlayerInput::new(&mut world);
        Ok(Self {
            world,
            tick_schedule: tick_schedule(),
            grow_schedule: grow_now_schedule(),
            input,
            snake,
            tick: 0,
        })
    }

    /// Run one tick and return the frame captured during it.
    pub fn advance_one_tick(&mut self) -> Result<&RenderFrame, SimulationError> {
        self.ensure_running()?;
        trace!(tick = self.tick, "running tick schedule");
        self.tick_schedule.run(&mut self.world);
        self.check_fault()?;

        let purged = self.world.maintain();
        if purged > 0 {
            debug!(tick = self.tick, purged, "purged entities at end of tick");
        }
        self.tick += 1;
        Ok(self.frame())
    }

    /// Deliver one input event. Takes effect immediately; turns are consumed
    /// when the head next steps.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), SimulationError> {
        self.ensure_running()?;
        match event {
            InputEvent::Turn(direction) => {
                self.input.turn(&mut self.world, direction);
                Ok(())
            }
            InputEvent::GrowNow => {
                self.grow_schedule.run(&mut self.world);
                self.check_fault()
            }
        }
    }

    /// Map a raw key code to an event and deliver it. Unknown codes are
    /// ignored.
    pub fn handle_key(&mut self, code: &str) -> Result<(), SimulationError> {
        match InputEvent::from_code(code) {
            Some(event) => self.handle_input(event),
            None => Ok(()),
        }
    }

    fn ensure_running(&self) -> Result<(), SimulationError> {
        if self.is_halted() {
            return Err(SimulationError::Halted);
        }
        Ok(())
    }

    fn check_fault(&self) -> Result<(), SimulationError> {
        match self.fault() {
            Some(err) => {
                error!(tick = self.tick, %err, "simulation halted");
                Err(err.clone())
            }
            None => Ok(()),
        }
    }

    /// The fault that halted the loop, if any.
    pub fn fault(&self) -> Option<&SimulationError> {
        self.world.resource::<SimulationFault>().0.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.fault().is_some()
    }

    /// Frame captured during the last tick.
    pub fn frame(&self) -> &RenderFrame {
        self.world.resource::<RenderFrame>()
    }

    /// Take the events written since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world
            .resource_mut::<Messages<GameEvent>>()
            .drain()
            .collect()
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access, for collaborators that set up scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The snake aggregate entity.
    pub fn snake(&self) -> Entity {
        self.snake
    }

    pub fn snake_body(&self) -> Result<SnakeBody, SimulationError> {
        self.world
            .get::<SnakeBody>(self.snake)
            .copied()
            .ok_or(SimulationError::MissingSnakeBody)
    }

    /// Length of the follow-chain, head included.
    pub fn snake_length(&self) -> Result<usize, SimulationError> {
        chain_length(&self.world, &self.snake_body()?)
    }
}
