use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;
use tracing::{debug, error, info, warn};

use snake_ecs::{CellCategory, Direction, GameConfig, GameEvent, InputEvent, Simulation};

// Colors
const HEAD_COLOR: Color = Color::srgba(0.61, 0.35, 0.71, 0.3);
const SEGMENT_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 0.3);
const FRUIT_COLOR: Color = Color::srgba(0.0, 1.0, 0.0, 0.3);
const OUTLINE_COLOR: Color = Color::srgba(1.0, 0.8, 0.0, 1.0);
const BACKGROUND_COLOR: Color = Color::srgba(0.04, 0.04, 0.04, 1.0);
const OUTLINE_THICKNESS: f32 = 2.0;

// Z-index constants for rendering layers
const Z_FRUIT: f32 = 1.0;
const Z_SNAKE_SEGMENT: f32 = 1.5;
const Z_SNAKE_HEAD: f32 = 2.0;

/// The simulation, owned by the app and advanced once per frame.
#[derive(Resource)]
struct SnakeSimulation(Simulation);

fn main() -> AppExit {
    let config = match std::env::args().nth(1) {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                return AppExit::error();
            }
        },
        None => GameConfig::default(),
    };
    let simulation = match Simulation::new(config) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("{err}");
            return AppExit::error();
        }
    };
    let (width, height) = {
        let config = simulation.config();
        (config.width() as u32, config.height() as u32)
    };

    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(width, height),
                    title: "Snake".to_string(),
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(SnakeSimulation(simulation))
        .add_systems(Startup, setup_camera)
        .add_systems(
            Update,
            (forward_keyboard_input, advance_simulation, draw_cells).chain(),
        )
        .run()
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Maps a key to the simulation's input vocabulary.
fn input_event(key: KeyCode) -> Option<InputEvent> {
    let event = match key {
        KeyCode::ArrowLeft | KeyCode::KeyA => InputEvent::Turn(Direction::Left),
        KeyCode::ArrowUp | KeyCode::KeyW => InputEvent::Turn(Direction::Up),
        KeyCode::ArrowRight | KeyCode::KeyD => InputEvent::Turn(Direction::Right),
        KeyCode::ArrowDown | KeyCode::KeyS => InputEvent::Turn(Direction::Down),
        KeyCode::Space => InputEvent::GrowNow,
        _ => return None,
    };
    Some(event)
}

/// System to forward freshly pressed keys to the simulation.
fn forward_keyboard_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut simulation: ResMut<SnakeSimulation>,
    mut exit: MessageWriter<AppExit>,
) {
    for key in keyboard_input.get_just_pressed() {
        let Some(event) = input_event(*key) else {
            continue;
        };
        if let Err(err) = simulation.0.handle_input(event) {
            error!(%err, "stopping after input fault");
            exit.write(AppExit::error());
            return;
        }
    }
}

/// System to run one simulation tick per frame.
fn advance_simulation(mut simulation: ResMut<SnakeSimulation>, mut exit: MessageWriter<AppExit>) {
    if let Err(err) = simulation.0.advance_one_tick() {
        error!(%err, "stopping after simulation fault");
        exit.write(AppExit::error());
        return;
    }
    for event in simulation.0.drain_events() {
        match event {
            GameEvent::FruitEaten { position, .. } => {
                let length = reported_length(&simulation.0);
                info!(x = position.x, y = position.y, ?length, "fruit eaten");
            }
            other => debug!(?other, "game event"),
        }
    }
}

/// Snake length for the log; a broken chain is reported, not hidden.
fn reported_length(simulation: &Simulation) -> Option<usize> {
    match simulation.snake_length() {
        Ok(length) => Some(length),
        Err(err) => {
            warn!(%err, "snake chain unreadable");
            None
        }
    }
}

/// System to paint the cells captured during the last tick.
fn draw_cells(mut painter: ShapePainter, simulation: Res<SnakeSimulation>) {
    let config = simulation.0.config();
    let cell_size = config.cell_size as f32;
    let half_width = config.width() as f32 / 2.0;
    let half_height = config.height() as f32 / 2.0;

    for cell in simulation.0.frame() {
        let (color, z) = match cell.category {
            CellCategory::Head => (HEAD_COLOR, Z_SNAKE_HEAD),
            CellCategory::Body => (SEGMENT_COLOR, Z_SNAKE_SEGMENT),
            CellCategory::Fruit => (FRUIT_COLOR, Z_FRUIT),
        };
        // Grid rows grow downwards, world y grows upwards.
        let translation = Vec3::new(
            cell.x as f32 - half_width + cell_size / 2.0,
            half_height - cell.y as f32 - cell_size / 2.0,
            z,
        );

        painter.set_translation(translation);
        painter.hollow = false;
        painter.color = color;
        painter.rect(Vec2::splat(cell_size));

        painter.hollow = true;
        painter.thickness = OUTLINE_THICKNESS;
        painter.color = OUTLINE_COLOR;
        painter.rect(Vec2::splat(cell_size));
    }
}
