use bevy::ecs::prelude::*;
use snake_ecs::game::{Fruit, Movement, Segment, SnakeBody};
use snake_ecs::{
    CellCategory, Direction, EntityStore, GameConfig, GameEvent, InputEvent, Position,
    Simulation, SimulationError,
};

fn simulation(energy_threshold: u32) -> Simulation {
    Simulation::new(GameConfig {
        energy_threshold,
        seed: Some(2024),
        ..GameConfig::default()
    })
    .unwrap()
}

fn head(sim: &Simulation) -> Position {
    let body = sim.snake_body().unwrap();
    *sim.world().get::<Position>(body.head).unwrap()
}

fn fruit_count(world: &mut World) -> usize {
    world
        .query_filtered::<Entity, With<Fruit>>()
        .iter(world)
        .count()
}

#[test]
fn head_takes_first_step_once_energy_exceeds_threshold() {
    // The head starts with one unit of energy already banked.
    let mut sim = simulation(30);
    let start = head(&sim);
    for _ in 0..29 {
        sim.advance_one_tick().unwrap();
        assert_eq!(head(&sim), start);
    }
    sim.advance_one_tick().unwrap();
    assert_eq!(head(&sim), Position::new(start.x, start.y + 30));

    let body = sim.snake_body().unwrap();
    assert_eq!(sim.world().get::<Movement>(body.head).unwrap().energy, 0);
}

#[test]
fn head_wraps_around_the_grid() {
    let mut sim = simulation(0);
    let config = sim.config().clone();
    let start = head(&sim);

    // Heading down from row 0, the head is back on row 0 after one lap.
    for _ in 0..config.grid_height {
        sim.advance_one_tick().unwrap();
    }
    assert_eq!(head(&sim).x, start.x);
    assert_eq!(head(&sim).y, start.y);

    sim.handle_input(InputEvent::Turn(Direction::Left)).unwrap();
    sim.advance_one_tick().unwrap();
    assert_eq!(head(&sim), Position::new(start.x - 30, start.y));
    sim.advance_one_tick().unwrap();
    sim.advance_one_tick().unwrap();
    assert_eq!(head(&sim).x, config.width() - 30);
}

#[test]
fn buffered_turns_are_filtered_and_consumed_in_order() {
    let mut sim = simulation(0);
    // Current heading is Down.
    sim.handle_key("ArrowUp").unwrap();
    sim.handle_key("ArrowDown").unwrap();
    sim.handle_key("ArrowRight").unwrap();
    sim.handle_key("ArrowLeft").unwrap();
    sim.handle_key("KeyQ").unwrap();

    let body = sim.snake_body().unwrap();
    let pending = sim.world().get::<Movement>(body.head).unwrap().pending.clone();
    assert_eq!(pending, [Direction::Right]);

    let before = head(&sim);
    sim.advance_one_tick().unwrap();
    assert_eq!(head(&sim), Position::new(before.x + 30, before.y));
    let movement = sim.world().get::<Movement>(body.head).unwrap();
    assert_eq!(movement.direction, Direction::Right);
    assert!(movement.pending.is_empty());
}

#[test]
fn eating_fruit_grows_the_snake_and_fruit_comes_back() {
    let mut sim = simulation(0);
    let start = head(&sim);
    let target = Position::new(start.x, start.y + 30);
    let fruit = sim.world_mut().create((target, Fruit { lifetime: 100 }));

    sim.advance_one_tick().unwrap();
    assert!(!sim.world().is_alive(fruit));
    assert_eq!(sim.snake_length(), Ok(2));
    let body = sim.snake_body().unwrap();
    assert!(!body.grow);
    assert_eq!(sim.world().get::<Position>(body.tail), Some(&target));

    let events = sim.drain_events();
    assert!(events.contains(&GameEvent::FruitEaten {
        fruit,
        position: target,
    }));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::SegmentGrown { position, .. } if *position == target))
    );

    // Collision ran after the fruit system, so the board is empty until the
    // next tick respawns.
    assert_eq!(fruit_count(sim.world_mut()), 0);
    sim.advance_one_tick().unwrap();
    let eaten = sim
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::FruitEaten { .. }))
        .count();
    assert_eq!(fruit_count(sim.world_mut()) + eaten, 1);
}

#[test]
fn new_segment_trails_one_cell_behind() {
    let mut sim = simulation(0);
    sim.handle_input(InputEvent::GrowNow).unwrap();
    let body = sim.snake_body().unwrap();
    let tail = body.tail;
    let start = head(&sim);
    assert_eq!(sim.world().get::<Position>(tail), Some(&start));

    let mut previous_head = start;
    for _ in 0..5 {
        sim.advance_one_tick().unwrap();
        assert_eq!(sim.world().get::<Position>(tail), Some(&previous_head));
        previous_head = head(&sim);
    }
}

#[test]
fn freshly_grown_segment_without_snapshot_waits_one_tick() {
    let mut sim = simulation(0);
    let body = sim.snake_body().unwrap();
    let start = head(&sim);
    let segment = sim
        .world_mut()
        .create((start, Segment::following(body.head)));

    sim.advance_one_tick().unwrap();
    // Head moved, but the segment only recorded the head's new position.
    assert_eq!(sim.world().get::<Position>(segment), Some(&start));
    let moved_to = head(&sim);
    assert_eq!(
        sim.world().get::<Segment>(segment).unwrap().parent_snapshot,
        Some(moved_to)
    );

    sim.advance_one_tick().unwrap();
    assert_eq!(sim.world().get::<Position>(segment), Some(&moved_to));
}

#[test]
fn invariants_hold_over_a_long_run() {
    let mut sim = simulation(0);
    let config = sim.config().clone();
    for tick in 0..2_000 {
        if tick % 7 == 0 {
            let direction = match tick % 4 {
                0 => Direction::Left,
                1 => Direction::Up,
                2 => Direction::Right,
                _ => Direction::Down,
            };
            sim.handle_input(InputEvent::Turn(direction)).unwrap();
        }
        if tick % 97 == 0 {
            sim.handle_input(InputEvent::GrowNow).unwrap();
        }
        sim.advance_one_tick().unwrap();

        let eaten = sim
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::FruitEaten { .. }));
        let fruit = fruit_count(sim.world_mut());
        assert_eq!(fruit, if eaten { 0 } else { 1 }, "tick {tick}");

        let world = sim.world_mut();
        let segments = world.query::<&Segment>().iter(world).count();
        for pos in world.query::<&Position>().iter(world) {
            assert!(config.contains(*pos), "{pos:?} off grid at tick {tick}");
        }
        assert_eq!(sim.snake_length(), Ok(segments + 1));
    }
    assert_eq!(sim.tick(), 2_000);
}

#[test]
fn frame_reports_every_positioned_entity() {
    let mut sim = simulation(0);
    sim.handle_input(InputEvent::GrowNow).unwrap();
    sim.handle_input(InputEvent::GrowNow).unwrap();
    sim.advance_one_tick().unwrap();
    sim.drain_events();
    sim.advance_one_tick().unwrap();
    // Growth runs after the capture, so segments grown this tick are not
    // painted yet.
    let grown_after_capture = sim
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::SegmentGrown { .. }))
        .count();
    let world = sim.world_mut();
    let segments = world.query::<&Segment>().iter(world).count();

    let frame = sim.frame();
    assert_eq!(frame.of(CellCategory::Head).count(), 1);
    assert_eq!(
        frame.of(CellCategory::Body).count(),
        segments - grown_after_capture
    );
    assert!(segments - grown_after_capture >= 2);
    assert!(frame.of(CellCategory::Fruit).count() <= 1);
    let head_cell = frame.of(CellCategory::Head).next().unwrap();
    // The frame is captured after movement, so it shows this tick's head.
    assert_eq!(Position::new(head_cell.x, head_cell.y), head(&sim));
}

#[test]
fn destroying_a_linked_segment_halts_the_loop() {
    let mut sim = simulation(0);
    sim.handle_input(InputEvent::GrowNow).unwrap();
    sim.handle_input(InputEvent::GrowNow).unwrap();
    let body: SnakeBody = sim.snake_body().unwrap();
    let middle = sim
        .world()
        .get::<Segment>(body.tail)
        .and_then(|s| s.parent)
        .unwrap();
    sim.world_mut().destroy(middle);
    sim.world_mut().maintain();

    let err = sim.advance_one_tick().map(|_| ()).unwrap_err();
    assert_eq!(
        err,
        SimulationError::DanglingReference {
            holder: body.tail,
            target: middle,
        }
    );
    assert_eq!(
        sim.advance_one_tick().map(|_| ()),
        Err(SimulationError::Halted)
    );
}
