use std::time::Duration;

use omega_squirrel_core::{
    Command, Event, WorldPoint, WorldRect, GRASS_POPULATION, INITIAL_GRASS, RIVAL_POPULATION,
};
use omega_squirrel_system_streaming::{active_area, Config, Streaming};
use omega_squirrel_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn tick_event() -> Event {
    Event::TimeAdvanced {
        dt: Duration::from_millis(33),
    }
}

fn run_streaming(world: &mut World, streaming: &mut Streaming, rng: &mut ChaCha8Rng) {
    let mut commands = Vec::new();
    streaming.handle(
        &[tick_event()],
        query::camera(world),
        &query::rival_view(world),
        &query::grass_view(world),
        rng,
        &mut commands,
    );

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
}

#[test]
fn first_pass_reaches_population_targets() {
    let mut world = World::new();
    let mut streaming = Streaming::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0xace);

    run_streaming(&mut world, &mut streaming, &mut rng);

    assert_eq!(query::rival_count(&world), RIVAL_POPULATION);
    assert_eq!(query::grass_count(&world), GRASS_POPULATION);
}

#[test]
fn nothing_happens_without_a_tick() {
    let world = World::new();
    let mut streaming = Streaming::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut commands = Vec::new();

    streaming.handle(
        &[],
        query::camera(&world),
        &query::rival_view(&world),
        &query::grass_view(&world),
        &mut rng,
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn new_entities_never_spawn_on_screen() {
    let mut world = World::new();
    let mut streaming = Streaming::default();
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    run_streaming(&mut world, &mut streaming, &mut rng);

    let viewport = query::viewport(&world);
    for rival in query::rival_view(&world).iter() {
        assert!(!rival.footprint().overlaps(&viewport));
    }
    for tuft in query::grass_view(&world).iter() {
        assert!(!tuft.footprint().overlaps(&viewport));
    }
}

#[test]
fn moving_camera_culls_then_refills() {
    let mut world = World::new();
    let mut streaming = Streaming::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    run_streaming(&mut world, &mut streaming, &mut rng);

    let before: Vec<_> = query::rival_view(&world)
        .iter()
        .map(|rival| rival.id)
        .collect();

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::MoveCamera {
            origin: WorldPoint::new(50_000, 50_000),
        },
        &mut events,
    );
    run_streaming(&mut world, &mut streaming, &mut rng);

    let area = active_area(query::camera(&world));
    let after = query::rival_view(&world);
    assert_eq!(after.len(), RIVAL_POPULATION);
    assert!(after.iter().all(|rival| !before.contains(&rival.id)));
    assert!(after.iter().all(|rival| rival.footprint().overlaps(&area)));
    assert!(query::grass_view(&world)
        .iter()
        .all(|tuft| tuft.footprint().overlaps(&area)));
    assert_eq!(query::grass_count(&world), GRASS_POPULATION);
}

#[test]
fn populations_hold_while_the_world_ticks() {
    let mut world = World::new();
    let mut streaming = Streaming::new(Config::new(12, 20, 0));
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    for _ in 0..300 {
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(33),
            },
            &mut events,
        );
        run_streaming(&mut world, &mut streaming, &mut rng);

        let area = active_area(query::camera(&world));
        assert_eq!(query::rival_count(&world), 12);
        assert_eq!(query::grass_count(&world), 20);
        assert!(query::rival_view(&world)
            .iter()
            .all(|rival| rival.footprint().overlaps(&area)));
    }
}

#[test]
fn seeding_places_opening_grass_in_view() {
    let mut world = World::new();
    let streaming = Streaming::default();
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut commands = Vec::new();
    streaming.seed(query::camera(&world), &mut rng, &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let viewport: WorldRect = query::viewport(&world);
    let grass = query::grass_view(&world);
    assert_eq!(grass.len(), INITIAL_GRASS);
    assert!(grass.iter().all(|tuft| tuft.footprint().overlaps(&viewport)));
}
