use std::time::Duration;

use omega_squirrel_core::{Command, Event, Heading, CAMERA_SLACK};
use omega_squirrel_system_camera::Camera;
use omega_squirrel_world::{self as world, query, World};

fn step(world: &mut World, camera: &mut Camera) -> Vec<Command> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(33),
        },
        &mut events,
    );

    let mut commands = Vec::new();
    camera.handle(
        &events,
        query::camera(world),
        &query::player(world),
        &mut commands,
    );
    for command in commands.clone() {
        world::apply(world, command, &mut events);
    }
    commands
}

#[test]
fn camera_stays_put_until_player_leaves_dead_zone() {
    let mut world = World::new();
    let mut camera = Camera::default();
    let start = query::camera(&world);

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::Steer {
            heading: Heading::Right,
            engaged: true,
        },
        &mut events,
    );

    // Ten steps of nine pixels cover the slack exactly.
    for _ in 0..10 {
        assert!(step(&mut world, &mut camera).is_empty());
    }
    assert_eq!(query::camera(&world), start);

    let commands = step(&mut world, &mut camera);
    assert_eq!(commands.len(), 1);
    let moved = query::camera(&world);
    assert_eq!(moved.y(), start.y());
    assert_eq!(
        query::viewport(&world).center().x() - query::player(&world).center().x(),
        -CAMERA_SLACK
    );
}

#[test]
fn camera_ignores_batches_without_ticks() {
    let world = World::new();
    let mut camera = Camera::new(0);
    let mut commands = Vec::new();
    camera.handle(
        &[Event::CameraMoved {
            origin: query::camera(&world),
        }],
        query::camera(&world),
        &query::player(&world),
        &mut commands,
    );
    assert!(commands.is_empty());
}
