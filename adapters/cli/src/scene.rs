//! Translates world snapshots into the screen-space scene the backend draws.

use omega_squirrel_core::{SessionPhase, MAX_HEALTH};
use omega_squirrel_rendering::{
    HealthMeter, Scene, SceneGrass, ScenePlayer, SceneRival, ScreenRect, SessionOverlay,
};
use omega_squirrel_world::{query, World};

/// Builds the scene for the world's current state.
pub(crate) fn build(world: &World) -> Scene {
    let camera = query::camera(world);

    let grass = query::grass_view(world)
        .iter()
        .map(|tuft| SceneGrass {
            rect: ScreenRect::from_world(tuft.footprint(), camera),
            variant: tuft.variant,
        })
        .collect();

    let rivals = query::rival_view(world)
        .iter()
        .map(|rival| SceneRival {
            rect: ScreenRect::from_world(rival.rendered_rect(), camera),
            facing: rival.facing(),
        })
        .collect();

    let snapshot = query::player(world);
    let player = ScenePlayer {
        rect: ScreenRect::from_world(snapshot.rendered_rect(), camera),
        facing: snapshot.facing,
        visible: query::player_visible(world),
    };

    let overlay = match query::phase(world) {
        SessionPhase::Playing { .. } => None,
        SessionPhase::GameOver { .. } => Some(SessionOverlay::GameOver),
        SessionPhase::Won => Some(SessionOverlay::Won),
    };

    Scene::new(
        grass,
        rivals,
        player,
        HealthMeter::new(snapshot.health, MAX_HEALTH),
        overlay,
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use omega_squirrel_core::{
        BounceProfile, Command, GrassBlueprint, RivalBlueprint, Velocity, WorldPoint,
        VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
    };
    use omega_squirrel_world as world;

    use super::*;

    #[test]
    fn fresh_world_puts_player_mid_screen() {
        let world = World::new();
        let scene = build(&world);

        let center = scene.player.rect.center();
        let screen_center = Vec2::new(VIEWPORT_WIDTH as f32 / 2.0, VIEWPORT_HEIGHT as f32 / 2.0);
        assert!((center - screen_center).length() <= 1.0);
        assert!(scene.player.visible);
        assert_eq!(scene.health, HealthMeter::new(MAX_HEALTH, MAX_HEALTH));
        assert_eq!(scene.overlay, None);
        assert!(scene.rivals.is_empty());
    }

    #[test]
    fn entities_are_drawn_relative_to_camera() {
        let mut world = World::new();
        let camera = query::camera(&world);
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::SpawnGrass {
                blueprint: GrassBlueprint {
                    origin: camera.offset(10, 20),
                    variant: 2,
                },
            },
            &mut events,
        );
        world::apply(
            &mut world,
            Command::SpawnRival {
                blueprint: RivalBlueprint {
                    origin: WorldPoint::new(camera.x() + 700, camera.y() - 50),
                    width: 30,
                    height: 20,
                    velocity: Velocity::new(4, -3),
                    bounce: BounceProfile::new(10, 20),
                },
            },
            &mut events,
        );

        let scene = build(&world);
        assert_eq!(scene.grass.len(), 1);
        assert_eq!(scene.grass[0].rect.origin, Vec2::new(10.0, 20.0));
        assert_eq!(scene.grass[0].rect.size, Vec2::new(80.0, 80.0));
        assert_eq!(scene.grass[0].variant, 2);
        assert_eq!(scene.rivals.len(), 1);
        assert_eq!(scene.rivals[0].rect.origin, Vec2::new(700.0, -50.0));
        assert_eq!(scene.rivals[0].facing, omega_squirrel_core::Facing::Right);
    }

    fn spawn_bully(world: &mut World) -> omega_squirrel_core::RivalId {
        let mut events = Vec::new();
        world::apply(
            world,
            Command::SpawnRival {
                blueprint: RivalBlueprint {
                    origin: WorldPoint::new(0, 0),
                    width: 30,
                    height: 30,
                    velocity: Velocity::new(0, 0),
                    bounce: BounceProfile::new(10, 0),
                },
            },
            &mut events,
        );
        query::rival_view(world)
            .iter()
            .next()
            .map(|rival| rival.id)
            .expect("bully was spawned")
    }

    fn tick(world: &mut World, millis: u64) {
        let mut events = Vec::new();
        world::apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
    }

    #[test]
    fn hurt_player_flashes_without_an_overlay() {
        let mut world = World::new();
        let bully = spawn_bully(&mut world);
        let mut events = Vec::new();
        world::apply(&mut world, Command::ResolveContact { rival: bully }, &mut events);

        let scene = build(&world);
        assert!(scene.player.visible);
        assert_eq!(scene.health, HealthMeter::new(MAX_HEALTH - 1, MAX_HEALTH));

        tick(&mut world, 100);
        let scene = build(&world);
        assert!(!scene.player.visible);
        assert_eq!(scene.overlay, None);

        tick(&mut world, 100);
        assert!(build(&world).player.visible);
    }

    #[test]
    fn losing_hides_the_player_behind_the_game_over_overlay() {
        let mut world = World::new();
        let bully = spawn_bully(&mut world);
        let mut events = Vec::new();
        for _ in 0..MAX_HEALTH {
            world::apply(&mut world, Command::ResolveContact { rival: bully }, &mut events);
            tick(&mut world, 2_500);
        }
        assert!(matches!(query::phase(&world), SessionPhase::GameOver { .. }));

        let scene = build(&world);
        assert_eq!(scene.overlay, Some(SessionOverlay::GameOver));
        assert!(!scene.player.visible);
        assert_eq!(scene.health, HealthMeter::new(0, MAX_HEALTH));
    }
}
