#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Streaming system that keeps the area around the camera populated.
//!
//! The world is unbounded, so only a window three viewports wide and tall is
//! simulated. Every tick this system culls rivals and grass that drifted out
//! of that window, then tops both populations back up with blueprints placed
//! just off screen.

pub mod placement;

use log::debug;
use omega_squirrel_core::{
    BounceProfile, Command, Event, GrassBlueprint, GrassView, RivalBlueprint, RivalView,
    Velocity, WorldPoint, GRASS_HEIGHT, GRASS_POPULATION, GRASS_VARIANTS, GRASS_WIDTH,
    INITIAL_GRASS, RIVAL_MAX_BOUNCE_HEIGHT, RIVAL_MAX_BOUNCE_RATE, RIVAL_MAX_SPEED,
    RIVAL_MIN_BOUNCE_HEIGHT, RIVAL_MIN_BOUNCE_RATE, RIVAL_MIN_SPEED, RIVAL_POPULATION,
};
use rand::Rng;

pub use placement::{active_area, place_off_camera, place_on_camera, PLACEMENT_ATTEMPTS};

/// Configuration parameters required to construct the streaming system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rival_population: usize,
    grass_population: usize,
    initial_grass: usize,
}

impl Config {
    /// Creates a configuration with the population targets to maintain and
    /// the number of tufts scattered on screen when a session starts.
    #[must_use]
    pub const fn new(
        rival_population: usize,
        grass_population: usize,
        initial_grass: usize,
    ) -> Self {
        Self {
            rival_population,
            grass_population,
            initial_grass,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(RIVAL_POPULATION, GRASS_POPULATION, INITIAL_GRASS)
    }
}

/// Pure system that culls distant entities and spawns replacements.
#[derive(Debug, Default)]
pub struct Streaming {
    config: Config,
}

impl Streaming {
    /// Creates a new streaming system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scatters the opening grass inside the viewport of a fresh session.
    pub fn seed<R>(&self, camera: WorldPoint, rng: &mut R, out: &mut Vec<Command>)
    where
        R: Rng + ?Sized,
    {
        for _ in 0..self.config.initial_grass {
            let variant = rng.gen_range(0..GRASS_VARIANTS);
            let origin = place_on_camera(rng, camera);
            out.push(Command::SpawnGrass {
                blueprint: GrassBlueprint { origin, variant },
            });
        }
    }

    /// Culls entities outside the active area, then spawns up to the targets.
    ///
    /// Acts once per batch that contains a tick; the views must reflect the
    /// world after that tick was applied.
    pub fn handle<R>(
        &mut self,
        events: &[Event],
        camera: WorldPoint,
        rivals: &RivalView,
        grass: &GrassView,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let area = active_area(camera);

        let mut live_rivals = 0;
        for rival in rivals.iter() {
            if rival.footprint().overlaps(&area) {
                live_rivals += 1;
            } else {
                out.push(Command::CullRival { rival: rival.id });
            }
        }

        let mut live_grass = 0;
        for tuft in grass.iter() {
            if tuft.footprint().overlaps(&area) {
                live_grass += 1;
            } else {
                out.push(Command::CullGrass { grass: tuft.id });
            }
        }

        let rival_spawns = self.config.rival_population.saturating_sub(live_rivals);
        let grass_spawns = self.config.grass_population.saturating_sub(live_grass);
        if rival_spawns > 0 || grass_spawns > 0 {
            debug!(
                "streaming {rival_spawns} rivals and {grass_spawns} grass around {camera:?}"
            );
        }

        for _ in 0..grass_spawns {
            out.push(Command::SpawnGrass {
                blueprint: grass_blueprint(rng, camera),
            });
        }
        for _ in 0..rival_spawns {
            out.push(Command::SpawnRival {
                blueprint: rival_blueprint(rng, camera),
            });
        }
    }
}

/// Draws a rival of random size, speed and bounce just off screen.
pub fn rival_blueprint<R>(rng: &mut R, camera: WorldPoint) -> RivalBlueprint
where
    R: Rng + ?Sized,
{
    let general: u32 = rng.gen_range(5..=25);
    let multiplier: u32 = rng.gen_range(1..=3);
    let width = (general + rng.gen_range(0..=10)) * multiplier;
    let height = (general + rng.gen_range(0..=10)) * multiplier;
    let origin = place_off_camera(rng, camera, width, height);
    let velocity = Velocity::random(rng, RIVAL_MIN_SPEED, RIVAL_MAX_SPEED);
    let bounce = BounceProfile::new(
        rng.gen_range(RIVAL_MIN_BOUNCE_RATE..=RIVAL_MAX_BOUNCE_RATE),
        rng.gen_range(RIVAL_MIN_BOUNCE_HEIGHT..=RIVAL_MAX_BOUNCE_HEIGHT),
    );

    RivalBlueprint {
        origin,
        width,
        height,
        velocity,
        bounce,
    }
}

/// Draws a grass tuft of random variant just off screen.
pub fn grass_blueprint<R>(rng: &mut R, camera: WorldPoint) -> GrassBlueprint
where
    R: Rng + ?Sized,
{
    let variant = rng.gen_range(0..GRASS_VARIANTS);
    let origin = place_off_camera(rng, camera, GRASS_WIDTH, GRASS_HEIGHT);
    GrassBlueprint { origin, variant }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omega_squirrel_core::WorldRect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rival_blueprints_stay_within_draw_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let camera = WorldPoint::new(-300, 40);

        for _ in 0..500 {
            let blueprint = rival_blueprint(&mut rng, camera);
            assert!((5..=105).contains(&blueprint.width));
            assert!((5..=105).contains(&blueprint.height));
            assert!((3..=7).contains(&blueprint.velocity.dx().abs()));
            assert!((3..=7).contains(&blueprint.velocity.dy().abs()));
            assert!((10..=18).contains(&blueprint.bounce.rate()));
            assert!((10..=50).contains(&blueprint.bounce.height()));
            assert!(!blueprint
                .footprint()
                .overlaps(&WorldRect::viewport_at(camera)));
        }
    }

    #[test]
    fn grass_variants_cover_the_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = [false; GRASS_VARIANTS as usize];
        for _ in 0..200 {
            seen[usize::from(grass_blueprint(&mut rng, WorldPoint::ORIGIN).variant)] = true;
        }
        assert!(seen.iter().all(|seen| *seen));
    }

    #[test]
    fn seed_scatters_grass_on_screen() {
        let streaming = Streaming::default();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let camera = WorldPoint::new(-308, -228);
        let mut out = Vec::new();
        streaming.seed(camera, &mut rng, &mut out);

        assert_eq!(out.len(), INITIAL_GRASS);
        for command in &out {
            let Command::SpawnGrass { blueprint } = command else {
                panic!("unexpected command: {command:?}");
            };
            let footprint = WorldRect::new(blueprint.origin, GRASS_WIDTH, GRASS_HEIGHT);
            assert!(footprint.overlaps(&WorldRect::viewport_at(camera)));
        }
    }
}
