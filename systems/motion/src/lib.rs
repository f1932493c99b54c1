#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that makes rivals wander by occasionally redrawing their velocity.

use log::trace;
use omega_squirrel_core::{
    Command, Event, RivalView, Velocity, DIRECTION_CHANGE_PERCENT, RIVAL_MAX_SPEED,
    RIVAL_MIN_SPEED,
};
use rand::Rng;

/// Configuration parameters required to construct the motion system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    change_percent: u32,
    min_speed: i32,
    max_speed: i32,
}

impl Config {
    /// Creates a configuration from a per-tick direction change chance and a speed band.
    #[must_use]
    pub const fn new(change_percent: u32, min_speed: i32, max_speed: i32) -> Self {
        Self {
            change_percent,
            min_speed,
            max_speed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DIRECTION_CHANGE_PERCENT, RIVAL_MIN_SPEED, RIVAL_MAX_SPEED)
    }
}

/// Pure system that reacts to ticks and emits rival steering commands.
#[derive(Debug, Default)]
pub struct Motion {
    config: Config,
}

impl Motion {
    /// Creates a new motion system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Rolls one independent direction change per rival for every elapsed tick.
    pub fn handle<R>(
        &mut self,
        events: &[Event],
        rivals: &RivalView,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        let ticks = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();

        for _ in 0..ticks {
            for rival in rivals.iter() {
                if rng.gen_range(0..100) >= self.config.change_percent {
                    continue;
                }

                let velocity = Velocity::random(rng, self.config.min_speed, self.config.max_speed);
                trace!("rival {} turns to {velocity:?}", rival.id.get());
                out.push(Command::SteerRival {
                    rival: rival.id,
                    velocity,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omega_squirrel_core::{BounceProfile, RivalId, RivalSnapshot, WorldPoint};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn view(count: u32) -> RivalView {
        RivalView::from_snapshots(
            (0..count)
                .map(|id| RivalSnapshot {
                    id: RivalId::new(id),
                    origin: WorldPoint::new(0, 0),
                    width: 10,
                    height: 10,
                    velocity: Velocity::new(3, 3),
                    bounce_phase: 0,
                    bounce: BounceProfile::new(10, 10),
                })
                .collect(),
        )
    }

    #[test]
    fn ignores_batches_without_ticks() {
        let mut motion = Motion::new(Config::new(100, 3, 7));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut out = Vec::new();

        motion.handle(&[], &view(5), &mut rng, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn certain_change_steers_every_rival_within_speed_band() {
        let mut motion = Motion::new(Config::new(100, 3, 7));
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut out = Vec::new();

        motion.handle(
            &[Event::TimeAdvanced {
                dt: std::time::Duration::from_millis(33),
            }],
            &view(4),
            &mut rng,
            &mut out,
        );

        assert_eq!(out.len(), 4);
        for command in &out {
            match command {
                Command::SteerRival { velocity, .. } => {
                    assert!((3..=7).contains(&velocity.dx().abs()));
                    assert!((3..=7).contains(&velocity.dy().abs()));
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }
}
