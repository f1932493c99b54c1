//! Placement of freshly streamed entities around the camera.

use log::debug;
use omega_squirrel_core::{WorldPoint, WorldRect, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use rand::Rng;

/// Candidate positions drawn before giving up on random placement.
pub const PLACEMENT_ATTEMPTS: usize = 64;

/// Region in which entities are kept alive: the viewport grown by one
/// viewport on every side.
#[must_use]
pub fn active_area(camera: WorldPoint) -> WorldRect {
    WorldRect::new(
        camera.offset(-VIEWPORT_WIDTH, -VIEWPORT_HEIGHT),
        3 * VIEWPORT_WIDTH as u32,
        3 * VIEWPORT_HEIGHT as u32,
    )
}

/// Picks a top-left corner for a `width`×`height` box inside the active area
/// but outside the viewport.
///
/// Candidates are drawn uniformly from the active area. If every attempt
/// lands on screen the box is parked flush against the viewport's left edge,
/// or its right edge when the world ends to the left.
pub fn place_off_camera<R>(rng: &mut R, camera: WorldPoint, width: u32, height: u32) -> WorldPoint
where
    R: Rng + ?Sized,
{
    let viewport = WorldRect::viewport_at(camera);
    let x_range =
        camera.x().saturating_sub(VIEWPORT_WIDTH)..camera.x().saturating_add(2 * VIEWPORT_WIDTH);
    let y_range =
        camera.y().saturating_sub(VIEWPORT_HEIGHT)..camera.y().saturating_add(2 * VIEWPORT_HEIGHT);

    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = WorldPoint::new(
            rng.gen_range(x_range.clone()),
            rng.gen_range(y_range.clone()),
        );
        if !WorldRect::new(candidate, width, height).overlaps(&viewport) {
            return candidate;
        }
    }

    let mut fallback = camera.offset(-(width as i32), 0);
    if WorldRect::new(fallback, width, height).overlaps(&viewport) {
        // Pinned against the world's left edge.
        fallback = camera.offset(VIEWPORT_WIDTH, 0);
    }
    debug!(
        "no off-camera spot for {width}x{height} after {PLACEMENT_ATTEMPTS} attempts, using {fallback:?}"
    );
    fallback
}

/// Picks a top-left corner uniformly inside the viewport.
pub fn place_on_camera<R>(rng: &mut R, camera: WorldPoint) -> WorldPoint
where
    R: Rng + ?Sized,
{
    camera.offset(
        rng.gen_range(0..VIEWPORT_WIDTH),
        rng.gen_range(0..VIEWPORT_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::mock::StepRng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn active_area_surrounds_viewport() {
        let area = active_area(WorldPoint::new(100, -50));
        assert_eq!(area.origin(), WorldPoint::new(-540, -530));
        assert_eq!(area.width(), 1_920);
        assert_eq!(area.height(), 1_440);
        assert_eq!(area.center(), WorldRect::viewport_at(WorldPoint::new(100, -50)).center());
    }

    #[test]
    fn exhausted_attempts_fall_back_beside_viewport() {
        // Always draws the low end of each range, which lands on screen for this box.
        let mut rng = StepRng::new(0, 0);
        let camera = WorldPoint::new(10, 20);
        let spot = place_off_camera(&mut rng, camera, 700, 500);

        assert_eq!(spot, WorldPoint::new(-690, 20));
        assert!(!WorldRect::new(spot, 700, 500).overlaps(&WorldRect::viewport_at(camera)));
    }

    #[test]
    fn fallback_switches_sides_at_the_left_edge_of_the_world() {
        let mut rng = StepRng::new(0, 0);
        let camera = WorldPoint::new(i32::MIN, 0);
        let spot = place_off_camera(&mut rng, camera, 700, 500);

        assert_eq!(spot, WorldPoint::new(i32::MIN + VIEWPORT_WIDTH, 0));
        assert!(!WorldRect::new(spot, 700, 500).overlaps(&WorldRect::viewport_at(camera)));
    }

    #[test]
    fn placement_clamps_at_the_edges_of_the_world() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cameras = [
            WorldPoint::new(i32::MAX - 100, i32::MAX - 100),
            WorldPoint::new(i32::MAX, i32::MAX),
            WorldPoint::new(i32::MIN, i32::MIN),
            WorldPoint::new(i32::MIN + 100, i32::MAX - 100),
        ];

        for camera in cameras {
            for _ in 0..50 {
                let spot = place_off_camera(&mut rng, camera, 40, 30);
                assert!(!WorldRect::new(spot, 40, 30).overlaps(&WorldRect::viewport_at(camera)));
            }
        }
    }

    proptest! {
        #[test]
        fn placement_never_overlaps_viewport(
            seed in any::<u64>(),
            camx in -10_000i32..10_000,
            camy in -10_000i32..10_000,
            width in 1u32..120,
            height in 1u32..120,
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let camera = WorldPoint::new(camx, camy);
            let spot = place_off_camera(&mut rng, camera, width, height);
            let footprint = WorldRect::new(spot, width, height);

            prop_assert!(!footprint.overlaps(&WorldRect::viewport_at(camera)));
            prop_assert!(footprint.overlaps(&active_area(camera)));
        }

        #[test]
        fn on_camera_placement_is_visible(seed in any::<u64>(), camx in -5_000i32..5_000, camy in -5_000i32..5_000) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let camera = WorldPoint::new(camx, camy);
            let spot = place_on_camera(&mut rng, camera);
            prop_assert!(WorldRect::new(spot, 1, 1).overlaps(&WorldRect::viewport_at(camera)));
        }
    }
}
