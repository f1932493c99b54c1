//! Integer world geometry and the bounce/velocity helpers shared by systems.

use std::f64::consts::PI;

use rand::Rng;

use crate::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Signed integer coordinate in the unbounded game world.
///
/// World points are never pixel coordinates; adapters convert them to screen
/// space by subtracting the camera origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldPoint {
    x: i32,
    y: i32,
}

impl WorldPoint {
    /// The world origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new world point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate, growing downwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the point shifted by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Axis-aligned rectangle in world coordinates with half-open extents.
///
/// A rectangle covers `x..x + width` and `y..y + height`, so two rectangles
/// that merely share an edge do not overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldRect {
    origin: WorldPoint,
    width: u32,
    height: u32,
}

impl WorldRect {
    /// Creates a rectangle anchored at the provided top-left corner.
    #[must_use]
    pub const fn new(origin: WorldPoint, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Rectangle covered by a viewport whose top-left corner sits at `camera`.
    #[must_use]
    pub const fn viewport_at(camera: WorldPoint) -> Self {
        Self::new(camera, VIEWPORT_WIDTH as u32, VIEWPORT_HEIGHT as u32)
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Leftmost covered column.
    #[must_use]
    pub const fn left(&self) -> i64 {
        self.origin.x as i64
    }

    /// Topmost covered row.
    #[must_use]
    pub const fn top(&self) -> i64 {
        self.origin.y as i64
    }

    /// First column past the right edge.
    #[must_use]
    pub const fn right(&self) -> i64 {
        self.origin.x as i64 + self.width as i64
    }

    /// First row past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i64 {
        self.origin.y as i64 + self.height as i64
    }

    /// Center of the rectangle, rounded towards the top-left.
    #[must_use]
    pub const fn center(&self) -> WorldPoint {
        self.origin
            .offset((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Returns the rectangle moved up by `amount` rows.
    #[must_use]
    pub const fn lifted(self, amount: i32) -> Self {
        Self::new(self.origin.offset(0, -amount), self.width, self.height)
    }

    /// Reports whether the rectangles share any area.
    ///
    /// Empty rectangles never overlap anything.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        if self.width == 0 || self.height == 0 || other.width == 0 || other.height == 0 {
            return false;
        }

        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Signed per-tick displacement of a moving entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    /// Creates a velocity from horizontal and vertical components.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal pixels travelled per tick; negative moves left.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Vertical pixels travelled per tick; negative moves up.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }

    /// Draws both components with [`random_signed_speed`].
    pub fn random<R>(rng: &mut R, min: i32, max: i32) -> Self
    where
        R: Rng + ?Sized,
    {
        let dx = random_signed_speed(rng, min, max);
        let dy = random_signed_speed(rng, min, max);
        Self::new(dx, dy)
    }
}

/// Draws a magnitude uniformly from `min..=max` and a uniformly random sign.
pub fn random_signed_speed<R>(rng: &mut R, min: i32, max: i32) -> i32
where
    R: Rng + ?Sized,
{
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let magnitude = rng.gen_range(low..=high);
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Vertical lift, in pixels, of a bouncing sprite at the given phase.
///
/// Traces one upward arch per cycle: zero at phase 0, peaking near
/// `rate / 2` and back to zero at `rate`. Phases past `rate` are treated as
/// `rate`. The arch is evaluated on the phase folded onto its first half,
/// which keeps the result exactly symmetric.
#[must_use]
pub fn bounce_offset(phase: u32, rate: u32, height: u32) -> i32 {
    if rate == 0 {
        return 0;
    }

    let phase = phase.min(rate);
    let folded = phase.min(rate - phase);
    let angle = PI * f64::from(folded) / f64::from(rate);
    (angle.sin() * f64::from(height)).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rect(x: i32, y: i32, width: u32, height: u32) -> WorldRect {
        WorldRect::new(WorldPoint::new(x, y), width, height)
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let left = rect(0, 0, 10, 10);
        let right = rect(10, 0, 10, 10);
        let below = rect(0, 10, 10, 10);

        assert!(!left.overlaps(&right));
        assert!(!right.overlaps(&left));
        assert!(!left.overlaps(&below));
    }

    #[test]
    fn shared_area_overlaps_in_both_directions() {
        let first = rect(-5, -5, 10, 10);
        let second = rect(4, 4, 3, 3);

        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
    }

    #[test]
    fn contained_rect_overlaps() {
        let outer = rect(0, 0, 100, 100);
        let inner = rect(40, 40, 1, 1);
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn empty_rect_never_overlaps() {
        let outer = rect(0, 0, 100, 100);
        assert!(!outer.overlaps(&rect(10, 10, 0, 5)));
        assert!(!outer.overlaps(&rect(10, 10, 5, 0)));
    }

    #[test]
    fn lifted_moves_rect_up() {
        let lifted = rect(3, 20, 4, 4).lifted(7);
        assert_eq!(lifted.origin(), WorldPoint::new(3, 13));
    }

    #[test]
    fn center_rounds_towards_origin() {
        assert_eq!(rect(0, 0, 25, 25).center(), WorldPoint::new(12, 12));
    }

    #[test]
    fn bounce_offset_handles_zero_rate() {
        assert_eq!(bounce_offset(3, 0, 40), 0);
    }

    #[test]
    fn bounce_offset_peaks_at_half_rate() {
        assert_eq!(bounce_offset(0, 6, 30), 0);
        assert_eq!(bounce_offset(3, 6, 30), 30);
        assert_eq!(bounce_offset(6, 6, 30), 0);
    }

    #[test]
    fn signed_speed_covers_both_signs() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws: Vec<i32> = (0..200)
            .map(|_| random_signed_speed(&mut rng, 3, 7))
            .collect();

        assert!(draws.iter().all(|speed| (3..=7).contains(&speed.abs())));
        assert!(draws.iter().any(|speed| *speed > 0));
        assert!(draws.iter().any(|speed| *speed < 0));
    }

    proptest! {
        #[test]
        fn bounce_offset_stays_within_height(rate in 1u32..64, height in 0u32..200, seed in 0u32..1_000) {
            let phase = seed % rate;
            let offset = bounce_offset(phase, rate, height);
            prop_assert!(offset >= 0);
            prop_assert!(offset <= height as i32);
        }

        #[test]
        fn bounce_offset_is_symmetric(rate in 1u32..64, height in 0u32..200, seed in 0u32..1_000) {
            let phase = seed % rate;
            prop_assert_eq!(
                bounce_offset(phase, rate, height),
                bounce_offset(rate - phase, rate, height)
            );
        }

        #[test]
        fn overlap_is_symmetric(
            ax in -50i32..50, ay in -50i32..50, aw in 0u32..40, ah in 0u32..40,
            bx in -50i32..50, by in -50i32..50, bw in 0u32..40, bh in 0u32..40,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
