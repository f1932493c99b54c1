#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Omega Squirrel engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, read immutable snapshots, and
//! respond exclusively with new command batches.

use std::time::Duration;

pub mod geometry;

pub use geometry::{bounce_offset, random_signed_speed, Velocity, WorldPoint, WorldRect};

/// Title shown by adapters that open a window.
pub const WINDOW_TITLE: &str = "Squirrel Eat Squirrel";

/// Number of simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 30;
/// Width of the camera viewport in world units.
pub const VIEWPORT_WIDTH: i32 = 640;
/// Height of the camera viewport in world units.
pub const VIEWPORT_HEIGHT: i32 = 480;
/// Distance the player may stray from the viewport centerline before the camera follows.
pub const CAMERA_SLACK: i32 = 90;

/// Pixels the player travels per tick along each held heading.
pub const PLAYER_MOVE_RATE: i32 = 9;
/// Ticks in a full player bounce; larger is slower.
pub const PLAYER_BOUNCE_RATE: u32 = 6;
/// Peak lift of the player bounce in pixels.
pub const PLAYER_BOUNCE_HEIGHT: u32 = 30;
/// Side length of the player at the start of a session.
pub const PLAYER_START_SIZE: u32 = 25;
/// Player size that must be exceeded to win.
pub const WIN_SIZE: u32 = 300;
/// Health the player starts each session with.
pub const MAX_HEALTH: u8 = 3;
/// Time the player ignores damage after being hit.
pub const INVULNERABLE_DURATION: Duration = Duration::from_secs(2);
/// Time the game-over overlay stays up before the session ends.
pub const GAME_OVER_DURATION: Duration = Duration::from_secs(4);
/// Interval at which an invulnerable player toggles visibility.
pub const FLASH_INTERVAL: Duration = Duration::from_millis(100);

/// Rivals kept alive inside the active area.
pub const RIVAL_POPULATION: usize = 30;
/// Grass tufts kept alive inside the active area.
pub const GRASS_POPULATION: usize = 80;
/// Grass tufts scattered inside the viewport when a session starts.
pub const INITIAL_GRASS: usize = 10;
/// Slowest rival speed per axis.
pub const RIVAL_MIN_SPEED: i32 = 3;
/// Fastest rival speed per axis.
pub const RIVAL_MAX_SPEED: i32 = 7;
/// Percent chance per tick that a rival picks a new direction.
pub const DIRECTION_CHANGE_PERCENT: u32 = 2;
/// Shortest rival bounce cycle in ticks.
pub const RIVAL_MIN_BOUNCE_RATE: u32 = 10;
/// Longest rival bounce cycle in ticks.
pub const RIVAL_MAX_BOUNCE_RATE: u32 = 18;
/// Lowest rival bounce peak in pixels.
pub const RIVAL_MIN_BOUNCE_HEIGHT: u32 = 10;
/// Highest rival bounce peak in pixels.
pub const RIVAL_MAX_BOUNCE_HEIGHT: u32 = 50;

/// Width shared by every grass tuft.
pub const GRASS_WIDTH: u32 = 80;
/// Height shared by every grass tuft.
pub const GRASS_HEIGHT: u32 = 80;
/// Number of distinct grass images adapters can choose from.
pub const GRASS_VARIANTS: u8 = 4;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Engages or releases one of the player's movement headings.
    Steer {
        /// Heading affected by the input.
        heading: Heading,
        /// Whether the heading is now held.
        engaged: bool,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Assigns a new velocity to a rival.
    SteerRival {
        /// Rival receiving the new velocity.
        rival: RivalId,
        /// Replacement velocity.
        velocity: Velocity,
    },
    /// Requests that a new rival be added to the world.
    SpawnRival {
        /// Initial state of the rival.
        blueprint: RivalBlueprint,
    },
    /// Requests that a new grass tuft be added to the world.
    SpawnGrass {
        /// Initial state of the grass tuft.
        blueprint: GrassBlueprint,
    },
    /// Removes a rival that left the active area.
    CullRival {
        /// Rival to remove.
        rival: RivalId,
    },
    /// Removes a grass tuft that left the active area.
    CullGrass {
        /// Grass tuft to remove.
        grass: GrassId,
    },
    /// Moves the camera viewport to a new origin.
    MoveCamera {
        /// New top-left corner of the viewport.
        origin: WorldPoint,
    },
    /// Resolves an overlap between the player and a rival.
    ResolveContact {
        /// Rival touching the player.
        rival: RivalId,
    },
    /// Asks the world to end a won session so a new one can begin.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a rival entered the world.
    RivalSpawned {
        /// Identifier assigned to the rival.
        rival: RivalId,
        /// Unbounced footprint of the rival at spawn time.
        footprint: WorldRect,
    },
    /// Confirms that a grass tuft entered the world.
    GrassSpawned {
        /// Identifier assigned to the grass tuft.
        grass: GrassId,
    },
    /// Confirms that a rival left the world without being eaten.
    RivalCulled {
        /// Identifier of the removed rival.
        rival: RivalId,
    },
    /// Confirms that a grass tuft left the world.
    GrassCulled {
        /// Identifier of the removed grass tuft.
        grass: GrassId,
    },
    /// Confirms that a rival changed direction.
    RivalSteered {
        /// Identifier of the rival.
        rival: RivalId,
        /// Orientation derived from the new velocity.
        facing: Facing,
    },
    /// Confirms that the camera viewport moved.
    CameraMoved {
        /// New top-left corner of the viewport.
        origin: WorldPoint,
    },
    /// Reports that the player ate a rival.
    RivalEaten {
        /// Identifier of the eaten rival.
        rival: RivalId,
        /// Player size after growing.
        player_size: u32,
    },
    /// Reports that a larger rival hurt the player.
    PlayerDamaged {
        /// Identifier of the rival that caused the damage.
        rival: RivalId,
        /// Health remaining after the hit.
        health: u8,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: SessionPhase,
    },
    /// Announces that the session is over and a fresh one should be started.
    SessionEnded {
        /// Why the session ended.
        reason: SessionEndReason,
    },
}

/// Movement headings the player can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards decreasing x.
    Left,
    /// Towards increasing x.
    Right,
    /// Towards decreasing y.
    Up,
    /// Towards increasing y.
    Down,
}

/// Horizontal orientation of a squirrel sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Sprite looks towards decreasing x.
    #[default]
    Left,
    /// Sprite looks towards increasing x.
    Right,
}

impl Facing {
    /// Orientation implied by a horizontal velocity: right iff it is positive.
    #[must_use]
    pub const fn from_horizontal_speed(dx: i32) -> Self {
        if dx > 0 {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Unique identifier assigned to a rival.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RivalId(u32);

impl RivalId {
    /// Creates a new rival identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a grass tuft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrassId(u32);

impl GrassId {
    /// Creates a new grass identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Parameters of the periodic vertical bounce animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BounceProfile {
    rate: u32,
    height: u32,
}

impl BounceProfile {
    /// Creates a bounce profile. A zero `rate` is raised to one tick.
    #[must_use]
    pub const fn new(rate: u32, height: u32) -> Self {
        let rate = if rate == 0 { 1 } else { rate };
        Self { rate, height }
    }

    /// Ticks per bounce cycle; smaller bounces faster.
    #[must_use]
    pub const fn rate(&self) -> u32 {
        self.rate
    }

    /// Peak lift in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Lift at the provided phase.
    #[must_use]
    pub fn offset(&self, phase: u32) -> i32 {
        bounce_offset(phase, self.rate, self.height)
    }
}

/// Initial state of a rival requested through [`Command::SpawnRival`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RivalBlueprint {
    /// Top-left corner of the rival in world space.
    pub origin: WorldPoint,
    /// Width of the rival's bounding box.
    pub width: u32,
    /// Height of the rival's bounding box.
    pub height: u32,
    /// Initial per-tick velocity.
    pub velocity: Velocity,
    /// Bounce animation parameters.
    pub bounce: BounceProfile,
}

impl RivalBlueprint {
    /// Unbounced footprint the rival will occupy.
    #[must_use]
    pub const fn footprint(&self) -> WorldRect {
        WorldRect::new(self.origin, self.width, self.height)
    }
}

/// Initial state of a grass tuft requested through [`Command::SpawnGrass`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrassBlueprint {
    /// Top-left corner of the tuft in world space.
    pub origin: WorldPoint,
    /// Index of the image variant adapters should draw.
    pub variant: u8,
}

/// Phase of a single play-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// The player roams freely; damage is ignored while `invulnerable_since` is set.
    Playing {
        /// Session time at which the current invulnerability window opened.
        invulnerable_since: Option<Duration>,
    },
    /// The player ran out of health.
    GameOver {
        /// Session time at which health reached zero.
        since: Duration,
    },
    /// The player outgrew the win threshold.
    Won,
}

impl SessionPhase {
    /// Phase every session starts in.
    pub const START: Self = Self::Playing {
        invulnerable_since: None,
    };

    /// Reports whether the player is still playing, invulnerable or not.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }

    /// Reports whether damage is currently ignored.
    #[must_use]
    pub const fn is_invulnerable(&self) -> bool {
        matches!(
            self,
            Self::Playing {
                invulnerable_since: Some(_)
            }
        )
    }
}

/// Reasons a session can end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionEndReason {
    /// The game-over overlay finished its display time.
    GameOverTimeout,
    /// The player asked for a new game after winning.
    RestartRequested,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Top-left corner of the player's square in world space.
    pub origin: WorldPoint,
    /// Side length of the player's square.
    pub size: u32,
    /// Orientation of the player sprite.
    pub facing: Facing,
    /// Current position within the player bounce cycle.
    pub bounce_phase: u32,
    /// Hits the player can still take.
    pub health: u8,
}

impl PlayerSnapshot {
    /// Unbounced footprint of the player.
    #[must_use]
    pub const fn footprint(&self) -> WorldRect {
        WorldRect::new(self.origin, self.size, self.size)
    }

    /// Footprint lifted by the current bounce, as drawn and as collided.
    #[must_use]
    pub fn rendered_rect(&self) -> WorldRect {
        let lift = bounce_offset(self.bounce_phase, PLAYER_BOUNCE_RATE, PLAYER_BOUNCE_HEIGHT);
        self.footprint().lifted(lift)
    }

    /// Center of the unbounced footprint, used by the camera.
    #[must_use]
    pub const fn center(&self) -> WorldPoint {
        self.footprint().center()
    }
}

/// Immutable representation of a single rival used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RivalSnapshot {
    /// Unique identifier assigned to the rival.
    pub id: RivalId,
    /// Top-left corner of the rival in world space.
    pub origin: WorldPoint,
    /// Width of the rival's bounding box.
    pub width: u32,
    /// Height of the rival's bounding box.
    pub height: u32,
    /// Current per-tick velocity.
    pub velocity: Velocity,
    /// Position within the bounce cycle, always below the bounce rate.
    pub bounce_phase: u32,
    /// Bounce animation parameters.
    pub bounce: BounceProfile,
}

impl RivalSnapshot {
    /// Unbounced footprint of the rival.
    #[must_use]
    pub const fn footprint(&self) -> WorldRect {
        WorldRect::new(self.origin, self.width, self.height)
    }

    /// Footprint lifted by the current bounce, as drawn and as collided.
    #[must_use]
    pub fn rendered_rect(&self) -> WorldRect {
        self.footprint().lifted(self.bounce.offset(self.bounce_phase))
    }

    /// Orientation derived from the horizontal velocity.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        Facing::from_horizontal_speed(self.velocity.dx())
    }

    /// Area of the rival's bounding box.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Read-only snapshot describing all rivals in spawn order.
#[derive(Clone, Debug, Default)]
pub struct RivalView {
    snapshots: Vec<RivalSnapshot>,
}

impl RivalView {
    /// Creates a new rival view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<RivalSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured rival snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &RivalSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured rivals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no rivals were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<RivalSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single grass tuft used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrassSnapshot {
    /// Unique identifier assigned to the tuft.
    pub id: GrassId,
    /// Top-left corner of the tuft in world space.
    pub origin: WorldPoint,
    /// Index of the image variant adapters should draw.
    pub variant: u8,
}

impl GrassSnapshot {
    /// Footprint of the tuft.
    #[must_use]
    pub const fn footprint(&self) -> WorldRect {
        WorldRect::new(self.origin, GRASS_WIDTH, GRASS_HEIGHT)
    }
}

/// Read-only snapshot describing all grass tufts in spawn order.
#[derive(Clone, Debug, Default)]
pub struct GrassView {
    snapshots: Vec<GrassSnapshot>,
}

impl GrassView {
    /// Creates a new grass view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<GrassSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured grass snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &GrassSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured tufts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no tufts were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
