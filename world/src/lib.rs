#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Omega Squirrel.
//!
//! A [`World`] covers exactly one session. It owns the player, the camera,
//! and every streamed rival and grass tuft. Systems never touch it directly:
//! they read snapshots through [`query`] and submit [`Command`]s that
//! [`apply`] executes, broadcasting [`Event`]s in response.

mod progression;
mod session;
mod store;

use log::{debug, trace};
use omega_squirrel_core::{
    BounceProfile, Command, Event, Facing, GrassBlueprint, GrassId, GrassSnapshot, Heading,
    PlayerSnapshot, RivalBlueprint, RivalId, RivalSnapshot, SessionPhase, Velocity, WorldPoint,
    GRASS_VARIANTS, MAX_HEALTH, PLAYER_BOUNCE_RATE, PLAYER_MOVE_RATE, PLAYER_START_SIZE,
    VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};

use self::{session::Session, store::EntityStore};

/// Represents the authoritative state of one Omega Squirrel session.
#[derive(Debug)]
pub struct World {
    player: Player,
    camera: WorldPoint,
    rivals: EntityStore<RivalId, Rival>,
    grass: EntityStore<GrassId, Grass>,
    session: Session,
    tick_index: u64,
}

impl World {
    /// Creates a fresh session with the player at the world origin and the
    /// camera centered on it.
    #[must_use]
    pub fn new() -> Self {
        let player = Player::new(WorldPoint::ORIGIN);
        let center = player.snapshot().center();
        let camera = center.offset(-VIEWPORT_WIDTH / 2, -VIEWPORT_HEIGHT / 2);
        debug!("session started with camera at {camera:?}");

        Self {
            player,
            camera,
            rivals: EntityStore::new(),
            grass: EntityStore::new(),
            session: Session::new(),
            tick_index: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session has ended every command is ignored; callers are expected
/// to discard the world and build a new one.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if let Some(reason) = world.session.ended() {
        trace!("ignoring {command:?}: session ended ({reason:?})");
        return;
    }

    match command {
        Command::Steer { heading, engaged } => world.player.steer(heading, engaged),
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            world.session.advance(dt, out_events);
            if world.session.ended().is_some() {
                return;
            }

            if !matches!(world.session.phase(), SessionPhase::GameOver { .. }) {
                world.player.advance();
            }
            for rival in world.rivals.values_mut() {
                rival.advance();
            }
        }
        Command::SteerRival { rival, velocity } => match world.rivals.get_mut(rival) {
            Some(state) => {
                state.velocity = velocity;
                out_events.push(Event::RivalSteered {
                    rival,
                    facing: Facing::from_horizontal_speed(velocity.dx()),
                });
            }
            None => trace!("cannot steer missing rival {}", rival.get()),
        },
        Command::SpawnRival { blueprint } => {
            if blueprint.width == 0 || blueprint.height == 0 {
                trace!("rejecting degenerate rival blueprint {blueprint:?}");
                return;
            }

            let rival = world.rivals.insert(Rival::from_blueprint(blueprint));
            out_events.push(Event::RivalSpawned {
                rival,
                footprint: blueprint.footprint(),
            });
        }
        Command::SpawnGrass { blueprint } => {
            let grass = world.grass.insert(Grass::from_blueprint(blueprint));
            out_events.push(Event::GrassSpawned { grass });
        }
        Command::CullRival { rival } => {
            if world.rivals.remove(rival).is_some() {
                out_events.push(Event::RivalCulled { rival });
            }
        }
        Command::CullGrass { grass } => {
            if world.grass.remove(grass).is_some() {
                out_events.push(Event::GrassCulled { grass });
            }
        }
        Command::MoveCamera { origin } => {
            if origin != world.camera {
                world.camera = origin;
                out_events.push(Event::CameraMoved { origin });
            }
        }
        Command::ResolveContact { rival } => {
            progression::resolve_contact(world, rival, out_events);
        }
        Command::Restart => world.session.request_restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use omega_squirrel_core::{
        GrassView, PlayerSnapshot, RivalView, SessionEndReason, SessionPhase, WorldPoint,
        WorldRect,
    };

    use super::World;

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        world.player.snapshot()
    }

    /// Top-left corner of the camera viewport.
    #[must_use]
    pub fn camera(world: &World) -> WorldPoint {
        world.camera
    }

    /// World-space rectangle currently visible on screen.
    #[must_use]
    pub fn viewport(world: &World) -> WorldRect {
        WorldRect::viewport_at(world.camera)
    }

    /// Captures a read-only view of the rivals roaming the active area.
    #[must_use]
    pub fn rival_view(world: &World) -> RivalView {
        RivalView::from_snapshots(
            world
                .rivals
                .iter()
                .map(|(id, rival)| rival.snapshot(id))
                .collect(),
        )
    }

    /// Captures a read-only view of the grass tufts in the active area.
    #[must_use]
    pub fn grass_view(world: &World) -> GrassView {
        GrassView::from_snapshots(
            world
                .grass
                .iter()
                .map(|(id, grass)| grass.snapshot(id))
                .collect(),
        )
    }

    /// Number of live rivals.
    #[must_use]
    pub fn rival_count(world: &World) -> usize {
        world.rivals.len()
    }

    /// Number of live grass tufts.
    #[must_use]
    pub fn grass_count(world: &World) -> usize {
        world.grass.len()
    }

    /// Current session phase.
    #[must_use]
    pub fn phase(world: &World) -> SessionPhase {
        world.session.phase()
    }

    /// Session time accumulated from ticks.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.session.elapsed()
    }

    /// Number of ticks processed since the session started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Reason the session ended, or `None` while it is still running.
    #[must_use]
    pub fn session_end(world: &World) -> Option<SessionEndReason> {
        world.session.ended()
    }

    /// Whether the player sprite should be drawn this frame.
    #[must_use]
    pub fn player_visible(world: &World) -> bool {
        world.session.player_visible()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Controls {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl Controls {
    const fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

#[derive(Clone, Debug)]
struct Player {
    origin: WorldPoint,
    size: u32,
    facing: Facing,
    bounce_phase: u32,
    health: u8,
    controls: Controls,
}

impl Player {
    fn new(origin: WorldPoint) -> Self {
        Self {
            origin,
            size: PLAYER_START_SIZE,
            facing: Facing::Left,
            bounce_phase: 0,
            health: MAX_HEALTH,
            controls: Controls::default(),
        }
    }

    /// Pressing a heading releases its opposite; horizontal presses turn the sprite.
    fn steer(&mut self, heading: Heading, engaged: bool) {
        let controls = &mut self.controls;
        match (heading, engaged) {
            (Heading::Left, true) => {
                controls.right = false;
                controls.left = true;
                self.facing = Facing::Left;
            }
            (Heading::Right, true) => {
                controls.left = false;
                controls.right = true;
                self.facing = Facing::Right;
            }
            (Heading::Up, true) => {
                controls.down = false;
                controls.up = true;
            }
            (Heading::Down, true) => {
                controls.up = false;
                controls.down = true;
            }
            (Heading::Left, false) => controls.left = false,
            (Heading::Right, false) => controls.right = false,
            (Heading::Up, false) => controls.up = false,
            (Heading::Down, false) => controls.down = false,
        }
    }

    fn advance(&mut self) {
        let controls = self.controls;
        let mut dx = 0;
        let mut dy = 0;
        if controls.left {
            dx -= PLAYER_MOVE_RATE;
        }
        if controls.right {
            dx += PLAYER_MOVE_RATE;
        }
        if controls.up {
            dy -= PLAYER_MOVE_RATE;
        }
        if controls.down {
            dy += PLAYER_MOVE_RATE;
        }
        self.origin = self.origin.offset(dx, dy);

        // A started hop always finishes, even after the keys are released.
        if controls.any() || self.bounce_phase != 0 {
            self.bounce_phase += 1;
        }
        if self.bounce_phase > PLAYER_BOUNCE_RATE {
            self.bounce_phase = 0;
        }
    }

    fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            origin: self.origin,
            size: self.size,
            facing: self.facing,
            bounce_phase: self.bounce_phase,
            health: self.health,
        }
    }
}

#[derive(Clone, Debug)]
struct Rival {
    origin: WorldPoint,
    width: u32,
    height: u32,
    velocity: Velocity,
    bounce_phase: u32,
    bounce: BounceProfile,
}

impl Rival {
    fn from_blueprint(blueprint: RivalBlueprint) -> Self {
        Self {
            origin: blueprint.origin,
            width: blueprint.width,
            height: blueprint.height,
            velocity: blueprint.velocity,
            bounce_phase: 0,
            bounce: blueprint.bounce,
        }
    }

    fn advance(&mut self) {
        self.origin = self
            .origin
            .offset(self.velocity.dx(), self.velocity.dy());
        self.bounce_phase += 1;
        if self.bounce_phase >= self.bounce.rate() {
            self.bounce_phase = 0;
        }
    }

    fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    fn snapshot(&self, id: RivalId) -> RivalSnapshot {
        RivalSnapshot {
            id,
            origin: self.origin,
            width: self.width,
            height: self.height,
            velocity: self.velocity,
            bounce_phase: self.bounce_phase,
            bounce: self.bounce,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Grass {
    origin: WorldPoint,
    variant: u8,
}

impl Grass {
    fn from_blueprint(blueprint: GrassBlueprint) -> Self {
        Self {
            origin: blueprint.origin,
            variant: blueprint.variant % GRASS_VARIANTS,
        }
    }

    fn snapshot(&self, id: GrassId) -> GrassSnapshot {
        GrassSnapshot {
            id,
            origin: self.origin,
            variant: self.variant,
        }
    }
}
