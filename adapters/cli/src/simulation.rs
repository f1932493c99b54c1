//! Fixed-rate session driver that threads commands between the world and systems.

use std::time::Duration;

use log::{debug, info, trace};
use omega_squirrel_core::{Command, Event, TICKS_PER_SECOND};
use omega_squirrel_rendering::InputIntent;
use omega_squirrel_system_camera::Camera;
use omega_squirrel_system_collision::Collision;
use omega_squirrel_system_motion::Motion;
use omega_squirrel_system_streaming::Streaming;
use omega_squirrel_world::{self as world, query, World};
use rand::Rng;

/// Most ticks simulated for a single rendered frame.
const MAX_SUBSTEPS: u32 = 4;

/// Duration of one simulation tick.
pub(crate) fn tick_duration() -> Duration {
    Duration::from_secs(1) / TICKS_PER_SECOND
}

/// Owns the current session and every system that drives it.
#[derive(Debug)]
pub(crate) struct Simulation<R> {
    world: World,
    motion: Motion,
    streaming: Streaming,
    camera: Camera,
    collision: Collision,
    rng: R,
    accumulator: Duration,
    commands: Vec<Command>,
    events: Vec<Event>,
    /// Sessions started so far, including the current one.
    sessions: u32,
}

impl<R: Rng> Simulation<R> {
    /// Starts the first session, drawing all randomness from `rng`.
    pub(crate) fn new(rng: R) -> Self {
        let mut simulation = Self {
            world: World::new(),
            motion: Motion::default(),
            streaming: Streaming::default(),
            camera: Camera::default(),
            collision: Collision::new(),
            rng,
            accumulator: Duration::ZERO,
            commands: Vec::new(),
            events: Vec::new(),
            sessions: 0,
        };
        simulation.start_session();
        simulation
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Forwards decoded input to the world.
    pub(crate) fn handle_input(&mut self, intents: &[InputIntent]) {
        for intent in intents {
            let command = match *intent {
                InputIntent::Move { heading, engaged } => Command::Steer { heading, engaged },
                InputIntent::Restart => Command::Restart,
            };
            self.commands.push(command);
            let _ = self.settle();
        }
    }

    /// Runs as many fixed ticks as the elapsed frame time covers.
    pub(crate) fn advance(&mut self, frame_dt: Duration) {
        let tick = tick_duration();
        self.accumulator = self.accumulator.saturating_add(frame_dt);

        let mut substeps = 0;
        while self.accumulator >= tick && substeps < MAX_SUBSTEPS {
            self.accumulator -= tick;
            substeps += 1;
            self.step(tick);
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= tick {
            trace!("dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
    }

    /// Runs one tick: the clock first, then each system against fresh snapshots.
    pub(crate) fn step(&mut self, dt: Duration) {
        self.commands.push(Command::Tick { dt });
        if self.settle() {
            return;
        }
        let ticked = std::mem::take(&mut self.events);

        self.motion.handle(
            &ticked,
            &query::rival_view(&self.world),
            &mut self.rng,
            &mut self.commands,
        );
        if self.settle() {
            return;
        }

        self.streaming.handle(
            &ticked,
            query::camera(&self.world),
            &query::rival_view(&self.world),
            &query::grass_view(&self.world),
            &mut self.rng,
            &mut self.commands,
        );
        if self.settle() {
            return;
        }

        self.camera.handle(
            &ticked,
            query::camera(&self.world),
            &query::player(&self.world),
            &mut self.commands,
        );
        if self.settle() {
            return;
        }

        self.collision.handle(
            &ticked,
            query::phase(&self.world),
            &query::player(&self.world),
            &query::rival_view(&self.world),
            &mut self.commands,
        );
        let _ = self.settle();
    }

    /// Applies queued commands and starts a fresh session if they ended this one.
    ///
    /// Returns whether a fresh session was started.
    fn settle(&mut self) -> bool {
        let ended = self.flush();
        if ended {
            self.start_session();
        }
        ended
    }

    /// Applies queued commands, reporting whether the session ended.
    fn flush(&mut self) -> bool {
        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        let mut ended = false;
        for event in &self.events {
            match event {
                Event::PhaseChanged { phase } => debug!("phase changed to {phase:?}"),
                Event::SessionEnded { reason } => {
                    info!("session {} ended: {reason:?}", self.sessions);
                    ended = true;
                }
                _ => {}
            }
        }
        ended
    }

    /// Replaces the world with a fresh session and scatters its opening grass.
    ///
    /// Held keys are not carried over; the player starts the new session standing still.
    fn start_session(&mut self) {
        self.world = World::new();
        self.sessions += 1;
        self.accumulator = Duration::ZERO;
        info!("starting session {}", self.sessions);

        self.streaming
            .seed(query::camera(&self.world), &mut self.rng, &mut self.commands);
        let _ = self.flush();
    }
}
