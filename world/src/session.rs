//! Session phase sequencing: invulnerability, game over, and winning.

use std::time::Duration;

use log::{debug, info, trace};
use omega_squirrel_core::{
    Event, SessionEndReason, SessionPhase, FLASH_INTERVAL, GAME_OVER_DURATION,
    INVULNERABLE_DURATION,
};

/// Clock and phase of a single play-through.
#[derive(Debug)]
pub(crate) struct Session {
    elapsed: Duration,
    phase: SessionPhase,
    ended: Option<SessionEndReason>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            phase: SessionPhase::START,
            ended: None,
        }
    }

    pub(crate) const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub(crate) const fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub(crate) const fn ended(&self) -> Option<SessionEndReason> {
        self.ended
    }

    /// Advances the session clock and expires timed phases.
    pub(crate) fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed = self.elapsed.saturating_add(dt);

        match self.phase {
            SessionPhase::Playing {
                invulnerable_since: Some(since),
            } if self.elapsed.saturating_sub(since) > INVULNERABLE_DURATION => {
                self.enter(SessionPhase::START, out_events);
            }
            SessionPhase::GameOver { since }
                if self.elapsed.saturating_sub(since) > GAME_OVER_DURATION =>
            {
                self.end(SessionEndReason::GameOverTimeout, out_events);
            }
            _ => {}
        }
    }

    /// Opens an invulnerability window starting now.
    pub(crate) fn begin_invulnerability(&mut self, out_events: &mut Vec<Event>) {
        if !self.phase.is_playing() {
            return;
        }

        self.enter(
            SessionPhase::Playing {
                invulnerable_since: Some(self.elapsed),
            },
            out_events,
        );
    }

    pub(crate) fn lose(&mut self, out_events: &mut Vec<Event>) {
        if !self.phase.is_playing() {
            return;
        }

        self.enter(
            SessionPhase::GameOver {
                since: self.elapsed,
            },
            out_events,
        );
    }

    pub(crate) fn win(&mut self, out_events: &mut Vec<Event>) {
        if !self.phase.is_playing() {
            return;
        }

        self.enter(SessionPhase::Won, out_events);
    }

    /// Ends a won session; restart requests in any other phase are dropped.
    pub(crate) fn request_restart(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != SessionPhase::Won {
            trace!("restart ignored in phase {:?}", self.phase);
            return;
        }

        self.end(SessionEndReason::RestartRequested, out_events);
    }

    /// Whether the player sprite should be drawn this frame.
    ///
    /// The sprite is hidden after losing and blinks every
    /// [`FLASH_INTERVAL`] while invulnerable.
    pub(crate) fn player_visible(&self) -> bool {
        match self.phase {
            SessionPhase::GameOver { .. } => false,
            SessionPhase::Playing {
                invulnerable_since: Some(_),
            } => {
                let flashes = self.elapsed.as_millis() / FLASH_INTERVAL.as_millis();
                flashes % 2 == 0
            }
            SessionPhase::Playing { .. } | SessionPhase::Won => true,
        }
    }

    fn enter(&mut self, phase: SessionPhase, out_events: &mut Vec<Event>) {
        debug!(
            "session phase {:?} -> {:?} at {:?}",
            self.phase, phase, self.elapsed
        );
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn end(&mut self, reason: SessionEndReason, out_events: &mut Vec<Event>) {
        if self.ended.is_some() {
            return;
        }

        info!("session ended after {:?}: {reason:?}", self.elapsed);
        self.ended = Some(reason);
        out_events.push(Event::SessionEnded { reason });
    }
}
