#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision detection between the player and rivals.
//!
//! This system only finds overlaps. Whether a contact means eating, damage or
//! nothing is decided by the world when it applies each
//! [`Command::ResolveContact`], in the order they are emitted here.

use log::trace;
use omega_squirrel_core::{Command, Event, PlayerSnapshot, RivalView, SessionPhase};

/// Pure system that emits a contact for every rival touching the player.
#[derive(Debug, Default)]
pub struct Collision;

impl Collision {
    /// Creates a new collision system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Tests the bounced player against every bounced rival in store order.
    ///
    /// Contacts are only reported while the session is playing.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: SessionPhase,
        player: &PlayerSnapshot,
        rivals: &RivalView,
        out: &mut Vec<Command>,
    ) {
        if !phase.is_playing() {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let player_rect = player.rendered_rect();
        for rival in rivals.iter() {
            if player_rect.overlaps(&rival.rendered_rect()) {
                trace!("player touches rival {}", rival.id.get());
                out.push(Command::ResolveContact { rival: rival.id });
            }
        }
    }
}
