//! Outcome of a player/rival contact: eat, get hurt, or shrug it off.

use log::{debug, trace};
use omega_squirrel_core::{Event, RivalId, WIN_SIZE};

use crate::World;

/// Size the player gains from eating a rival covering `area` square pixels.
pub(crate) fn growth_for_area(area: u64) -> u32 {
    (area as f64).powf(0.2).floor() as u32 + 1
}

/// Resolves a single contact against the world's current state.
///
/// Contacts are resolved one at a time, so a hit that opens an
/// invulnerability window protects the player from every later contact in
/// the same tick, while smaller rivals can still be eaten.
pub(crate) fn resolve_contact(world: &mut World, rival_id: RivalId, out_events: &mut Vec<Event>) {
    if !world.session.phase().is_playing() {
        trace!("contact with rival {} ignored outside play", rival_id.get());
        return;
    }

    let Some(rival) = world.rivals.get(rival_id) else {
        trace!("contact with missing rival {}", rival_id.get());
        return;
    };

    let player_rect = world.player.snapshot().rendered_rect();
    if !player_rect.overlaps(&rival.snapshot(rival_id).rendered_rect()) {
        trace!("rival {} no longer touches the player", rival_id.get());
        return;
    }

    let area = rival.area();
    let size = u64::from(world.player.size);

    if area <= size * size {
        let _ = world.rivals.remove(rival_id);
        world.player.size = world.player.size.saturating_add(growth_for_area(area));
        debug!(
            "player ate rival {} (area {area}), size now {}",
            rival_id.get(),
            world.player.size
        );
        out_events.push(Event::RivalEaten {
            rival: rival_id,
            player_size: world.player.size,
        });

        if world.player.size > WIN_SIZE {
            world.session.win(out_events);
        }
    } else if !world.session.phase().is_invulnerable() {
        world.session.begin_invulnerability(out_events);
        world.player.health = world.player.health.saturating_sub(1);
        debug!(
            "rival {} (area {area}) hurt the player, health now {}",
            rival_id.get(),
            world.player.health
        );
        out_events.push(Event::PlayerDamaged {
            rival: rival_id,
            health: world.player.health,
        });

        if world.player.health == 0 {
            world.session.lose(out_events);
        }
    }
}
