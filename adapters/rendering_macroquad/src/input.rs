//! Keyboard decoding into player intents.

use macroquad::input::{is_key_pressed, is_key_released, KeyCode};
use omega_squirrel_core::Heading;
use omega_squirrel_rendering::{FrameInput, InputIntent};

/// Keys the backend listens to, with the heading each one steers.
const MOVEMENT_KEYS: [(KeyCode, Heading); 8] = [
    (KeyCode::Left, Heading::Left),
    (KeyCode::A, Heading::Left),
    (KeyCode::Right, Heading::Right),
    (KeyCode::D, Heading::Right),
    (KeyCode::Up, Heading::Up),
    (KeyCode::W, Heading::Up),
    (KeyCode::Down, Heading::Down),
    (KeyCode::S, Heading::Down),
];

/// Edge of a key transition observed during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyEdge {
    Pressed,
    Released,
}

/// Translates a single key transition into an intent, if the key is bound.
pub(crate) fn intent_for_key(key: KeyCode, edge: KeyEdge) -> Option<InputIntent> {
    if let Some((_, heading)) = MOVEMENT_KEYS.iter().find(|(bound, _)| *bound == key) {
        return Some(InputIntent::Move {
            heading: *heading,
            engaged: edge == KeyEdge::Pressed,
        });
    }

    match (key, edge) {
        (KeyCode::R, KeyEdge::Pressed) => Some(InputIntent::Restart),
        _ => None,
    }
}

/// Whether the player asked to close the game this frame.
pub(crate) fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape)
}

/// Collects this frame's intents from macroquad's keyboard state.
///
/// Presses are reported before releases so a tap shorter than a frame still
/// registers.
pub(crate) fn gather_frame_input() -> FrameInput {
    let mut bound_keys: Vec<KeyCode> = MOVEMENT_KEYS.iter().map(|(key, _)| *key).collect();
    bound_keys.push(KeyCode::R);

    let pressed = bound_keys
        .iter()
        .copied()
        .filter(|key| is_key_pressed(*key))
        .map(|key| (key, KeyEdge::Pressed));
    let released = bound_keys
        .iter()
        .copied()
        .filter(|key| is_key_released(*key))
        .map(|key| (key, KeyEdge::Released));

    frame_input_from_transitions(pressed.chain(released))
}

/// Builds frame input from observed key transitions, dropping unbound keys.
pub(crate) fn frame_input_from_transitions<I>(transitions: I) -> FrameInput
where
    I: IntoIterator<Item = (KeyCode, KeyEdge)>,
{
    FrameInput {
        intents: transitions
            .into_iter()
            .filter_map(|(key, edge)| intent_for_key(key, edge))
            .collect(),
    }
}
