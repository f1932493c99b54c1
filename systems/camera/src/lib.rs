#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Lazy follow camera that keeps the player near the middle of the screen.

use omega_squirrel_core::{
    Command, Event, PlayerSnapshot, WorldPoint, CAMERA_SLACK, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};

/// Returns the camera origin after reacting to the player's center.
///
/// Each axis is handled on its own. While the player stays within `slack` of
/// the viewport centerline the axis is left alone; once it strays further the
/// camera snaps so the player sits exactly `slack` away.
#[must_use]
pub fn follow(camera: WorldPoint, player_center: WorldPoint, slack: i32) -> WorldPoint {
    WorldPoint::new(
        follow_axis(camera.x(), player_center.x(), VIEWPORT_WIDTH / 2, slack),
        follow_axis(camera.y(), player_center.y(), VIEWPORT_HEIGHT / 2, slack),
    )
}

fn follow_axis(camera: i32, player: i32, half_extent: i32, slack: i32) -> i32 {
    let centerline = camera + half_extent;
    if centerline - player > slack {
        player + slack - half_extent
    } else if player - centerline > slack {
        player - slack - half_extent
    } else {
        camera
    }
}

/// Pure system that repositions the viewport after the player moves.
#[derive(Debug)]
pub struct Camera {
    slack: i32,
}

impl Camera {
    /// Creates a camera system that tolerates `slack` pixels of drift per axis.
    #[must_use]
    pub const fn new(slack: i32) -> Self {
        Self { slack }
    }

    /// Emits a camera move when a tick left the player outside the dead zone.
    pub fn handle(
        &mut self,
        events: &[Event],
        camera: WorldPoint,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let origin = follow(camera, player.center(), self.slack);
        if origin != camera {
            out.push(Command::MoveCamera { origin });
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CAMERA_SLACK)
    }
}
