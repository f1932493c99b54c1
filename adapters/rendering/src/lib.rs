#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Omega Squirrel adapters.
//!
//! The simulation describes each frame as a [`Scene`] expressed in screen
//! pixels, and a [`RenderingBackend`] draws it and reports what the player
//! pressed through [`FrameInput`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use omega_squirrel_core::{Facing, Heading, WorldPoint, WorldRect};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color darkened towards black by the provided amount.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);

        Self {
            red: self.red * keep,
            green: self.green * keep,
            blue: self.blue * keep,
            alpha: self.alpha,
        }
    }
}

/// Meadow green used to clear every frame.
pub const GRASS_COLOR: Color = Color::from_rgb_u8(24, 255, 0);
/// Text and outline color.
pub const WHITE: Color = Color::from_rgb_u8(255, 255, 255);
/// Fill color of remaining health.
pub const RED: Color = Color::from_rgb_u8(255, 0, 0);

/// Player intent decoded by the adapter from raw input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputIntent {
    /// A movement key went down or up.
    Move {
        /// Heading bound to the key.
        heading: Heading,
        /// Whether the key is now held.
        engaged: bool,
    },
    /// The restart key was pressed.
    Restart,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Intents observed this frame, in the order they happened.
    pub intents: Vec<InputIntent>,
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl ScreenRect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Converts a world rectangle into screen space for the provided camera.
    #[must_use]
    pub fn from_world(rect: WorldRect, camera: WorldPoint) -> Self {
        let origin = rect.origin();
        Self {
            origin: Vec2::new(
                (i64::from(origin.x()) - i64::from(camera.x())) as f32,
                (i64::from(origin.y()) - i64::from(camera.y())) as f32,
            ),
            size: Vec2::new(rect.width() as f32, rect.height() as f32),
        }
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Player sprite placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePlayer {
    /// Bounced rectangle of the player.
    pub rect: ScreenRect,
    /// Direction the sprite looks.
    pub facing: Facing,
    /// Whether the sprite should be drawn this frame.
    pub visible: bool,
}

/// Rival sprite placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRival {
    /// Bounced rectangle of the rival.
    pub rect: ScreenRect,
    /// Direction the sprite looks.
    pub facing: Facing,
}

/// Grass tuft placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneGrass {
    /// Rectangle covered by the tuft.
    pub rect: ScreenRect,
    /// Image variant to draw.
    pub variant: u8,
}

/// Health meter drawn in the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthMeter {
    /// Slots that are still filled.
    pub filled: u8,
    /// Total number of slots.
    pub slots: u8,
}

impl HealthMeter {
    const LEFT: f32 = 15.0;
    const TOP: f32 = 5.0;
    const SLOT_WIDTH: f32 = 20.0;
    const SLOT_HEIGHT: f32 = 10.0;

    /// Creates a meter, clamping `filled` to the slot count.
    #[must_use]
    pub fn new(filled: u8, slots: u8) -> Self {
        Self {
            filled: filled.min(slots),
            slots,
        }
    }

    /// Rectangle of each slot, bottom slot first, paired with whether it is filled.
    #[must_use]
    pub fn slot_rects(&self) -> Vec<(ScreenRect, bool)> {
        (0..self.slots)
            .map(|index| {
                let top = Self::TOP + Self::SLOT_HEIGHT * f32::from(self.slots - index);
                let rect = ScreenRect::new(
                    Vec2::new(Self::LEFT, top),
                    Vec2::new(Self::SLOT_WIDTH, Self::SLOT_HEIGHT),
                );
                (rect, index < self.filled)
            })
            .collect()
    }
}

/// Text overlay shown once the session reaches an outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOverlay {
    /// The player ran out of health.
    GameOver,
    /// The player outgrew the win size.
    Won,
}

impl SessionOverlay {
    /// Main line of the overlay, centered on screen.
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        match self {
            Self::GameOver => "Game Over",
            Self::Won => "You have achieved OMEGA SQUIRREL!",
        }
    }

    /// Secondary line drawn below the headline, if any.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::GameOver => None,
            Self::Won => Some("(Press \"r\" to restart.)"),
        }
    }
}

/// Everything the backend draws for a frame, in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grass tufts, drawn first.
    pub grass: Vec<SceneGrass>,
    /// Rivals, drawn over the grass.
    pub rivals: Vec<SceneRival>,
    /// The player, drawn over rivals.
    pub player: ScenePlayer,
    /// Health meter.
    pub health: HealthMeter,
    /// Outcome overlay, if any.
    pub overlay: Option<SessionOverlay>,
}

impl Scene {
    /// Creates a new scene description.
    #[must_use]
    pub fn new(
        grass: Vec<SceneGrass>,
        rivals: Vec<SceneRival>,
        player: ScenePlayer,
        health: HealthMeter,
        overlay: Option<SessionOverlay>,
    ) -> Self {
        Self {
            grass,
            rivals,
            player,
            health,
            overlay,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Size of the window in pixels.
    pub viewport: Vec2,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RenderingError::InvalidViewport`] unless both viewport
    /// dimensions are positive.
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        viewport: Vec2,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(viewport.x >= 1.0 && viewport.y >= 1.0) {
            return Err(RenderingError::InvalidViewport {
                width: viewport.x,
                height: viewport.y,
            });
        }

        Ok(Self {
            window_title: window_title.into(),
            clear_color,
            viewport,
            scene,
        })
    }
}

/// Rendering backend capable of presenting Omega Squirrel scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and rewrites the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, Error, PartialEq)]
pub enum RenderingError {
    /// The window must cover at least one pixel on each axis.
    #[error("viewport must be at least 1x1 pixels (received {width}x{height})")]
    InvalidViewport {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}
