//! Procedural figures for squirrels, grass tufts and the HUD.
//!
//! Everything is built from macroquad primitives so the backend runs without
//! any image assets on disk.

use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_rectangle, draw_rectangle_lines, draw_triangle},
    text::{draw_text, measure_text},
};
use omega_squirrel_core::Facing;
use omega_squirrel_rendering::{
    Color, HealthMeter, SceneGrass, ScreenRect, SessionOverlay, RED, WHITE,
};

use crate::to_macroquad_color;

const FUR: Color = Color::from_rgb_u8(150, 92, 44);
const BELLY: Color = Color::from_rgb_u8(226, 190, 140);
const EYE: Color = Color::from_rgb_u8(20, 12, 8);
const BLADE_SHADES: [Color; 4] = [
    Color::from_rgb_u8(16, 170, 0),
    Color::from_rgb_u8(12, 140, 20),
    Color::from_rgb_u8(40, 190, 30),
    Color::from_rgb_u8(20, 120, 10),
];
const OVERLAY_FONT_SIZE: u16 = 32;
const HINT_OFFSET: f32 = 30.0;

fn mq(point: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(point.x, point.y)
}

/// Horizontal sign pointing where the figure looks.
fn facing_sign(facing: Facing) -> f32 {
    match facing {
        Facing::Left => -1.0,
        Facing::Right => 1.0,
    }
}

/// Where the figure's parts sit inside its rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SquirrelLayout {
    pub(crate) body: ScreenRect,
    pub(crate) head_center: Vec2,
    pub(crate) head_radius: f32,
    pub(crate) tail_center: Vec2,
    pub(crate) tail_radius: f32,
    pub(crate) eye_center: Vec2,
}

impl SquirrelLayout {
    /// Lays a squirrel out inside `rect`, head towards `facing`.
    pub(crate) fn new(rect: ScreenRect, facing: Facing) -> Self {
        let size = rect.size;
        let sign = facing_sign(facing);
        let center = rect.center();

        let body = ScreenRect::new(
            Vec2::new(rect.origin.x + size.x * 0.2, rect.origin.y + size.y * 0.4),
            Vec2::new(size.x * 0.6, size.y * 0.6),
        );
        let head_radius = size.x.min(size.y) * 0.22;
        let head_center = Vec2::new(
            center.x + sign * size.x * 0.28,
            rect.origin.y + size.y * 0.38,
        );
        let tail_radius = size.x.min(size.y) * 0.3;
        let tail_center = Vec2::new(
            center.x - sign * size.x * 0.22,
            rect.origin.y + size.y * 0.3,
        );
        let eye_center = head_center + Vec2::new(sign * head_radius * 0.4, -head_radius * 0.2);

        Self {
            body,
            head_center,
            head_radius,
            tail_center,
            tail_radius,
            eye_center,
        }
    }
}

pub(crate) fn draw_squirrel(rect: ScreenRect, facing: Facing) {
    let layout = SquirrelLayout::new(rect, facing);
    let fur = to_macroquad_color(FUR);

    draw_circle(
        layout.tail_center.x,
        layout.tail_center.y,
        layout.tail_radius,
        to_macroquad_color(FUR.darken(0.2)),
    );
    draw_rectangle(
        layout.body.origin.x,
        layout.body.origin.y,
        layout.body.size.x,
        layout.body.size.y,
        fur,
    );
    let belly = ScreenRect::new(
        layout.body.origin + layout.body.size * Vec2::new(0.25, 0.3),
        layout.body.size * Vec2::new(0.5, 0.6),
    );
    draw_rectangle(
        belly.origin.x,
        belly.origin.y,
        belly.size.x,
        belly.size.y,
        to_macroquad_color(BELLY),
    );
    draw_circle(
        layout.head_center.x,
        layout.head_center.y,
        layout.head_radius,
        fur,
    );
    draw_circle(
        layout.eye_center.x,
        layout.eye_center.y,
        (layout.head_radius * 0.2).max(1.0),
        to_macroquad_color(EYE),
    );
}

/// Blades of a tuft as triangles, varying with the variant index.
pub(crate) fn grass_blades(grass: &SceneGrass) -> Vec<[Vec2; 3]> {
    let rect = grass.rect;
    let blades = 3 + usize::from(grass.variant % 3);
    let base_y = rect.origin.y + rect.size.y;
    let spacing = rect.size.x / (blades as f32 + 1.0);
    let lean = (f32::from(grass.variant) - 1.5) * 4.0;

    (0..blades)
        .map(|index| {
            let x = rect.origin.x + spacing * (index as f32 + 1.0);
            let step = (index + usize::from(grass.variant)) % 3;
            let height = rect.size.y * (0.45 + 0.15 * step as f32);
            [
                Vec2::new(x - spacing * 0.3, base_y),
                Vec2::new(x + spacing * 0.3, base_y),
                Vec2::new(x + lean, base_y - height),
            ]
        })
        .collect()
}

pub(crate) fn draw_grass(grass: &SceneGrass) {
    let shade = BLADE_SHADES[usize::from(grass.variant) % BLADE_SHADES.len()];
    let color = to_macroquad_color(shade);
    for [first, second, third] in grass_blades(grass) {
        draw_triangle(mq(first), mq(second), mq(third), color);
    }
}

pub(crate) fn draw_health_meter(meter: &HealthMeter) {
    let red = to_macroquad_color(RED);
    let white = to_macroquad_color(WHITE);
    for (rect, filled) in meter.slot_rects() {
        if filled {
            draw_rectangle(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y, red);
        }
        draw_rectangle_lines(
            rect.origin.x,
            rect.origin.y,
            rect.size.x,
            rect.size.y,
            1.0,
            white,
        );
    }
}

fn draw_centered_text(text: &str, center: Vec2) {
    let dimensions = measure_text(text, None, OVERLAY_FONT_SIZE, 1.0);
    draw_text(
        text,
        center.x - dimensions.width / 2.0,
        center.y + dimensions.height / 2.0,
        f32::from(OVERLAY_FONT_SIZE),
        to_macroquad_color(WHITE),
    );
}

pub(crate) fn draw_overlay(overlay: SessionOverlay, viewport: Vec2) {
    let center = viewport * 0.5;
    draw_centered_text(overlay.headline(), center);
    if let Some(hint) = overlay.hint() {
        draw_centered_text(hint, center + Vec2::new(0.0, HINT_OFFSET));
    }
}
