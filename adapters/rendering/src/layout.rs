//! Fixed canvas geometry shared by every backend.
//!
//! Coordinates are expressed on an 800×415 canvas with the origin in the top
//! left corner. Backends scale the canvas uniformly to fit their window.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use photosynthesis_core::CONTAINER_SIZE;

/// Width of the logical canvas.
pub const CANVAS_WIDTH: f32 = 800.0;
/// Height of the logical canvas.
pub const CANVAS_HEIGHT: f32 = 415.0;

/// Right margin applied to the readout column.
const ADJUST_RIGHT: f32 = 30.0;
/// Downward offset applied to the readout column.
const ADJUST_DOWN: f32 = 90.0;

/// Center of the light bulb.
pub const BULB_CENTER: Vec2 = Vec2::new(680.0 + ADJUST_RIGHT, 60.0 + ADJUST_DOWN);
/// Diameter of the bulb glass.
pub const BULB_DIAMETER: f32 = 100.0;
/// Outline thickness of the bulb glass.
pub const BULB_OUTLINE: f32 = 7.0;
/// Size of the square socket drawn below the bulb.
pub const SOCKET_SIZE: f32 = 50.0;

/// Top-left corner of the bulb socket.
#[must_use]
pub fn socket_origin() -> Vec2 {
    BULB_CENTER + Vec2::new(-SOCKET_SIZE / 2.0, 40.0)
}

/// Width of the border stroked around the plant container.
pub const CONTAINER_BORDER: f32 = 10.0;

/// Bounds of the plant container as `(origin, size)`.
#[must_use]
pub fn container_bounds() -> (Vec2, Vec2) {
    (Vec2::ZERO, Vec2::splat(CONTAINER_SIZE))
}

/// Corner radii of the container border: top left, top right, bottom right, bottom left.
pub const CONTAINER_CORNER_RADII: [f32; 4] = [3.0, 6.0, 12.0, 18.0];

/// Closed outline of a rectangle whose corners are rounded individually.
///
/// Points run clockwise starting on the left edge just below the top-left
/// corner. Each corner contributes `segments + 1` points; radii are limited to
/// half the shorter side.
#[must_use]
pub fn rounded_outline(origin: Vec2, size: Vec2, radii: [f32; 4], segments: usize) -> Vec<Vec2> {
    let segments = segments.max(1);
    let max_radius = size.min_element() / 2.0;
    let corners = [
        (origin, Vec2::new(1.0, 1.0), PI),
        (origin + Vec2::new(size.x, 0.0), Vec2::new(-1.0, 1.0), PI + FRAC_PI_2),
        (origin + size, Vec2::new(-1.0, -1.0), 0.0),
        (origin + Vec2::new(0.0, size.y), Vec2::new(1.0, -1.0), FRAC_PI_2),
    ];

    let mut outline = Vec::with_capacity(corners.len() * (segments + 1));
    for ((corner, inward, start), radius) in corners.into_iter().zip(radii) {
        let radius = radius.clamp(0.0, max_radius);
        let center = corner + inward * radius;
        for step in 0..=segments {
            let angle = start + FRAC_PI_2 * step as f32 / segments as f32;
            outline.push(center + Vec2::new(angle.cos(), angle.sin()) * radius);
        }
    }
    outline
}

/// Diameter of a rendered bubble.
pub const BUBBLE_DIAMETER: f32 = 4.0;

/// Top-left corner of the readout panel frame.
pub const PANEL_ORIGIN: Vec2 = Vec2::new(425.0 + ADJUST_RIGHT, ADJUST_DOWN);
/// Size of the readout panel frame.
pub const PANEL_SIZE: Vec2 = Vec2::new(320.0, 165.0);
/// Horizontal position of the divider splitting the panel.
pub const PANEL_DIVIDER_X: f32 = 615.0 + ADJUST_RIGHT;

/// Text size used for readout labels.
pub const LABEL_TEXT_SIZE: f32 = 18.0;
/// Text size used for readout values.
pub const VALUE_TEXT_SIZE: f32 = 20.0;
/// Text size used for the countdown digits.
pub const COUNTDOWN_TEXT_SIZE: f32 = 42.0;
/// Text size used for the countdown captions.
pub const CAPTION_TEXT_SIZE: f32 = 12.0;

/// Baseline of the first readout row.
pub const FIRST_ROW_BASELINE: f32 = 50.0 + ADJUST_DOWN;
/// Vertical spacing between readout rows.
pub const ROW_SPACING: f32 = 30.0;
/// Left edge of the readout labels.
pub const LABEL_X: f32 = 435.0 + ADJUST_RIGHT;

/// Baseline of the readout row with the provided index.
#[must_use]
pub fn row_baseline(row: usize) -> f32 {
    FIRST_ROW_BASELINE + ROW_SPACING * row as f32
}

/// Readout rows in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadoutRow {
    /// Carbon dioxide level.
    Co2,
    /// Light level.
    Light,
    /// Filter colour.
    Filter,
    /// Bubbles counted at the surface.
    BubbleCount,
}

impl ReadoutRow {
    /// Every row in display order.
    pub const ALL: [ReadoutRow; 4] = [Self::Co2, Self::Light, Self::Filter, Self::BubbleCount];

    /// Zero-based position of the row within the panel.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Co2 => 0,
            Self::Light => 1,
            Self::Filter => 2,
            Self::BubbleCount => 3,
        }
    }

    /// Left edge of the value printed after the label.
    #[must_use]
    pub const fn value_x(self) -> f32 {
        let x = match self {
            Self::Co2 => 484.0,
            Self::Light => 501.0,
            Self::Filter => 509.0,
            Self::BubbleCount => 587.0,
        };
        x + ADJUST_RIGHT
    }
}

/// Baseline origin of the countdown digits.
pub const COUNTDOWN_ORIGIN: Vec2 = Vec2::new(550.0 + ADJUST_RIGHT, 300.0 + ADJUST_DOWN);
/// Baseline origin of the unit caption.
pub const UNIT_CAPTION_ORIGIN: Vec2 = Vec2::new(610.0 + ADJUST_RIGHT, 285.0 + ADJUST_DOWN);
/// Baseline origin of the "remaining" caption.
pub const REMAINING_CAPTION_ORIGIN: Vec2 = Vec2::new(610.0 + ADJUST_RIGHT, 300.0 + ADJUST_DOWN);
