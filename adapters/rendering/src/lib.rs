#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for photosynthesis adapters.

pub mod layout;

use anyhow::Result as AnyResult;
use glam::Vec2;
use photosynthesis_core::{
    countdown_seconds, BubbleView, FilterColor, Level, SimulationInputs, RUN_DURATION,
};
use std::time::Duration;

use self::layout::ReadoutRow;

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
        Self::from_rgba_u8(red, green, blue, u8::MAX)
    }

    /// Creates a color from byte RGBA values.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: alpha as f32 / 255.0,
        }
    }
}

/// Colours used throughout the simulation view.
pub mod palette {
    use super::Color;
    use photosynthesis_core::FilterColor;

    /// Canvas background.
    pub const BACKGROUND: Color = Color::from_rgb_u8(0x00, 0x32, 0x62);
    /// Translucent tint of unfiltered water.
    pub const NATURAL_BLUE: Color = Color::from_rgba_u8(0x40, 0xa4, 0xdf, 0x30);
    /// Translucent red filter.
    pub const FILTER_RED: Color = Color::from_rgba_u8(0xff, 0x00, 0x00, 0x30);
    /// Translucent blue filter.
    pub const FILTER_BLUE: Color = Color::from_rgba_u8(0x00, 0x00, 0xff, 0x30);
    /// Translucent green filter.
    pub const FILTER_GREEN: Color = Color::from_rgba_u8(0x00, 0xff, 0x00, 0x30);
    /// Bulb socket and bulb outline.
    pub const SOCKET: Color = Color::from_rgb_u8(35, 35, 35);
    /// Text, panel frame and bubbles.
    pub const FOREGROUND: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);

    /// Translucent tint matching the filter placed in front of the light.
    #[must_use]
    pub const fn filter_tint(filter: FilterColor) -> Color {
        match filter {
            FilterColor::Colorless => NATURAL_BLUE,
            FilterColor::Red => FILTER_RED,
            FilterColor::Blue => FILTER_BLUE,
            FilterColor::Green => FILTER_GREEN,
        }
    }
}

/// Values listed in the readout panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadoutPresentation {
    /// Filter placed in front of the light.
    pub filter: FilterColor,
    /// Light level after clamping.
    pub light: Level,
    /// Co2 level after clamping.
    pub co2: Level,
    /// Bubbles that have reached the surface.
    pub visible_bubbles: u32,
}

impl ReadoutPresentation {
    /// Creates a readout for a freshly configured run.
    #[must_use]
    pub const fn new(inputs: SimulationInputs) -> Self {
        Self {
            filter: inputs.filter,
            light: inputs.light,
            co2: inputs.co2,
            visible_bubbles: 0,
        }
    }

    fn value(&self, row: ReadoutRow) -> String {
        match row {
            ReadoutRow::Co2 => self.co2.to_string(),
            ReadoutRow::Light => self.light.to_string(),
            ReadoutRow::Filter => self.filter.to_string(),
            ReadoutRow::BubbleCount => self.visible_bubbles.to_string(),
        }
    }
}

/// Countdown shown beside the readout panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownPresentation {
    /// Whole seconds left in the run.
    pub seconds: u32,
}

impl CountdownPresentation {
    /// Caption printed under the unit.
    pub const REMAINING: &'static str = "remaining";

    /// Creates a countdown showing the provided number of seconds.
    #[must_use]
    pub const fn new(seconds: u32) -> Self {
        Self { seconds }
    }

    /// Digits padded with a leading space below ten so the layout stays put.
    #[must_use]
    pub fn digits(&self) -> String {
        if self.seconds < 10 {
            format!(" {}", self.seconds)
        } else {
            self.seconds.to_string()
        }
    }

    /// Singular or plural unit caption.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        if self.seconds == 1 {
            "second"
        } else {
            "seconds"
        }
    }
}

/// Bubble positioned on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubblePresentation {
    /// Center of the bubble in canvas units.
    pub position: Vec2,
}

impl BubblePresentation {
    /// Creates a new bubble descriptor.
    #[must_use]
    pub const fn new(position: Vec2) -> Self {
        Self { position }
    }
}

/// Text placed on the canvas with its baseline origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    /// Characters to print.
    pub text: String,
    /// Left end of the baseline in canvas units.
    pub origin: Vec2,
    /// Font size in canvas units.
    pub size: f32,
}

impl TextItem {
    fn new(text: impl Into<String>, origin: Vec2, size: f32) -> Self {
        Self {
            text: text.into(),
            origin,
            size,
        }
    }
}

/// Describes the scene that should be rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Values listed in the readout panel.
    pub readout: ReadoutPresentation,
    /// Countdown shown beside the panel.
    pub countdown: CountdownPresentation,
    /// Bubbles created by the run so far.
    pub bubbles: Vec<BubblePresentation>,
}

impl Scene {
    /// Creates the scene shown before the first frame of a run.
    #[must_use]
    pub fn new(inputs: SimulationInputs) -> Self {
        let seconds = u32::try_from(countdown_seconds(RUN_DURATION, Duration::ZERO).max(0))
            .unwrap_or(u32::MAX);
        Self {
            readout: ReadoutPresentation::new(inputs),
            countdown: CountdownPresentation::new(seconds),
            bubbles: Vec::new(),
        }
    }

    /// Replaces the bubble list with the positions captured in `view`.
    pub fn set_bubbles(&mut self, view: &BubbleView) {
        self.bubbles.clear();
        self.bubbles.extend(
            view.iter()
                .map(|bubble| BubblePresentation::new(Vec2::new(bubble.x, bubble.y))),
        );
    }

    /// Tint drawn over the plant and used to fill the bulb.
    #[must_use]
    pub const fn filter_tint(&self) -> Color {
        palette::filter_tint(self.readout.filter)
    }

    /// Bubbles that overlap the canvas.
    pub fn bubbles_on_canvas(&self) -> impl Iterator<Item = &BubblePresentation> {
        let radius = layout::BUBBLE_DIAMETER / 2.0;
        self.bubbles.iter().filter(move |bubble| {
            let position = bubble.position;
            position.y + radius >= 0.0 && position.y - radius <= layout::CANVAS_HEIGHT
        })
    }

    /// Every piece of text shown on the canvas.
    #[must_use]
    pub fn text_items(&self) -> Vec<TextItem> {
        let first = layout::row_baseline(0);
        let mut items = vec![
            TextItem::new("CO", Vec2::new(layout::LABEL_X, first), layout::LABEL_TEXT_SIZE),
            TextItem::new(
                "2",
                Vec2::new(layout::LABEL_X + 27.0, first + 10.0),
                layout::LABEL_TEXT_SIZE,
            ),
            TextItem::new(
                ":",
                Vec2::new(layout::LABEL_X + 37.0, first),
                layout::LABEL_TEXT_SIZE,
            ),
        ];

        for (label, row) in [
            ("LIGHT:", ReadoutRow::Light),
            ("FILTER:", ReadoutRow::Filter),
            ("BUBBLE COUNT:", ReadoutRow::BubbleCount),
        ] {
            items.push(TextItem::new(
                label,
                Vec2::new(layout::LABEL_X, layout::row_baseline(row.index())),
                layout::LABEL_TEXT_SIZE,
            ));
        }

        for row in ReadoutRow::ALL {
            items.push(TextItem::new(
                self.readout.value(row),
                Vec2::new(row.value_x(), layout::row_baseline(row.index())),
                layout::VALUE_TEXT_SIZE,
            ));
        }

        items.push(TextItem::new(
            self.countdown.digits(),
            layout::COUNTDOWN_ORIGIN,
            layout::COUNTDOWN_TEXT_SIZE,
        ));
        items.push(TextItem::new(
            self.countdown.unit(),
            layout::UNIT_CAPTION_ORIGIN,
            layout::CAPTION_TEXT_SIZE,
        ));
        items.push(TextItem::new(
            CountdownPresentation::REMAINING,
            layout::REMAINING_CAPTION_ORIGIN,
            layout::CAPTION_TEXT_SIZE,
        ));

        items
    }
}

/// Aggregated data required to render a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Behaviour shared by all rendering backends.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and may
    /// mutate the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}
