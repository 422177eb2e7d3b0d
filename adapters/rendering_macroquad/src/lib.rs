#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the photosynthesis simulation.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

mod plant;

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    input::{is_key_pressed, KeyCode},
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_circle_lines, draw_line, draw_rectangle, draw_rectangle_lines},
    text::draw_text,
    texture::{draw_texture_ex, DrawTextureParams, Texture2D},
};
use photosynthesis_rendering::{
    layout, palette, Color, Presentation, RenderingBackend, Scene,
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use self::plant::PlantImage;

#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to close the window.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    plant_image: Option<PathBuf>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Draws the picture at `path` inside the plant container instead of the bundled waterweed.
    #[must_use]
    pub fn with_plant_image<P>(mut self, path: Option<P>) -> Self
    where
        P: AsRef<Path>,
    {
        self.plant_image = path.map(|path| path.as_ref().to_path_buf());
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            plant_image,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let plant_source = plant_image
            .as_deref()
            .map_or_else(|| "bundled".to_owned(), |path| path.display().to_string());
        let plant_image = match plant_image.as_deref() {
            Some(path) => PlantImage::read(path)?,
            None => PlantImage::bundled(),
        };

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: layout::CANVAS_WIDTH as i32,
            window_height: layout::CANVAS_HEIGHT as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        log::info!(
            "starting macroquad backend ({}x{}, plant image: {plant_source})",
            config.window_width,
            config.window_height,
        );

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let plant_texture = plant_image.into_texture();
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, &mut scene);

                let metrics = CanvasMetrics::from_screen(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );

                draw_bulb(&scene, &metrics);
                draw_plant(&plant_texture, &metrics);
                draw_text_items(&scene, &metrics);
                draw_filter_overlay(&scene, &metrics);
                draw_bubbles(&scene, &metrics);
                draw_panel_frame(&metrics);

                macroquad::window::next_frame().await;
            }
        });

        log::info!("macroquad backend closed");
        Ok(())
    }
}

/// Straight pieces used to approximate each rounded container corner.
const CORNER_SEGMENTS: usize = 6;

/// Uniform scale and letterbox offset mapping canvas units onto the window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CanvasMetrics {
    scale: f32,
    offset: Vec2,
}

impl CanvasMetrics {
    fn from_screen(screen_width: f32, screen_height: f32) -> Self {
        let scale = (screen_width / layout::CANVAS_WIDTH)
            .min(screen_height / layout::CANVAS_HEIGHT)
            .max(0.0);
        let scaled = Vec2::new(layout::CANVAS_WIDTH, layout::CANVAS_HEIGHT) * scale;
        let offset = ((Vec2::new(screen_width, screen_height) - scaled) * 0.5).max(Vec2::ZERO);

        Self { scale, offset }
    }

    fn point(&self, canvas: Vec2) -> Vec2 {
        self.offset + canvas * self.scale
    }

    fn length(&self, canvas: f32) -> f32 {
        canvas * self.scale
    }

    /// Stroke widths never collapse below a single pixel.
    fn stroke(&self, canvas: f32) -> f32 {
        self.length(canvas).max(1.0)
    }
}

fn draw_bulb(scene: &Scene, metrics: &CanvasMetrics) {
    let center = metrics.point(layout::BULB_CENTER);
    let radius = metrics.length(layout::BULB_DIAMETER / 2.0);
    let socket = to_macroquad_color(palette::SOCKET);

    draw_circle(
        center.x,
        center.y,
        radius,
        to_macroquad_color(scene.filter_tint()),
    );
    draw_circle_lines(
        center.x,
        center.y,
        radius,
        metrics.stroke(layout::BULB_OUTLINE),
        socket,
    );

    let origin = metrics.point(layout::socket_origin());
    let size = metrics.length(layout::SOCKET_SIZE);
    draw_rectangle(origin.x, origin.y, size, size, socket);
}

fn draw_plant(texture: &Texture2D, metrics: &CanvasMetrics) {
    let (origin, size) = layout::container_bounds();
    let top_left = metrics.point(origin);
    let scaled = size * metrics.scale;

    draw_texture_ex(
        *texture,
        top_left.x,
        top_left.y,
        macroquad::color::WHITE,
        DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(scaled.x, scaled.y)),
            ..DrawTextureParams::default()
        },
    );

    let outline = layout::rounded_outline(
        origin,
        size + Vec2::ONE,
        layout::CONTAINER_CORNER_RADII,
        CORNER_SEGMENTS,
    );
    let thickness = metrics.stroke(layout::CONTAINER_BORDER);
    let color = to_macroquad_color(palette::BACKGROUND);
    for (start, end) in outline.iter().zip(outline.iter().cycle().skip(1)) {
        let start = metrics.point(*start);
        let end = metrics.point(*end);
        draw_line(start.x, start.y, end.x, end.y, thickness, color);
        // Round joins so thick segments meet without notches.
        draw_circle(start.x, start.y, thickness / 2.0, color);
    }
}

fn draw_text_items(scene: &Scene, metrics: &CanvasMetrics) {
    let color = to_macroquad_color(palette::FOREGROUND);
    for item in scene.text_items() {
        let origin = metrics.point(item.origin);
        let _ = draw_text(
            &item.text,
            origin.x,
            origin.y,
            metrics.length(item.size),
            color,
        );
    }
}

fn draw_filter_overlay(scene: &Scene, metrics: &CanvasMetrics) {
    let (origin, size) = layout::container_bounds();
    let origin = metrics.point(origin);
    let size = size * metrics.scale;

    for tint in [scene.filter_tint(), palette::NATURAL_BLUE] {
        draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(tint));
    }
}

fn draw_bubbles(scene: &Scene, metrics: &CanvasMetrics) {
    let color = to_macroquad_color(palette::FOREGROUND);
    let radius = metrics.length(layout::BUBBLE_DIAMETER / 2.0);
    for bubble in scene.bubbles_on_canvas() {
        let center = metrics.point(bubble.position);
        draw_circle(center.x, center.y, radius, color);
    }
}

fn draw_panel_frame(metrics: &CanvasMetrics) {
    let color = to_macroquad_color(palette::FOREGROUND);
    let thickness = metrics.stroke(1.0);
    let origin = metrics.point(layout::PANEL_ORIGIN);
    let size = layout::PANEL_SIZE * metrics.scale;
    draw_rectangle_lines(origin.x, origin.y, size.x, size.y, thickness, color);

    let top = metrics.point(Vec2::new(layout::PANEL_DIVIDER_X, layout::PANEL_ORIGIN.y));
    let bottom = metrics.point(Vec2::new(
        layout::PANEL_DIVIDER_X,
        layout::PANEL_ORIGIN.y + layout::PANEL_SIZE.y,
    ));
    draw_line(top.x, top.y, bottom.x, bottom.y, thickness, color);
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
