#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Eco Defender.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in headless build environments, so the
//! adapter depends on macroquad without its default `audio` feature.
//!
//! The window is sized to the play field. When it is resized the field is
//! scaled uniformly and centred, and cursor positions are mapped back into
//! field coordinates before they reach the simulation.

mod clock;

pub use self::clock::FrameClock;

use anyhow::Result;
use eco_defender_core::{PlayerAction, TowerKind};
use eco_defender_rendering::{
    Color, EnemyPresentation, FrameInput, LoopControl, Presentation, RenderingBackend, Scene,
    TowerPresentation,
};
use glam::Vec2;
use macroquad::input::{
    get_char_pressed, is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode,
    MouseButton,
};
use std::time::Duration;
use tracing::info;

const ENTITY_FONT_SIZE: f32 = 24.0;
const OVERLAY_FONT_SIZE: f32 = 20.0;

/// Keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `1`, `2` or `3` selects the tower kind to build.
    selection: Option<TowerKind>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let selection = last_selection(std::iter::from_fn(get_char_pressed));

        Self {
            quit_requested,
            selection,
        }
    }
}

/// Tower kind picked by the latest `1`, `2` or `3` in arrival order.
fn last_selection(typed: impl IntoIterator<Item = char>) -> Option<TowerKind> {
    typed
        .into_iter()
        .filter_map(|typed| match typed {
            '1' => Some(TowerKind::Tree),
            '2' => Some(TowerKind::Solar),
            '3' => Some(TowerKind::Recycle),
            _ => None,
        })
        .last()
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend with frame-rate reporting disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether the backend logs the measured frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static,
    {
        let Self { show_fps } = self;
        let frame_budget = presentation.frame_budget();
        let Presentation {
            window_title,
            frame_rate,
            scene,
        } = presentation;

        let config = macroquad::window::Conf {
            window_title,
            window_width: scene.field.width.round() as i32,
            window_height: scene.field.height.round() as i32,
            ..macroquad::window::Conf::default()
        };
        info!(
            width = config.window_width,
            height = config.window_height,
            frame_rate,
            "window_opening"
        );

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut clock = FrameClock::new(frame_budget);
            let mut fps_counter = FpsCounter::default();

            loop {
                let dt = clock.tick();
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    info!("quit_requested");
                    break;
                }

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let metrics = SceneMetrics::from_scene(&scene, screen);
                let (cursor_x, cursor_y) = mouse_position();
                let click = is_mouse_button_pressed(MouseButton::Left)
                    .then_some(Vec2::new(cursor_x, cursor_y));
                let input = gather_frame_input(&scene, &metrics, keyboard, click);

                let control = update_scene(dt, input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen);
                macroquad::window::clear_background(to_macroquad_color(scene.field.background));
                draw_towers(&scene.towers, scene.text_color, &metrics);
                draw_enemies(&scene.enemies, scene.text_color, &metrics);
                draw_overlay(&scene.overlay, scene.text_color, &metrics);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(dt) {
                        info!(fps = per_second, "frame_rate");
                    }
                }

                macroquad::window::next_frame().await;

                if control == LoopControl::Exit {
                    break;
                }
            }
        });

        info!("window_closed");
        Ok(())
    }
}

/// Uniform scale and offset that fit the field inside the window.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen: Vec2) -> Self {
        let field = scene.field.size();
        let scale = (screen.x / field.x).min(screen.y / field.y);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let offset = ((screen - field * scale) * 0.5).max(Vec2::ZERO);

        Self { scale, offset }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        self.offset + position * self.scale
    }

    fn to_field(&self, position: Vec2) -> Vec2 {
        (position - self.offset) / self.scale
    }
}

/// Clicks that land in the letterbox outside the field are ignored.
///
/// Macroquad does not order key presses against mouse clicks, so the frame's
/// selection is always applied before its click.
fn gather_frame_input(
    scene: &Scene,
    metrics: &SceneMetrics,
    keyboard: KeyboardShortcuts,
    click: Option<Vec2>,
) -> FrameInput {
    let mut input = FrameInput::default();
    if let Some(kind) = keyboard.selection {
        input.actions.push(PlayerAction::SelectTower(kind));
    }
    if let Some(point) = click.and_then(|cursor| scene.field.world_point(metrics.to_field(cursor))) {
        input.actions.push(PlayerAction::PlaceAt(point));
    }
    input
}

fn draw_towers(towers: &[TowerPresentation], text_color: Color, metrics: &SceneMetrics) {
    let text_color = to_macroquad_color(text_color);
    for tower in towers {
        let centre = metrics.to_screen(tower.position);
        macroquad::shapes::draw_circle(
            centre.x,
            centre.y,
            tower.radius * metrics.scale,
            to_macroquad_color(tower.color),
        );
        let mut label = [0; 4];
        draw_centred_text(
            tower.label.encode_utf8(&mut label),
            centre,
            ENTITY_FONT_SIZE * metrics.scale,
            text_color,
        );
    }
}

fn draw_enemies(enemies: &[EnemyPresentation], text_color: Color, metrics: &SceneMetrics) {
    let text_color = to_macroquad_color(text_color);
    for enemy in enemies {
        let centre = metrics.to_screen(enemy.position);
        let half = enemy.half_size * metrics.scale;
        macroquad::shapes::draw_rectangle(
            centre.x - half,
            centre.y - half,
            half * 2.0,
            half * 2.0,
            to_macroquad_color(enemy.color),
        );
        draw_centred_text(
            &enemy.health.to_string(),
            Vec2::new(centre.x, centre.y - half * 2.0),
            ENTITY_FONT_SIZE * metrics.scale,
            text_color,
        );
    }
}

fn draw_overlay(lines: &[String], text_color: Color, metrics: &SceneMetrics) {
    let color = to_macroquad_color(text_color);
    let font_size = OVERLAY_FONT_SIZE * metrics.scale;
    for (index, line) in lines.iter().enumerate() {
        let anchor = metrics.to_screen(Scene::overlay_anchor(index));
        let dimensions = macroquad::text::measure_text(line, None, font_size as u16, 1.0);
        let _ = macroquad::text::draw_text(
            line,
            anchor.x,
            anchor.y + dimensions.offset_y,
            font_size,
            color,
        );
    }
}

fn draw_centred_text(text: &str, centre: Vec2, font_size: f32, color: macroquad::color::Color) {
    let dimensions = macroquad::text::measure_text(text, None, font_size as u16, 1.0);
    let _ = macroquad::text::draw_text(
        text,
        centre.x - dimensions.width * 0.5,
        centre.y + dimensions.height * 0.5,
        font_size,
        color,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
