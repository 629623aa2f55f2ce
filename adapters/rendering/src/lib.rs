#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Eco Defender adapters.

use anyhow::Result as AnyResult;
use eco_defender_core::{PlayerAction, TowerKind, WorldPoint};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

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
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::from_rgb_u8(0, 255, 0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::from_rgb_u8(255, 255, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::from_rgb_u8(0, 0, 255);

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

    /// Fill color used for the provided tower kind.
    #[must_use]
    pub const fn for_tower(kind: TowerKind) -> Self {
        match kind {
            TowerKind::Tree => Self::GREEN,
            TowerKind::Solar => Self::YELLOW,
            TowerKind::Recycle => Self::BLUE,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Player intents captured this frame, in the order they were observed.
    pub actions: Vec<PlayerAction>,
}

/// Tells the backend whether to keep presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoopControl {
    /// Present the updated scene and poll the next frame.
    Continue,
    /// Present the updated scene once more, then stop.
    Exit,
}

/// Rectangular play field that every scene coordinate is expressed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPresentation {
    /// Width of the field in world units.
    pub width: f32,
    /// Height of the field in world units.
    pub height: f32,
    /// Color painted behind every entity.
    pub background: Color,
}

impl FieldPresentation {
    /// Creates a field descriptor, rejecting empty dimensions.
    pub fn new(width: f32, height: f32, background: Color) -> Result<Self, RenderingError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderingError::EmptyField { width, height });
        }

        Ok(Self {
            width,
            height,
            background,
        })
    }

    /// Dimensions of the field as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Converts a field-space position into a world point when it lies on the field.
    #[must_use]
    pub fn world_point(&self, position: Vec2) -> Option<WorldPoint> {
        let inside = position.x >= 0.0
            && position.y >= 0.0
            && position.x <= self.width
            && position.y <= self.height;
        inside.then(|| WorldPoint::new(position.x, position.y))
    }
}

/// Tower drawn as a labelled disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerPresentation {
    /// Centre of the tower in field coordinates.
    pub position: Vec2,
    /// Radius of the disc.
    pub radius: f32,
    /// Fill color of the disc.
    pub color: Color,
    /// Character drawn at the centre of the disc.
    pub label: char,
}

impl TowerPresentation {
    /// Creates the descriptor used for a tower of `kind`.
    #[must_use]
    pub const fn new(kind: TowerKind, position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            color: Color::for_tower(kind),
            label: kind.label(),
        }
    }
}

/// Enemy drawn as a square with its health written above it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Centre of the enemy in field coordinates.
    pub position: Vec2,
    /// Half of the square's side length.
    pub half_size: f32,
    /// Fill color of the square.
    pub color: Color,
    /// Health value shown above the square.
    pub health: i32,
}

impl EnemyPresentation {
    /// Creates a red enemy descriptor.
    #[must_use]
    pub const fn new(position: Vec2, half_size: f32, health: i32) -> Self {
        Self {
            position,
            half_size,
            color: Color::RED,
            health,
        }
    }
}

/// Scene description combining the field, its inhabitants and the text overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Play field the scene is laid out on.
    pub field: FieldPresentation,
    /// Towers currently on the field.
    pub towers: Vec<TowerPresentation>,
    /// Enemies currently on the field.
    pub enemies: Vec<EnemyPresentation>,
    /// Lines of text drawn in the top-left corner.
    pub overlay: Vec<String>,
    /// Color used for every overlay and entity label.
    pub text_color: Color,
}

impl Scene {
    /// Vertical distance between consecutive overlay lines.
    pub const OVERLAY_LINE_SPACING: f32 = 20.0;

    /// Creates an empty scene on the provided field.
    #[must_use]
    pub fn new(field: FieldPresentation) -> Self {
        Self {
            field,
            towers: Vec::new(),
            enemies: Vec::new(),
            overlay: Vec::new(),
            text_color: Color::BLACK,
        }
    }

    /// Removes every entity and overlay line while keeping the field.
    pub fn clear(&mut self) {
        self.towers.clear();
        self.enemies.clear();
        self.overlay.clear();
    }

    /// Top-left anchor of the overlay line at `index`.
    #[must_use]
    pub fn overlay_anchor(index: usize) -> Vec2 {
        Vec2::new(10.0, 10.0 + Self::OVERLAY_LINE_SPACING * index as f32)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Upper bound on presented frames per second.
    pub frame_rate: u32,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    pub fn new<T>(window_title: T, frame_rate: u32, scene: Scene) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if frame_rate == 0 {
            return Err(RenderingError::ZeroFrameRate);
        }

        Ok(Self {
            window_title: window_title.into(),
            frame_rate,
            scene,
        })
    }

    /// Time budget of a single frame at the configured frame rate.
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }
}

/// Rendering backend capable of presenting Eco Defender scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the player quits or the closure asks to exit.
    ///
    /// The provided `update_scene` closure receives the elapsed frame time and
    /// the input captured by the adapter, and mutates the scene before it is
    /// rendered. Returning [`LoopControl::Exit`] presents that frame and ends
    /// the loop.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The field must have a positive area.
    EmptyField {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
    /// Frames must be presented at a positive rate.
    ZeroFrameRate,
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { width, height } => {
                write!(f, "field dimensions must be positive (received {width}x{height})")
            }
            Self::ZeroFrameRate => write!(f, "frame rate must be positive"),
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FieldPresentation {
        FieldPresentation::new(800.0, 600.0, Color::WHITE).expect("valid field")
    }

    #[test]
    fn field_creation_rejects_empty_dimensions_without_panicking() {
        let error = FieldPresentation::new(0.0, 600.0, Color::WHITE)
            .expect_err("zero width must be rejected");

        assert_eq!(
            error,
            RenderingError::EmptyField {
                width: 0.0,
                height: 600.0
            }
        );
        assert_eq!(
            error.to_string(),
            "field dimensions must be positive (received 0x600)"
        );
    }

    #[test]
    fn world_point_rejects_positions_outside_the_field() {
        let field = field();

        assert_eq!(
            field.world_point(Vec2::new(50.0, 300.0)),
            Some(WorldPoint::new(50.0, 300.0))
        );
        assert_eq!(field.world_point(Vec2::new(-1.0, 300.0)), None);
        assert_eq!(field.world_point(Vec2::new(50.0, 600.5)), None);
    }

    #[test]
    fn tower_presentation_uses_kind_palette_and_initial() {
        let solar = TowerPresentation::new(TowerKind::Solar, Vec2::new(1.0, 2.0), 20.0);
        assert_eq!(solar.color, Color::YELLOW);
        assert_eq!(solar.label, 'S');

        let recycle = TowerPresentation::new(TowerKind::Recycle, Vec2::ZERO, 20.0);
        assert_eq!(recycle.color, Color::BLUE);
        assert_eq!(recycle.label, 'R');
    }

    #[test]
    fn overlay_lines_stack_twenty_units_apart() {
        assert_eq!(Scene::overlay_anchor(0), Vec2::new(10.0, 10.0));
        assert_eq!(Scene::overlay_anchor(4), Vec2::new(10.0, 90.0));
    }

    #[test]
    fn clearing_a_scene_keeps_the_field() {
        let mut scene = Scene::new(field());
        scene.overlay.push("Money: $100.0".to_owned());
        scene
            .enemies
            .push(EnemyPresentation::new(Vec2::new(0.0, 300.0), 10.0, 5));

        scene.clear();

        assert!(scene.overlay.is_empty());
        assert!(scene.enemies.is_empty());
        assert_eq!(scene.field, field());
    }

    #[test]
    fn presentation_rejects_zero_frame_rate() {
        let scene = Scene::new(field());
        assert_eq!(
            Presentation::new("Eco Defender", 0, scene.clone()),
            Err(RenderingError::ZeroFrameRate)
        );

        let presentation = Presentation::new("Eco Defender", 60, scene).expect("valid rate");
        assert_eq!(presentation.frame_budget(), Duration::from_nanos(16_666_666));
    }
}
