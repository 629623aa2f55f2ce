#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Eco Defender experience.

use eco_defender_core::FieldTuning;
use eco_defender_world::{query, World};

/// Produces data required to greet the player and size the window.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the play field configuration required for rendering.
    #[must_use]
    pub fn field<'world>(&self, world: &'world World) -> &'world FieldTuning {
        query::field(world)
    }
}
