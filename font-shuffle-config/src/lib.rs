//! Configuration types for the font-shuffle effect core.
//!
//! This crate provides the host-facing parameter model:
//!
//! - Shuffle mode and text alignment enums
//! - Animated parameter tracks sampled per frame
//! - Per-font override records and a snapshot-published override store
//! - Color and validation primitives
//!
//! Nothing here performs I/O. The host's persistence layer decides where
//! these values come from; this crate only defines their shape, clamping
//! rules, and the sync-read contract the render path depends on.

pub mod animation;
pub mod error;
pub mod overrides;
pub mod params;
mod types;

// Re-export main types for convenience
pub use animation::{AnimatedParam, Keyframe};
pub use error::ConfigError;
pub use overrides::{FontOverride, OverrideStore};
pub use params::EffectParams;
pub use types::{Rgba, ShuffleMode, TextAlignment};

/// Inclusive range of valid font sizes, in pixels.
///
/// Override records and effect defaults are clamped into this range on
/// read so a corrupt persisted value can never drive the text backend
/// with a zero or absurd size.
pub const FONT_SIZE_RANGE: (f64, f64) = (1.0, 1200.0);

/// Clamp a font size into [`FONT_SIZE_RANGE`].
pub fn clamp_font_size(size: f64) -> f64 {
    size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1)
}
