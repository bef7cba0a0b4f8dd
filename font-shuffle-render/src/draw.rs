//! Draw instructions emitted by the render path.
//!
//! The host's graphics surface consumes these; this crate never touches a
//! device context itself. Coordinates are canvas-centered (the origin names
//! the top-left corner of the laid-out text relative to the canvas center),
//! matching how effect plugins composite into the host's frame.

use font_shuffle_config::{Rgba, TextAlignment};

use crate::format_cache::FormatKey;

/// One frame's worth of drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear to transparent and draw nothing. Emitted for empty text and
    /// whenever the render path degrades after a failure.
    Clear,
    /// Draw one block of text.
    Text(TextDraw),
}

impl DrawCommand {
    pub fn is_clear(&self) -> bool {
        matches!(self, DrawCommand::Clear)
    }
}

/// A positioned, styled block of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    /// Identifies the cached text format this draw was resolved against.
    pub format: FormatKey,
    pub color: Rgba,
    /// Top-left corner of the layout, relative to the canvas center.
    pub origin: (f32, f32),
    /// Layout bounds for bounded (centered) layout; `None` means unbounded
    /// layout whose position is fully determined by `origin`.
    pub bounds: Option<(f32, f32)>,
    /// Extra advance between graphemes, in pixels.
    pub letter_spacing: f32,
    pub alignment: TextAlignment,
}
