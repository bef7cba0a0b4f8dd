//! Host-facing effect parameter set.
//!
//! One `EffectParams` value describes everything a user can configure on a
//! font-shuffle effect instance. The processor receives it by reference on
//! every `update` call — the host owns it and may edit any field between
//! frames (the UI does exactly that).

use serde::{Deserialize, Serialize};

use crate::animation::AnimatedParam;
use crate::error::ConfigError;
use crate::types::{Rgba, ShuffleMode, TextAlignment};
use crate::{FONT_SIZE_RANGE, clamp_font_size};

/// All user-configurable parameters of one effect instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// The text rendered each frame. Empty text clears the frame.
    pub display_text: String,
    /// Render box width in pixels (animated).
    pub width: AnimatedParam,
    /// Render box height in pixels (animated).
    pub height: AnimatedParam,
    /// Font change interval in frames (animated; clamped ≥ 1 on use).
    pub interval: AnimatedParam,
    /// Which candidate list feeds the sequencer and how slots map to fonts.
    pub shuffle_mode: ShuffleMode,
    /// Seed for `Random` mode (animated).
    pub random_seed: AnimatedParam,
    /// Default font size in pixels (animated); per-font overrides may
    /// replace or defer to it.
    pub font_size: AnimatedParam,
    /// Extra advance between graphemes, in pixels (animated).
    pub letter_spacing: AnimatedParam,
    /// Default text color.
    pub text_color: Rgba,
    /// Default weight.
    pub bold: bool,
    /// Default slant.
    pub italic: bool,
    pub alignment: TextAlignment,
    /// User selection consulted by `Selected` mode.
    pub selected_fonts: Vec<String>,
    /// Favorites consulted by `Favorites` mode.
    pub favorite_fonts: Vec<String>,
    /// User-ordered list consulted by `Ordered` mode.
    pub ordered_fonts: Vec<String>,
}

impl Default for EffectParams {
    fn default() -> Self {
        EffectParams {
            display_text: "サンプルテキスト".to_string(),
            width: AnimatedParam::new(1920.0, 1.0, 7680.0),
            height: AnimatedParam::new(1080.0, 1.0, 4320.0),
            interval: AnimatedParam::new(30.0, 1.0, 600.0),
            shuffle_mode: ShuffleMode::Auto,
            random_seed: AnimatedParam::new(12345.0, 1.0, 99999.0),
            font_size: AnimatedParam::new(48.0, FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1),
            letter_spacing: AnimatedParam::new(0.0, -100.0, 400.0),
            text_color: Rgba::WHITE,
            bold: false,
            italic: false,
            alignment: TextAlignment::Center,
            selected_fonts: Vec::new(),
            favorite_fonts: Vec::new(),
            ordered_fonts: Vec::new(),
        }
    }
}

impl EffectParams {
    /// Sample the change interval at a frame, clamped to ≥ 1 so the slot
    /// walk always terminates.
    pub fn interval_at(&self, frame: i64, length: i64, fps: f64) -> i64 {
        (self.interval.sample(frame, length, fps) as i64).max(1)
    }

    /// Sample the global font size at a frame, clamped into the valid
    /// range.
    pub fn font_size_at(&self, frame: i64, length: i64, fps: f64) -> f64 {
        clamp_font_size(self.font_size.sample(frame, length, fps))
    }

    /// Validate fields hosts commonly get from free-form input. Rendering
    /// never requires this — out-of-range values are clamped on use — but
    /// settings UIs want early, specific errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = self.font_size.range();
        if min < FONT_SIZE_RANGE.0 || max > FONT_SIZE_RANGE.1 {
            return Err(ConfigError::out_of_range(
                "font_size",
                self.font_size.default_value(),
                FONT_SIZE_RANGE.0,
                FONT_SIZE_RANGE.1,
            ));
        }
        let (imin, _) = self.interval.range();
        if imin < 1.0 {
            return Err(ConfigError::Validation(
                "interval must be at least 1 frame".to_string(),
            ));
        }
        Ok(())
    }
}
