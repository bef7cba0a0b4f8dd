//! The seam to the native text stack.
//!
//! The resolver and processor are generic over [`TextBackend`] so the
//! expensive parts (format construction, text measurement) can be swapped:
//! production hosts use [`crate::SystemTextBackend`] over a `fontdb`
//! database, while headless rendering and tests use the deterministic
//! [`FixedMetricsBackend`].

use font_shuffle_config::TextAlignment;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Errors produced by a text backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The requested family cannot be resolved by this backend.
    #[error("font family '{0}' is not available")]
    FamilyUnavailable(String),

    /// The backend itself could not be acquired or has become unusable.
    #[error("text backend unavailable: {0}")]
    Unavailable(String),
}

/// Measured extent of a laid-out block of text, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

/// Backend-native text format construction and measurement.
///
/// A `Format` owns whatever native resources the backend needs to render
/// text in one (family, size, weight, slant, alignment) configuration;
/// formats are cached by the resolver and released on eviction via `Drop`.
pub trait TextBackend {
    type Format;

    /// Construct a format. Fails when the family cannot be resolved; the
    /// caller retries once with a known-safe family before giving up.
    /// Takes `&mut self` because face resolution may cache into the
    /// backend's font source.
    fn create_format(
        &mut self,
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
        alignment: TextAlignment,
    ) -> Result<Self::Format, BackendError>;

    /// Measure `text` under `format`, including letter spacing. Must not
    /// fail: unknown glyphs get a nominal advance.
    fn measure(&self, format: &Self::Format, text: &str, letter_spacing: f32) -> TextMetrics;
}

/// Format handle produced by [`FixedMetricsBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct FixedFormat {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub alignment: TextAlignment,
}

/// Deterministic backend with synthetic metrics.
///
/// Every grapheme advances `0.6 × size` and a line is `1.2 × size` tall,
/// which is close enough to real sans faces for layout math while staying
/// bit-identical across platforms. Families listed as unavailable fail
/// format construction, which is how tests exercise the fallback-retry
/// path.
#[derive(Debug, Default)]
pub struct FixedMetricsBackend {
    unavailable: Vec<String>,
    formats_built: usize,
}

impl FixedMetricsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark families whose format construction should fail.
    pub fn with_unavailable<I>(families: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        FixedMetricsBackend {
            unavailable: families.into_iter().map(Into::into).collect(),
            formats_built: 0,
        }
    }

    /// Number of formats constructed so far (cache-miss counter).
    pub fn formats_built(&self) -> usize {
        self.formats_built
    }
}

impl TextBackend for FixedMetricsBackend {
    type Format = FixedFormat;

    fn create_format(
        &mut self,
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
        alignment: TextAlignment,
    ) -> Result<FixedFormat, BackendError> {
        if self.unavailable.iter().any(|f| f == family) {
            return Err(BackendError::FamilyUnavailable(family.to_string()));
        }
        self.formats_built += 1;
        Ok(FixedFormat {
            family: family.to_string(),
            size,
            bold,
            italic,
            alignment,
        })
    }

    fn measure(&self, format: &FixedFormat, text: &str, letter_spacing: f32) -> TextMetrics {
        measure_with(text, letter_spacing, format.size * 1.2, |_| {
            format.size * 0.6
        })
    }
}

/// Shared multi-line measurement walk: widest line wins, lines stack, and
/// letter spacing is added between graphemes (not after the last one).
pub(crate) fn measure_with<F>(
    text: &str,
    letter_spacing: f32,
    line_height: f32,
    mut advance_of: F,
) -> TextMetrics
where
    F: FnMut(&str) -> f32,
{
    if text.is_empty() {
        return TextMetrics::default();
    }
    let mut width: f32 = 0.0;
    let mut lines = 0usize;
    for line in text.split('\n') {
        lines += 1;
        let mut line_width = 0.0;
        let mut graphemes = 0usize;
        for grapheme in line.graphemes(true) {
            line_width += advance_of(grapheme);
            graphemes += 1;
        }
        if graphemes > 1 {
            line_width += letter_spacing * (graphemes - 1) as f32;
        }
        width = width.max(line_width);
    }
    TextMetrics {
        width,
        height: line_height * lines as f32,
    }
}
