//! Per-font style resolution and draw-command construction.
//!
//! The resolver turns "font X at frame F" into concrete rendering
//! parameters, consulting the per-font override store, and owns the bounded
//! format cache. It is deliberately free of sequencing logic: callers hand
//! it an already-selected family name.

use font_shuffle_config::{OverrideStore, Rgba, TextAlignment};

use crate::backend::{BackendError, TextBackend};
use crate::draw::{DrawCommand, TextDraw};
use crate::format_cache::{FormatCache, FormatKey};

/// Global style defaults sampled at the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalStyle {
    /// Global animated font size, sampled at the frame.
    pub font_size: f64,
    pub color: Rgba,
    pub bold: bool,
    pub italic: bool,
}

/// Effective style for one font at one frame, after override resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub font_size: f64,
    pub color: Rgba,
    pub bold: bool,
    pub italic: bool,
}

/// Resolve the effective style for `font_name`.
///
/// An enabled override supplies color/bold/italic outright. Size comes from
/// the override too, except that `use_dynamic_size` defers to the global
/// animated size — a font can keep its own color and weight while still
/// breathing with the timeline. No override (or a disabled/malformed one)
/// means all four values are the globals.
pub fn resolve_style(
    overrides: &OverrideStore,
    font_name: &str,
    global: GlobalStyle,
) -> ResolvedStyle {
    match overrides.get(font_name) {
        Some(record) => ResolvedStyle {
            font_size: if record.use_dynamic_size {
                global.font_size
            } else {
                record.font_size
            },
            color: record.color,
            bold: record.bold,
            italic: record.italic,
        },
        None => ResolvedStyle {
            font_size: global.font_size,
            color: global.color,
            bold: global.bold,
            italic: global.italic,
        },
    }
}

/// Everything `render_frame` needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub text: &'a str,
    pub family: &'a str,
    pub style: ResolvedStyle,
    /// Render box dimensions (width, height) in pixels.
    pub box_size: (f32, f32),
    pub letter_spacing: f32,
    pub alignment: TextAlignment,
}

/// Turns a selected font plus frame parameters into draw commands, caching
/// format objects across frames.
pub struct RenderResolver<B: TextBackend> {
    backend: B,
    cache: FormatCache<B::Format>,
    /// Known-safe family used for the retry after a construction failure.
    safe_family: String,
    /// Color of the most recent draw; the brush-equivalent resource is only
    /// refreshed when this changes.
    current_color: Option<Rgba>,
}

impl<B: TextBackend> RenderResolver<B> {
    pub fn new(backend: B) -> Self {
        Self::with_safe_family(backend, "Arial")
    }

    /// Use a specific retry family instead of the default.
    pub fn with_safe_family(backend: B, safe_family: &str) -> Self {
        RenderResolver {
            backend,
            cache: FormatCache::new(),
            safe_family: safe_family.to_string(),
            current_color: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of formats currently cached.
    pub fn cached_formats(&self) -> usize {
        self.cache.len()
    }

    /// Drop all cached formats (releases their backend resources).
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Fetch or build the format for a configuration.
    ///
    /// On a miss the backend constructs the format; if the family is
    /// unavailable the construction is retried once with the safe family,
    /// and the result is cached under the *requested* key so subsequent
    /// frames hit the cache instead of failing again.
    pub fn format_for(&mut self, key: &FormatKey) -> Result<&B::Format, BackendError> {
        // Two-phase because a borrow of the cache entry would otherwise pin
        // `self` across the construction call.
        if !self.cache.contains(key) {
            let format = self.build_format(key)?;
            self.cache.insert(key.clone(), format);
        }
        self.cache
            .get(key)
            .ok_or_else(|| BackendError::Unavailable("format cache lookup failed".to_string()))
    }

    fn build_format(&mut self, key: &FormatKey) -> Result<B::Format, BackendError> {
        match self.backend.create_format(
            &key.family,
            key.size(),
            key.bold,
            key.italic,
            key.alignment,
        ) {
            Ok(format) => Ok(format),
            Err(err) => {
                log::warn!(
                    "text format for '{}' failed ({err}); retrying with '{}'",
                    key.family,
                    self.safe_family
                );
                self.backend.create_format(
                    &self.safe_family,
                    key.size(),
                    key.bold,
                    key.italic,
                    key.alignment,
                )
            }
        }
    }

    /// Build the draw command for one frame.
    ///
    /// Empty text clears the frame. Center alignment uses bounded layout
    /// with the format's own centering; left/right switch to unbounded
    /// layout and position the measured text against the box edges so long
    /// lines are never clipped. Any failure degrades to [`DrawCommand::Clear`]
    /// rather than propagating.
    pub fn render_frame(&mut self, request: &RenderRequest<'_>) -> DrawCommand {
        if request.text.is_empty() {
            return DrawCommand::Clear;
        }

        let key = FormatKey::new(
            request.family,
            request.style.font_size as f32,
            request.style.bold,
            request.style.italic,
            request.alignment,
        );
        if self.format_for(&key).is_err() {
            log::warn!(
                "no usable text format for '{}' or fallback; clearing frame",
                request.family
            );
            return DrawCommand::Clear;
        }

        if self.current_color != Some(request.style.color) {
            log::trace!("text color changed; refreshing brush state");
            self.current_color = Some(request.style.color);
        }

        let (box_w, box_h) = request.box_size;
        let (origin, bounds) = match request.alignment {
            TextAlignment::Center => ((-box_w / 2.0, -box_h / 2.0), Some((box_w, box_h))),
            TextAlignment::Left | TextAlignment::Right => {
                // Measured, unbounded layout. format_for above guarantees
                // the entry exists.
                let metrics = match self.cache.get(&key) {
                    Some(format) => {
                        self.backend
                            .measure(format, request.text, request.letter_spacing)
                    }
                    None => return DrawCommand::Clear,
                };
                let x = match request.alignment {
                    TextAlignment::Left => -box_w / 2.0,
                    _ => box_w / 2.0 - metrics.width,
                };
                ((x, -metrics.height / 2.0), None)
            }
        };

        DrawCommand::Text(TextDraw {
            text: request.text.to_string(),
            format: key,
            color: request.style.color,
            origin,
            bounds,
            letter_spacing: request.letter_spacing,
            alignment: request.alignment,
        })
    }
}
