//! The host-facing per-frame entry point.
//!
//! One processor exists per effect instance on the host's timeline. The
//! host calls [`FontShuffleProcessor::update`] once per rendered frame, on
//! its render thread, possibly out of frame order (scrubbing). The
//! processor must never fail that call: a processor whose backend could not
//! be acquired stays permanently inert and answers every update with a
//! clear, because re-initializing a text stack mid-playback is not safe and
//! a render plugin must never take the host's render loop down with it.

use std::sync::Arc;

use font_shuffle_config::{EffectParams, OverrideStore};
use font_shuffle_fonts::{CatalogService, UserLists};

use crate::backend::{BackendError, TextBackend};
use crate::draw::DrawCommand;
use crate::resolver::{GlobalStyle, RenderRequest, RenderResolver, resolve_style};
use crate::sequencer::FontSequencer;

/// Lifecycle state of a processor.
///
/// `Disposed` is represented by dropping the processor; cached formats and
/// backend resources go with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    /// Backend acquisition failed; every update is a no-op clear.
    Inert,
    /// Fully operational.
    Ready,
}

/// Timeline position handed to [`FontShuffleProcessor::update`] by the
/// host's effect pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Frame position within the item, starting at 0.
    pub frame: i64,
    /// Item duration in frames.
    pub length: i64,
    /// Timeline frames per second.
    pub fps: f64,
}

/// Per-instance effect processor: sequencing, style resolution, rendering.
pub struct FontShuffleProcessor<B: TextBackend> {
    state: ProcessorState,
    sequencer: FontSequencer,
    resolver: Option<RenderResolver<B>>,
    catalog: Arc<CatalogService>,
    overrides: Arc<OverrideStore>,
    /// Last selected family, observable by the host UI.
    current_font: Option<String>,
}

impl<B: TextBackend> FontShuffleProcessor<B> {
    /// Create a processor from a backend acquisition attempt.
    ///
    /// A failed acquisition is not an error to the caller — the processor
    /// is constructed inert and logs why (fail-soft, per the render-plugin
    /// contract).
    pub fn new(
        backend: Result<B, BackendError>,
        catalog: Arc<CatalogService>,
        overrides: Arc<OverrideStore>,
    ) -> Self {
        let (state, resolver) = match backend {
            Ok(backend) => (ProcessorState::Ready, Some(RenderResolver::new(backend))),
            Err(err) => {
                log::error!("text backend acquisition failed: {err}; processor will be inert");
                (ProcessorState::Inert, None)
            }
        };
        FontShuffleProcessor {
            state,
            sequencer: FontSequencer::new(),
            resolver,
            catalog,
            overrides,
            current_font: None,
        }
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == ProcessorState::Ready
    }

    /// The family selected by the most recent update, for UI display.
    pub fn current_font(&self) -> Option<&str> {
        self.current_font.as_deref()
    }

    /// Number of cached text formats (0 when inert).
    pub fn cached_formats(&self) -> usize {
        self.resolver.as_ref().map_or(0, |r| r.cached_formats())
    }

    /// Render one frame.
    ///
    /// Samples the animated parameters at `ctx.frame`, advances the
    /// sequencer, resolves the effective style, and builds the draw
    /// command. Never panics and never returns an error: every failure mode
    /// degrades to [`DrawCommand::Clear`].
    pub fn update(&mut self, ctx: &FrameContext, params: &EffectParams) -> DrawCommand {
        let Some(resolver) = self.resolver.as_mut() else {
            return DrawCommand::Clear;
        };

        let frame = ctx.frame;
        let length = ctx.length;
        let fps = ctx.fps;

        let fonts = self.catalog.catalog().active_list(
            params.shuffle_mode,
            UserLists {
                selected: &params.selected_fonts,
                favorites: &params.favorite_fonts,
                ordered: &params.ordered_fonts,
            },
        );

        let seed = params.random_seed.sample(frame, length, fps) as i64;
        let Some(family) = self.sequencer.select(
            frame,
            |boundary| params.interval_at(boundary, length, fps),
            params.shuffle_mode,
            seed,
            &fonts,
        ) else {
            // active_list never returns an empty list.
            log::warn!("sequencer received an empty font list; clearing frame");
            return DrawCommand::Clear;
        };
        let family = family.to_string();

        let style = resolve_style(
            &self.overrides,
            &family,
            GlobalStyle {
                font_size: params.font_size_at(frame, length, fps),
                color: params.text_color,
                bold: params.bold,
                italic: params.italic,
            },
        );

        let box_size = (
            params.width.sample(frame, length, fps) as f32,
            params.height.sample(frame, length, fps) as f32,
        );
        let command = resolver.render_frame(&RenderRequest {
            text: &params.display_text,
            family: &family,
            style,
            box_size,
            letter_spacing: params.letter_spacing.sample(frame, length, fps) as f32,
            alignment: params.alignment,
        });

        self.current_font = Some(family);
        command
    }
}
