//! font-shuffle: a deterministic font-cycling text effect core.
//!
//! The effect renders a block of text whose font changes every N frames,
//! cycling through the fonts available to the host — sequentially, in a
//! user-defined order, or pseudo-randomly from a seed. This crate ties the
//! workspace together for hosts:
//!
//! - [`FontShuffleEffect`] — one configured effect instance: parameters
//!   plus the shared catalog and override services
//! - [`FontShuffleProcessor`] — the per-frame render entry point created
//!   from an effect
//! - Re-exports of the parameter, catalog, and render types hosts interact
//!   with
//!
//! # Determinism
//!
//! Frame resolution is a pure function of the effect parameters and frame
//! position: scrubbing, seeking, and re-rendering a frame always produce
//! the same font, style, and draw command. See
//! [`font_shuffle_render::FontSequencer`] for the slot model.
//!
//! # Fail-soft contract
//!
//! Nothing in the per-frame path panics or returns an error to the host.
//! Missing fonts fall back, empty candidate lists fall back, a dead text
//! backend turns the processor inert, and anything else degrades to a
//! cleared frame.

mod effect;

pub use effect::FontShuffleEffect;

// Re-export the crates' main types for convenience
pub use font_shuffle_config::{
    AnimatedParam, ConfigError, EffectParams, FontOverride, Keyframe, OverrideStore, Rgba,
    ShuffleMode, TextAlignment,
};
pub use font_shuffle_fonts::{
    CatalogProgress, CatalogService, FALLBACK_FAMILIES, FontCatalog, LoadOutcome, UserLists,
};
pub use font_shuffle_render::{
    BackendError, DrawCommand, FixedMetricsBackend, FontSequencer, FontShuffleProcessor,
    FormatKey, FrameContext, ProcessorState, RenderResolver, SystemTextBackend, TextBackend,
    TextDraw,
};
