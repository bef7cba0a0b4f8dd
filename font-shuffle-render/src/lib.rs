//! Per-frame font sequencing and render resolution for the font-shuffle
//! effect.
//!
//! This crate is the algorithmic core of the effect:
//!
//! - [`FontSequencer`] — deterministic frame → slot → font resolution,
//!   tolerant of backward seeks and animated change intervals
//! - [`RenderResolver`] — per-font override resolution and a bounded cache
//!   of expensive text-format objects
//! - [`FontShuffleProcessor`] — the host-facing per-frame entry point and
//!   its fail-soft lifecycle
//! - [`TextBackend`] — the seam to the native text stack, with a
//!   `fontdb`/`swash` implementation and a deterministic fixed-metrics one
//!
//! Everything in the per-frame path is synchronous, allocation-light, and
//! guaranteed not to panic: any failure degrades to drawing nothing for
//! that frame.

pub mod backend;
pub mod draw;
pub mod format_cache;
pub mod processor;
pub mod resolver;
pub mod sequencer;
mod system_backend;

// Re-export main types for convenience
pub use backend::{BackendError, FixedMetricsBackend, TextBackend, TextMetrics};
pub use draw::{DrawCommand, TextDraw};
pub use format_cache::{FORMAT_CACHE_CAPACITY, FormatCache, FormatKey};
pub use processor::{FontShuffleProcessor, FrameContext, ProcessorState};
pub use resolver::{GlobalStyle, RenderResolver, ResolvedStyle};
pub use sequencer::FontSequencer;
pub use system_backend::{SystemTextBackend, SystemTextFormat};
