//! Per-font override records and their snapshot store.
//!
//! A user can customize individual fonts (size, color, weight, slant)
//! without touching the global effect defaults. Overrides are looked up by
//! family name at render time; an absent or disabled record means the
//! global defaults apply.
//!
//! The store follows an async-load/sync-read contract: the host's
//! persistence layer publishes whole snapshots from wherever it loads them
//! (possibly a background thread), and the render path reads the
//! last-published snapshot without ever blocking.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::{Rgba, clamp_font_size};

/// Per-font customization overriding global size/color/style defaults.
///
/// All fields default so that a partially persisted or malformed record
/// deserializes to something harmless (`enabled: false` ⇒ no override).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOverride {
    /// Master switch; a record with `enabled == false` behaves exactly like
    /// an absent record.
    pub enabled: bool,
    /// Fixed font size in pixels, clamped to the valid range on read.
    pub font_size: f64,
    /// When set, size defers to the global animated font-size parameter
    /// while color/bold/italic still come from this record.
    pub use_dynamic_size: bool,
    /// Text color for this font.
    pub color: Rgba,
    pub bold: bool,
    pub italic: bool,
}

impl Default for FontOverride {
    fn default() -> Self {
        FontOverride {
            enabled: false,
            font_size: 48.0,
            use_dynamic_size: false,
            color: Rgba::WHITE,
            bold: false,
            italic: false,
        }
    }
}

impl FontOverride {
    /// The override's size, clamped into the valid font-size range.
    pub fn clamped_size(&self) -> f64 {
        clamp_font_size(self.font_size)
    }
}

/// Snapshot-published store of per-font overrides, keyed by family name.
///
/// One store is shared between the host's settings layer (writer) and any
/// number of processor instances (readers). Readers never block: `get`
/// operates on the last snapshot published via [`OverrideStore::publish`].
#[derive(Debug, Default)]
pub struct OverrideStore {
    snapshot: ArcSwap<HashMap<String, FontOverride>>,
}

impl OverrideStore {
    pub fn new() -> Self {
        OverrideStore {
            snapshot: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Look up the override for a font, returning `Some` only when a record
    /// exists and is enabled. Size clamping happens here so readers never
    /// see an out-of-range value.
    pub fn get(&self, font_name: &str) -> Option<FontOverride> {
        let map = self.snapshot.load();
        let record = map.get(font_name)?;
        if !record.enabled {
            return None;
        }
        let mut record = record.clone();
        record.font_size = record.clamped_size();
        Some(record)
    }

    /// Replace the whole snapshot. Called by the host's settings layer; the
    /// render path picks up the new snapshot on its next read.
    pub fn publish(&self, overrides: HashMap<String, FontOverride>) {
        log::debug!("publishing {} font override(s)", overrides.len());
        self.snapshot.store(Arc::new(overrides));
    }

    /// Number of records in the current snapshot (enabled or not).
    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.load().is_empty()
    }
}
