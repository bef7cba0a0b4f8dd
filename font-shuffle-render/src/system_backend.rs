//! Text backend over a `fontdb` database with `swash` metrics.
//!
//! The database is provided by the host — it may hold system fonts, a
//! bundled set, or whatever the host's font layer produced; this crate
//! never enumerates the OS itself. Format construction resolves a family
//! (with weight/slant) to a concrete face and keeps the face bytes alive
//! for measurement.

use std::sync::Arc;

use fontdb::{Database, Family, Query};
use font_shuffle_config::TextAlignment;
use swash::FontRef;

use crate::backend::{BackendError, TextBackend, TextMetrics, measure_with};

/// Owned face bytes plus a `swash` reference into them.
#[derive(Clone)]
struct FaceData {
    /// Raw face bytes; kept alive for as long as `font_ref` exists.
    data: Arc<Vec<u8>>,
    font_ref: FontRef<'static>,
}

impl FaceData {
    /// Build from face bytes and a face index (for TrueType Collections).
    fn new(data: Vec<u8>, face_index: usize) -> Option<Self> {
        let data = Arc::new(data);

        // SAFETY: the FontRef borrows from `data`, which lives in the same
        // struct and is never dropped or mutated while the FontRef exists;
        // both are dropped together.
        let font_ref = unsafe {
            let bytes = data.as_slice();
            let static_bytes: &'static [u8] = std::mem::transmute(bytes);
            FontRef::from_index(static_bytes, face_index)?
        };

        Some(FaceData { data, font_ref })
    }
}

impl std::fmt::Debug for FaceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceData")
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// A resolved text format: one face at one size/weight/slant/alignment.
#[derive(Debug, Clone)]
pub struct SystemTextFormat {
    face: FaceData,
    size: f32,
    /// Pixels per font unit at this size.
    scale: f32,
    /// Full line height (ascent + descent + leading), in pixels.
    line_height: f32,
    pub family: String,
    pub bold: bool,
    pub italic: bool,
    pub alignment: TextAlignment,
}

/// `fontdb` + `swash` implementation of [`TextBackend`].
#[derive(Debug)]
pub struct SystemTextBackend {
    db: Database,
}

impl SystemTextBackend {
    /// Wrap a host-provided database.
    ///
    /// Acquisition fails when the database holds no faces at all — nothing
    /// could ever be resolved, and the processor contract prefers a single
    /// up-front failure (inert processor) over failing every frame.
    pub fn new(db: Database) -> Result<Self, BackendError> {
        if db.len() == 0 {
            return Err(BackendError::Unavailable(
                "font database contains no faces".to_string(),
            ));
        }
        log::info!("text backend ready with {} font faces", db.len());
        Ok(SystemTextBackend { db })
    }

    /// Access the underlying database (e.g. to build a catalog from it).
    pub fn database(&self) -> &Database {
        &self.db
    }

    fn load_face(&mut self, family: &str, bold: bool, italic: bool) -> Option<FaceData> {
        // The universal fallback name maps to fontdb's generic family so an
        // otherwise-unresolvable request can still land on something.
        let family_ref = if family.eq_ignore_ascii_case("sans-serif") {
            Family::SansSerif
        } else {
            Family::Name(family)
        };
        let query = Query {
            families: &[family_ref],
            weight: if bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            style: if italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
            ..Query::default()
        };
        let id = self.db.query(&query)?;

        // SAFETY: make_shared_face_data is safe for an ID just returned by
        // query() on the same database.
        let (data, face_index) = unsafe { self.db.make_shared_face_data(id)? };
        let bytes = data.as_ref().as_ref();
        FaceData::new(bytes.to_vec(), face_index as usize)
    }
}

impl TextBackend for SystemTextBackend {
    type Format = SystemTextFormat;

    fn create_format(
        &mut self,
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
        alignment: TextAlignment,
    ) -> Result<SystemTextFormat, BackendError> {
        let face = self
            .load_face(family, bold, italic)
            .ok_or_else(|| BackendError::FamilyUnavailable(family.to_string()))?;

        let metrics = face.font_ref.metrics(&[]);
        let units_per_em = f32::from(metrics.units_per_em).max(1.0);
        let scale = size / units_per_em;
        let line_height = (metrics.ascent + metrics.descent + metrics.leading) * scale;

        log::debug!("created text format: '{family}' {size}px bold={bold} italic={italic}");

        Ok(SystemTextFormat {
            face,
            size,
            scale,
            line_height,
            family: family.to_string(),
            bold,
            italic,
            alignment,
        })
    }

    fn measure(&self, format: &SystemTextFormat, text: &str, letter_spacing: f32) -> TextMetrics {
        let font_ref = &format.face.font_ref;
        let charmap = font_ref.charmap();
        let glyph_metrics = font_ref.glyph_metrics(&[]);
        measure_with(text, letter_spacing, format.line_height, |grapheme| {
            // The first scalar carries the advance for the cluster; marks
            // and joiners contribute none of their own.
            let Some(ch) = grapheme.chars().next() else {
                return 0.0;
            };
            let glyph_id = charmap.map(ch);
            if glyph_id == 0 {
                // Unknown glyph: nominal half-em advance, same as a
                // replacement box would take.
                format.size * 0.5
            } else {
                glyph_metrics.advance_width(glyph_id) * format.scale
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_fails_acquisition() {
        let err = SystemTextBackend::new(Database::new()).unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
    }
}
