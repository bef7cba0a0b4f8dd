//! The host-facing effect definition.

use std::sync::Arc;

use font_shuffle_config::{ConfigError, EffectParams, OverrideStore};
use font_shuffle_fonts::{CatalogService, FontCatalog, UserLists};
use font_shuffle_render::{
    BackendError, FontShuffleProcessor, SystemTextBackend, TextBackend,
};

/// One configured effect instance.
///
/// Holds the user-editable parameters plus handles to the process-wide
/// catalog and override services. Processors created from an effect share
/// those services; the parameters are passed into every `update` call so
/// UI edits take effect on the next rendered frame.
pub struct FontShuffleEffect {
    pub params: EffectParams,
    catalog: Arc<CatalogService>,
    overrides: Arc<OverrideStore>,
}

impl FontShuffleEffect {
    /// Create an effect against existing shared services.
    pub fn new(catalog: Arc<CatalogService>, overrides: Arc<OverrideStore>) -> Self {
        FontShuffleEffect {
            params: EffectParams::default(),
            catalog,
            overrides,
        }
    }

    /// Create an effect with fresh, empty services. Convenient for tests
    /// and single-instance hosts; multi-instance hosts should share
    /// services via [`FontShuffleEffect::new`].
    pub fn with_default_services() -> Self {
        Self::new(Arc::new(CatalogService::new()), Arc::new(OverrideStore::new()))
    }

    pub fn catalog(&self) -> &Arc<CatalogService> {
        &self.catalog
    }

    pub fn overrides(&self) -> &Arc<OverrideStore> {
        &self.overrides
    }

    /// Validate the current parameters (see [`EffectParams::validate`]).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params.validate()
    }

    /// The candidate font list the current mode would feed the sequencer.
    /// Exposed for UI display (font browser highlighting, etc.).
    pub fn active_font_list(&self) -> Vec<String> {
        self.catalog.catalog().active_list(
            self.params.shuffle_mode,
            UserLists {
                selected: &self.params.selected_fonts,
                favorites: &self.params.favorite_fonts,
                ordered: &self.params.ordered_fonts,
            },
        )
    }

    /// Create a processor over a host-provided font database.
    ///
    /// If the shared catalog service has never been populated, a catalog is
    /// built from the database's face metadata so the first frame already
    /// has real candidates instead of the fallback chain.
    pub fn create_processor(
        &self,
        db: fontdb::Database,
    ) -> FontShuffleProcessor<SystemTextBackend> {
        if self.catalog.catalog().is_empty() {
            let catalog = FontCatalog::from_database(&db);
            if !catalog.is_empty() {
                log::info!(
                    "seeding catalog service from font database ({} families)",
                    catalog.len()
                );
                self.catalog.publish(catalog);
            }
        }
        self.create_processor_with(SystemTextBackend::new(db))
    }

    /// Create a processor over any backend acquisition result. A failed
    /// acquisition yields an inert processor (see the processor docs).
    pub fn create_processor_with<B: TextBackend>(
        &self,
        backend: Result<B, BackendError>,
    ) -> FontShuffleProcessor<B> {
        FontShuffleProcessor::new(
            backend,
            Arc::clone(&self.catalog),
            Arc::clone(&self.overrides),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_shuffle_config::ShuffleMode;

    #[test]
    fn default_effect_validates() {
        let effect = FontShuffleEffect::with_default_services();
        assert!(effect.validate().is_ok());
    }

    #[test]
    fn active_font_list_reflects_mode() {
        let effect = FontShuffleEffect::with_default_services();
        effect
            .catalog()
            .publish(FontCatalog::from_families(["Arial", "Meiryo"]));

        let mut effect = effect;
        effect.params.shuffle_mode = ShuffleMode::Japanese;
        assert_eq!(effect.active_font_list(), vec!["Meiryo".to_string()]);
    }

    #[test]
    fn empty_database_yields_inert_processor() {
        let effect = FontShuffleEffect::with_default_services();
        let proc = effect.create_processor(fontdb::Database::new());
        assert!(!proc.is_ready());
    }
}
