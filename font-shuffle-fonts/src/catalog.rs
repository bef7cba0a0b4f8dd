//! Font catalog and mode-dependent active-list resolution.

use std::collections::HashSet;

use font_shuffle_config::ShuffleMode;

use crate::classify::is_japanese_family;
use crate::fallbacks::{FALLBACK_FAMILIES, UNIVERSAL_FALLBACK};

/// User-maintained font lists consulted by the list-driven shuffle modes.
///
/// Borrowed from the effect configuration for the duration of one
/// resolution; the catalog never stores them.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserLists<'a> {
    pub selected: &'a [String],
    pub favorites: &'a [String],
    pub ordered: &'a [String],
}

/// Deduplicated, classified snapshot of the families available to the
/// effect.
///
/// Immutable once built; the [`crate::CatalogService`] publishes whole
/// replacement snapshots instead of mutating a shared one.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    all: Vec<String>,
    japanese: Vec<String>,
    english: Vec<String>,
    hidden: HashSet<String>,
}

impl FontCatalog {
    /// Build a catalog from family names. Duplicates are removed, names are
    /// sorted, and each family is classified as Japanese or English.
    pub fn from_families<I>(families: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut all: Vec<String> = families
            .into_iter()
            .map(Into::into)
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();
        all.sort();

        let mut japanese = Vec::new();
        let mut english = Vec::new();
        for name in &all {
            if is_japanese_family(name) {
                japanese.push(name.clone());
            } else {
                english.push(name.clone());
            }
        }

        log::info!(
            "catalog built: {} families ({} japanese, {} english)",
            all.len(),
            japanese.len(),
            english.len()
        );

        FontCatalog {
            all,
            japanese,
            english,
            hidden: HashSet::new(),
        }
    }

    /// Build a catalog from the faces of a host-provided font database.
    ///
    /// The database contents are entirely the host's business (it may load
    /// system fonts, a bundled set, or nothing); this crate only reads the
    /// family metadata already in it.
    pub fn from_database(db: &fontdb::Database) -> Self {
        let families = db
            .faces()
            .filter_map(|face| face.families.first().map(|(name, _)| name.clone()));
        Self::from_families(families)
    }

    /// Replace the hidden-family set. Hidden families are filtered out of
    /// every active list before fallback handling.
    pub fn with_hidden(mut self, hidden: HashSet<String>) -> Self {
        self.hidden = hidden;
        self
    }

    /// All known families (unfiltered).
    pub fn all_families(&self) -> &[String] {
        &self.all
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Resolve the candidate font list for a shuffle mode.
    ///
    /// List-driven modes (`Ordered`/`Selected`/`Favorites`) use the user's
    /// list when it has entries; classification modes use the classified
    /// sublist, falling back to the full list when the class is empty;
    /// `Auto`/`Random` use the full list. Hidden families are removed, and
    /// an empty result falls back to [`FALLBACK_FAMILIES`] members present
    /// in the catalog, then to [`UNIVERSAL_FALLBACK`]. The returned list is
    /// never empty.
    pub fn active_list(&self, mode: ShuffleMode, user: UserLists<'_>) -> Vec<String> {
        let base: &[String] = match mode {
            ShuffleMode::Ordered if !user.ordered.is_empty() => user.ordered,
            ShuffleMode::Selected if !user.selected.is_empty() => user.selected,
            ShuffleMode::Favorites if !user.favorites.is_empty() => user.favorites,
            ShuffleMode::Ordered | ShuffleMode::Selected | ShuffleMode::Favorites => &[],
            ShuffleMode::Japanese if !self.japanese.is_empty() => &self.japanese,
            ShuffleMode::English if !self.english.is_empty() => &self.english,
            _ => &self.all,
        };

        let mut seen = HashSet::new();
        let filtered: Vec<String> = base
            .iter()
            .filter(|name| !self.hidden.contains(name.as_str()))
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect();

        if !filtered.is_empty() {
            return filtered;
        }

        log::warn!(
            "no usable fonts for mode {:?} (catalog {}, hidden {}); using fallback chain",
            mode,
            self.all.len(),
            self.hidden.len()
        );
        self.fallback_list()
    }

    /// The hard-coded safety net: fallback families present in the catalog
    /// and not hidden, else the universal generic family.
    fn fallback_list(&self) -> Vec<String> {
        let present: Vec<String> = FALLBACK_FAMILIES
            .iter()
            .filter(|name| !self.hidden.contains(**name))
            .filter(|name| self.all.iter().any(|have| have == *name))
            .map(|name| (*name).to_string())
            .collect();
        if !present.is_empty() {
            return present;
        }
        vec![UNIVERSAL_FALLBACK.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FontCatalog {
        FontCatalog::from_families([
            "Arial",
            "Yu Gothic UI",
            "Meiryo",
            "Times New Roman",
            "Arial", // duplicate
        ])
    }

    #[test]
    fn duplicates_removed_and_sorted() {
        let c = catalog();
        assert_eq!(c.len(), 4);
        let mut sorted = c.all_families().to_vec();
        sorted.sort();
        assert_eq!(c.all_families(), sorted.as_slice());
    }

    #[test]
    fn classification_splits_catalog() {
        let c = catalog();
        let jp = c.active_list(ShuffleMode::Japanese, UserLists::default());
        assert!(jp.contains(&"Yu Gothic UI".to_string()));
        assert!(jp.contains(&"Meiryo".to_string()));
        assert!(!jp.contains(&"Arial".to_string()));

        let en = c.active_list(ShuffleMode::English, UserLists::default());
        assert!(en.contains(&"Arial".to_string()));
        assert!(!en.contains(&"Meiryo".to_string()));
    }

    #[test]
    fn selected_mode_uses_user_list() {
        let c = catalog();
        let selected = vec!["Times New Roman".to_string()];
        let list = c.active_list(
            ShuffleMode::Selected,
            UserLists {
                selected: &selected,
                ..Default::default()
            },
        );
        assert_eq!(list, selected);
    }

    #[test]
    fn empty_selection_falls_back_without_being_empty() {
        let c = catalog();
        let list = c.active_list(ShuffleMode::Selected, UserLists::default());
        assert!(!list.is_empty());
        // Catalog has Yu Gothic UI and Meiryo from the fallback chain.
        assert!(list.contains(&"Yu Gothic UI".to_string()));
    }

    #[test]
    fn fallback_chain_tries_catalog_members_before_universal_default() {
        // Catalog contains two fallback-chain members; both must be offered
        // before the generic family is ever used.
        let c = FontCatalog::from_families(["Yu Gothic UI", "Arial"]);
        let list = c.active_list(ShuffleMode::Selected, UserLists::default());
        assert!(list.len() >= 2);
        assert!(!list.contains(&UNIVERSAL_FALLBACK.to_string()));
    }

    #[test]
    fn empty_catalog_yields_universal_fallback() {
        let c = FontCatalog::from_families(Vec::<String>::new());
        let list = c.active_list(ShuffleMode::Auto, UserLists::default());
        assert_eq!(list, vec![UNIVERSAL_FALLBACK.to_string()]);
    }

    #[test]
    fn hidden_families_are_filtered_everywhere() {
        let hidden: HashSet<String> = ["Arial".to_string()].into();
        let c = catalog().with_hidden(hidden);
        let list = c.active_list(ShuffleMode::Auto, UserLists::default());
        assert!(!list.contains(&"Arial".to_string()));
        assert!(!list.is_empty());
    }

    #[test]
    fn hiding_everything_still_yields_nonempty_list() {
        let hidden: HashSet<String> = catalog().all_families().iter().cloned().collect();
        let c = catalog().with_hidden(hidden);
        let list = c.active_list(ShuffleMode::Auto, UserLists::default());
        assert_eq!(list, vec![UNIVERSAL_FALLBACK.to_string()]);
    }

    #[test]
    fn japanese_mode_falls_back_to_full_list_when_class_empty() {
        let c = FontCatalog::from_families(["Arial", "Times New Roman"]);
        let list = c.active_list(ShuffleMode::Japanese, UserLists::default());
        assert_eq!(list.len(), 2);
    }
}
