//! Bounded cache of backend text-format objects.
//!
//! Format construction is the expensive step of the render path (native
//! font resolution, face loading). The key space is small in practice — a
//! project cycles through a few dozen fonts at one or two sizes — so the
//! cache uses simple insertion-order eviction rather than strict LRU: when
//! the bound is exceeded, the oldest half is dropped in one sweep. Entries
//! own native resources and release them through `Drop` on eviction, on
//! `clear`, and on processor teardown.

use std::collections::HashMap;

use font_shuffle_config::TextAlignment;

/// Default bound on cached formats.
pub const FORMAT_CACHE_CAPACITY: usize = 50;

/// Composite cache key identifying one text-format configuration.
///
/// Size participates via its bit pattern; sizes are produced by the same
/// sampling path on every visit to a frame, so bit equality is the right
/// notion of "same size" here (no epsilon).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatKey {
    pub family: String,
    size_bits: u32,
    pub bold: bool,
    pub italic: bool,
    pub alignment: TextAlignment,
}

impl FormatKey {
    pub fn new(
        family: &str,
        size: f32,
        bold: bool,
        italic: bool,
        alignment: TextAlignment,
    ) -> Self {
        FormatKey {
            family: family.to_string(),
            size_bits: size.to_bits(),
            bold,
            italic,
            alignment,
        }
    }

    pub fn size(&self) -> f32 {
        f32::from_bits(self.size_bits)
    }
}

struct Entry<F> {
    format: F,
    /// Monotone insertion stamp; smaller is older.
    seq: u64,
}

/// Insertion-order-bounded format cache.
pub struct FormatCache<F> {
    entries: HashMap<FormatKey, Entry<F>>,
    capacity: usize,
    next_seq: u64,
}

impl<F> FormatCache<F> {
    pub fn new() -> Self {
        Self::with_capacity(FORMAT_CACHE_CAPACITY)
    }

    /// `capacity` must be ≥ 2 so evicting half always leaves room.
    pub fn with_capacity(capacity: usize) -> Self {
        FormatCache {
            entries: HashMap::new(),
            capacity: capacity.max(2),
            next_seq: 0,
        }
    }

    pub fn get(&self, key: &FormatKey) -> Option<&F> {
        self.entries.get(key).map(|e| &e.format)
    }

    pub fn contains(&self, key: &FormatKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a format, evicting the oldest half first when the cache is
    /// full. Returns a reference to the stored format.
    pub fn insert(&mut self, key: FormatKey, format: F) -> &F {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_oldest_half();
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = match self.entries.entry(key) {
            std::collections::hash_map::Entry::Occupied(mut occupied) => {
                occupied.insert(Entry { format, seq });
                occupied.into_mut()
            }
            std::collections::hash_map::Entry::Vacant(vacant) => {
                vacant.insert(Entry { format, seq })
            }
        };
        &entry.format
    }

    fn evict_oldest_half(&mut self) {
        let mut stamps: Vec<u64> = self.entries.values().map(|e| e.seq).collect();
        stamps.sort_unstable();
        let cutoff = stamps[stamps.len() / 2];
        let before = self.entries.len();
        self.entries.retain(|_, e| e.seq >= cutoff);
        log::debug!(
            "format cache evicted {} of {} entries",
            before - self.entries.len(),
            before
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached format (releases their native resources).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<F> Default for FormatCache<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: usize) -> FormatKey {
        FormatKey::new(&format!("Font {n}"), 48.0, false, false, TextAlignment::Center)
    }

    #[test]
    fn get_after_insert() {
        let mut cache: FormatCache<u32> = FormatCache::new();
        cache.insert(key(1), 10);
        assert_eq!(cache.get(&key(1)), Some(&10));
        assert_eq!(cache.get(&key(2)), None);
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let mut cache: FormatCache<usize> = FormatCache::with_capacity(50);
        for n in 0..200 {
            cache.insert(key(n), n);
            assert!(cache.len() <= 50);
        }
    }

    #[test]
    fn overflow_evicts_the_oldest_half() {
        let mut cache: FormatCache<usize> = FormatCache::with_capacity(4);
        for n in 0..4 {
            cache.insert(key(n), n);
        }
        cache.insert(key(4), 4);
        // Keys 0 and 1 were the oldest half.
        assert!(!cache.contains(&key(0)));
        assert!(!cache.contains(&key(1)));
        assert!(cache.contains(&key(2)));
        assert!(cache.contains(&key(3)));
        assert!(cache.contains(&key(4)));
    }

    #[test]
    fn evicted_key_rebuilds_cleanly() {
        let mut cache: FormatCache<usize> = FormatCache::with_capacity(4);
        for n in 0..5 {
            cache.insert(key(n), n);
        }
        assert!(cache.get(&key(0)).is_none());
        cache.insert(key(0), 100);
        assert_eq!(cache.get(&key(0)), Some(&100));
    }

    #[test]
    fn reinserting_existing_key_does_not_evict() {
        let mut cache: FormatCache<usize> = FormatCache::with_capacity(4);
        for n in 0..4 {
            cache.insert(key(n), n);
        }
        cache.insert(key(3), 33);
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.get(&key(3)), Some(&33));
        assert!(cache.contains(&key(0)));
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache: FormatCache<usize> = FormatCache::new();
        cache.insert(key(0), 0);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_distinguish_every_component() {
        let base = FormatKey::new("A", 48.0, false, false, TextAlignment::Center);
        assert_ne!(base, FormatKey::new("B", 48.0, false, false, TextAlignment::Center));
        assert_ne!(base, FormatKey::new("A", 49.0, false, false, TextAlignment::Center));
        assert_ne!(base, FormatKey::new("A", 48.0, true, false, TextAlignment::Center));
        assert_ne!(base, FormatKey::new("A", 48.0, false, true, TextAlignment::Center));
        assert_ne!(base, FormatKey::new("A", 48.0, false, false, TextAlignment::Left));
        assert_eq!(base.size(), 48.0);
    }
}
