use std::num::NonZeroUsize;

use lru::LruCache;

use crate::data::types::{WaveKey, WaveRecord};

/// Bound on the duplicate-suppression key set. Old keys aging out can in
/// principle let an ancient wave re-append, but live events only carry new
/// waves, so the bound is effectively a memory cap.
const SEEN_CACHE_SIZE: usize = 4096;

/// Ordered in-memory wave list. Seeded wholesale by the bulk read and
/// appended to by live events; arrival order is preserved. A wave that
/// arrives through both paths (the seed/live race) is kept once.
pub struct WaveStore {
    waves: Vec<WaveRecord>,
    seen: LruCache<WaveKey, ()>,
}

impl WaveStore {
    pub fn new() -> Self {
        Self {
            waves: Vec::new(),
            seen: LruCache::new(NonZeroUsize::new(SEEN_CACHE_SIZE).unwrap()),
        }
    }

    /// Replace the list wholesale with a bulk-read result, re-priming the
    /// duplicate-suppression keys from the new contents.
    pub fn seed(&mut self, records: Vec<WaveRecord>) {
        self.seen.clear();
        for record in &records {
            self.seen.put(record.key(), ());
        }
        self.waves = records;
    }

    /// Append one record, preserving arrival order. Returns false (and
    /// leaves the list untouched) if the same wave is already present.
    pub fn append(&mut self, record: WaveRecord) -> bool {
        let key = record.key();
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.put(key, ());
        self.waves.push(record);
        true
    }

    pub fn waves(&self) -> &[WaveRecord] {
        &self.waves
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

impl Default for WaveStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn record(n: u8, ts: u64, msg: &str) -> WaveRecord {
        WaveRecord::new(Address::from_slice(&[n; 20]), ts, msg.to_string())
    }

    #[test]
    fn test_seed_preserves_order_and_count() {
        let mut store = WaveStore::new();
        let records = vec![
            record(1, 1000, "first"),
            record(2, 2000, "second"),
            record(3, 3000, "third"),
        ];
        store.seed(records.clone());
        assert_eq!(store.len(), 3);
        assert_eq!(store.waves(), records.as_slice());
    }

    #[test]
    fn test_seed_empty() {
        let mut store = WaveStore::new();
        store.seed(vec![record(1, 1000, "old")]);
        store.seed(Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = WaveStore::new();
        store.seed(vec![record(1, 1000, "a")]);
        assert!(store.append(record(2, 2000, "b")));
        assert!(store.append(record(3, 3000, "c")));
        let messages: Vec<&str> = store.waves().iter().map(|w| w.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_append_duplicate_of_seeded_wave_is_noop() {
        let mut store = WaveStore::new();
        store.seed(vec![record(1, 1000, "hi")]);
        assert!(!store.append(record(1, 1000, "hi")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_duplicate_of_live_wave_is_noop() {
        let mut store = WaveStore::new();
        assert!(store.append(record(1, 1000, "hi")));
        assert!(!store.append(record(1, 1000, "hi")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_sender_different_wave_is_kept() {
        let mut store = WaveStore::new();
        assert!(store.append(record(1, 1000, "hi")));
        assert!(store.append(record(1, 2000, "hi")));
        assert!(store.append(record(1, 2000, "bye")));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_reseed_allows_no_double_append() {
        // A submit-refresh reseeds while the live event for the same wave
        // may still arrive afterwards; it must not double the entry.
        let mut store = WaveStore::new();
        store.seed(vec![record(1, 1000, "a"), record(2, 2000, "b")]);
        assert!(!store.append(record(2, 2000, "b")));
        assert_eq!(store.len(), 2);
    }
}
