//! Insertion-ordered keyed collection with a capacity cap.

use indexmap::IndexMap;

/// A string-keyed map that keeps first-seen order and stops admitting new
/// keys once `capacity` distinct keys are present.
///
/// Keys already present stay writable after the cap is reached, so repeat
/// sightings keep accumulating. Dropped keys are not reported anywhere.
///
/// # Examples
///
/// ```
/// use gitstat_history::collection::CappedMap;
///
/// let mut counts: CappedMap<u64> = CappedMap::new(2);
/// for key in ["a", "b", "c", "a"] {
///     if let Some(count) = counts.get_or_insert_with(key, || 0) {
///         *count += 1;
///     }
/// }
/// assert_eq!(counts.len(), 2);
/// assert_eq!(counts.get("a"), Some(&2));
/// assert_eq!(counts.get("c"), None);
/// ```
#[derive(Debug, Clone)]
pub struct CappedMap<V> {
    entries: IndexMap<String, V>,
    capacity: usize,
}

impl<V> CappedMap<V> {
    /// Create an empty map that retains at most `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity,
        }
    }

    /// Return the entry for `key`, inserting `make()` if the key is new and
    /// there is room. Returns `None` when the key is new and the map is full.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> Option<&mut V> {
        if let Some(index) = self.entries.get_index_of(key) {
            return self.entries.get_index_mut(index).map(|(_, value)| value);
        }
        if self.is_full() {
            return None;
        }
        let (index, _) = self.entries.insert_full(key.to_string(), make());
        self.entries.get_index_mut(index).map(|(_, value)| value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Iterate `(key, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate values mutably in first-seen order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }

    /// Consume the map, yielding values in first-seen order.
    pub fn into_values(self) -> Vec<V> {
        self.entries.into_values().collect()
    }
}
