//! A priority-keyed, ordered container.
//!
//! `OrderedStack` holds `(key, entry)` pairs with unique integer keys and
//! always iterates in ascending key order, regardless of insertion order.
//! Three insertion styles share one ordering space:
//!
//! - **append**: after everything queued so far,
//! - **prepend**: before everything queued so far,
//! - **offset_set**: at an explicit key, replacing any entry already there.
//!
//! The append and prepend watermarks only ever move outward, so keys handed
//! out by them are never reused, even after removals or `clear`. When an
//! entry already sits at the end of the key space, append and prepend take
//! the nearest free key instead of overwriting it.
//!
//! Entry types describe their own dedup and identity rules through
//! [`StackEntry`]; the container enforces them.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Position of an entry in an [`OrderedStack`].
pub type Key = i64;

/// Rules an entry type imposes on the container holding it.
pub trait StackEntry {
    /// Entries reporting the same dedup key never coexist: inserting a second
    /// one is a no-op that yields the key of the entry already present.
    fn dedup_key(&self) -> Option<&str> {
        None
    }

    /// Whether `self` and `other` name the same logical thing, so that
    /// [`OrderedStack::set`] with one replaces the other.
    fn same_identity(&self, other: &Self) -> bool;
}

#[derive(Debug, Clone)]
pub struct OrderedStack<T> {
    entries: BTreeMap<Key, T>,
    /// Greatest key ever handed out by `append`.
    high: Option<Key>,
    /// Least key ever handed out by `prepend`.
    low: Option<Key>,
}

impl<T> Default for OrderedStack<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            high: None,
            low: None,
        }
    }
}

impl<T: StackEntry> OrderedStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `entry` after every existing entry and returns its key.
    pub fn append(&mut self, entry: T) -> Key {
        if let Some(existing) = self.find_duplicate(&entry) {
            return existing;
        }
        let key = self.next_high_key();
        self.high = self.high.max(Some(key));
        self.entries.insert(key, entry);
        key
    }

    /// Queues `entry` before every existing entry and returns its key.
    pub fn prepend(&mut self, entry: T) -> Key {
        if let Some(existing) = self.find_duplicate(&entry) {
            return existing;
        }
        let key = self.next_low_key();
        self.low = Some(self.low.map_or(key, |low| low.min(key)));
        self.entries.insert(key, entry);
        key
    }

    /// Drops every entry sharing `entry`'s identity, then appends it.
    pub fn set(&mut self, entry: T) -> Key {
        let before = self.entries.len();
        self.entries.retain(|_, existing| !existing.same_identity(&entry));
        let replaced = before - self.entries.len();
        if replaced > 0 {
            log::debug!("set() replaced {} queued entries", replaced);
        }
        self.append(entry)
    }

    /// Stores `entry` at `key`, replacing whatever was there.
    ///
    /// The append/prepend watermarks are left untouched.
    pub fn offset_set(&mut self, key: Key, entry: T) -> Key {
        if let Some(existing) = self.find_duplicate(&entry) {
            return existing;
        }
        self.entries.insert(key, entry);
        key
    }

    fn find_duplicate(&self, entry: &T) -> Option<Key> {
        let wanted = entry.dedup_key()?;
        let found = self
            .entries
            .iter()
            .find(|(_, existing)| existing.dedup_key() == Some(wanted))
            .map(|(key, _)| *key);
        if let Some(key) = found {
            log::trace!("'{}' is already queued at key {}; ignoring", wanted, key);
        }
        found
    }

    fn next_high_key(&self) -> Key {
        let live_max = self.entries.last_key_value().map(|(key, _)| *key);
        match self.high.max(live_max) {
            Some(key) => key.checked_add(1).unwrap_or_else(|| self.free_key_below(Key::MAX)),
            None => 0,
        }
    }

    fn next_low_key(&self) -> Key {
        let live_min = self.entries.first_key_value().map(|(key, _)| *key);
        let floor = match (self.low, live_min) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        match floor {
            Some(key) => key.checked_sub(1).unwrap_or_else(|| self.free_key_above(Key::MIN)),
            None => 0,
        }
    }

    /// The greatest unused key at or below `start`, once the top of the key
    /// space is taken.
    fn free_key_below(&self, start: Key) -> Key {
        log::warn!("Append keys are exhausted; falling back to the highest free key");
        (Key::MIN..=start)
            .rev()
            .find(|key| !self.entries.contains_key(key))
            .unwrap_or(start)
    }

    /// The least unused key at or above `start`, once the bottom of the key
    /// space is taken.
    fn free_key_above(&self, start: Key) -> Key {
        log::warn!("Prepend keys are exhausted; falling back to the lowest free key");
        (start..=Key::MAX)
            .find(|key| !self.entries.contains_key(key))
            .unwrap_or(start)
    }
}

impl<T> OrderedStack<T> {
    pub fn remove(&mut self, key: Key) -> Option<T> {
        self.entries.remove(&key)
    }

    /// Removes every entry. Watermarks are kept, so keys are not reused.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: Key) -> Option<&T> {
        self.entries.get(&key)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.entries.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// The entry with the greatest key.
    pub fn last(&self) -> Option<(Key, &T)> {
        self.entries.last_key_value().map(|(key, entry)| (*key, entry))
    }

    /// The entry with the least key.
    pub fn first(&self) -> Option<(Key, &T)> {
        self.entries.first_key_value().map(|(key, entry)| (*key, entry))
    }
}

/// Ascending-key iterator over an [`OrderedStack`].
pub struct Iter<'a, T> {
    inner: btree_map::Iter<'a, Key, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Key, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, entry)| (*key, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> IntoIterator for &'a OrderedStack<T> {
    type Item = (Key, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
