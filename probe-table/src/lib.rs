//! Fixed-capacity open-addressing hash table
//!
//! This crate provides a key-value hash table built from first principles:
//! a slot array allocated once at construction, a polynomial rolling hash,
//! linear probing for collisions, and tombstone deletion so removals never
//! break the probe chains of keys placed further along.
//!
//! # Features
//!
//! - **Fixed Capacity**: The slot array never grows; a full table reports
//!   [`TableError::TableFull`] instead of probing forever
//! - **Tombstone Deletion**: Removed slots stay on the chain and are reused
//!   by later inserts
//! - **Explicit Equality**: Key comparison goes through an injectable
//!   [`EqualityPolicy`] (identity first, then value, by default)
//! - **Deterministic Hashing**: `hash(key, capacity)` is a pure function of
//!   the key's ordinals, stable across runs and platforms
//! - **`no_std`**: Only `alloc` is required
//!
//! # Example
//!
//! ```rust
//! use probe_table::HashTable;
//!
//! let mut table = HashTable::new();
//!
//! table.add("a", "1").unwrap();
//! table.add("b", "2").unwrap();
//! assert_eq!(table.size(), 2);
//!
//! assert_eq!(table.remove("b"), Some("2"));
//! assert_eq!(table.size(), 1);
//! assert!(!table.contains("b"));
//! assert!(table.contains("a"));
//! ```

#![warn(missing_docs)]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod equality;
pub mod error;
pub mod hasher;
pub mod probe;
pub mod slot;

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use log::{debug, trace, warn};

pub use config::TableConfig;
pub use equality::{EqualityPolicy, IdentityOrValue};
pub use error::TableError;
pub use hasher::RollingKey;
pub use probe::ProbeSequence;
pub use slot::Slot;

use slot::SlotStore;

/// Number of slots in a table built without an explicit capacity
pub const DEFAULT_CAPACITY: usize = 1024;

/// Outcome of walking a key's probe chain for insertion
enum Locate {
    /// The key is live at this slot
    Found(usize),
    /// The key is absent; this is the slot to place it in
    Vacant(usize),
    /// Every slot on the cycle holds a different live key
    Full,
}

/// Fixed-capacity hash table with linear probing
///
/// # Type Parameters
///
/// - `K`: Key type (must implement [`RollingKey`])
/// - `V`: Value type
/// - `E`: Key equality policy (defaults to [`IdentityOrValue`])
pub struct HashTable<K, V, E = IdentityOrValue> {
    slots: SlotStore<K, V>,
    size: usize,
    equality: E,
    compact_threshold: Option<f64>,
}

impl<K, V> HashTable<K, V, IdentityOrValue> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] slots
    ///
    /// # Examples
    ///
    /// ```
    /// use probe_table::HashTable;
    ///
    /// let table: HashTable<String, i32> = HashTable::new();
    /// assert_eq!(table.capacity(), probe_table::DEFAULT_CAPACITY);
    /// ```
    pub fn new() -> Self {
        Self::build(DEFAULT_CAPACITY, IdentityOrValue, None)
    }

    /// Creates an empty table with exactly `capacity` slots
    ///
    /// Unlike most maps the capacity is the hard limit on live entries, not
    /// a hint. A capacity of zero is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use probe_table::{HashTable, TableError};
    ///
    /// let table: HashTable<u32, u32> = HashTable::with_capacity(100).unwrap();
    /// assert_eq!(table.capacity(), 100);
    ///
    /// let err = HashTable::<u32, u32>::with_capacity(0).err();
    /// assert_eq!(err, Some(TableError::InvalidCapacity { capacity: 0 }));
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_equality(capacity, IdentityOrValue)
    }

    /// Creates an empty table from validated settings
    pub fn from_config(cfg: &TableConfig) -> Result<Self, TableError> {
        Self::from_config_and_equality(cfg, IdentityOrValue)
    }
}

impl<K, V, E> HashTable<K, V, E> {
    /// Creates an empty table with `capacity` slots and the given equality policy
    pub fn with_capacity_and_equality(capacity: usize, equality: E) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity { capacity });
        }
        Ok(Self::build(capacity, equality, None))
    }

    /// Creates an empty table from validated settings and the given equality policy
    pub fn from_config_and_equality(cfg: &TableConfig, equality: E) -> Result<Self, TableError> {
        cfg.validate()?;
        Ok(Self::build(cfg.capacity, equality, cfg.compact_threshold))
    }

    fn build(capacity: usize, equality: E, compact_threshold: Option<f64>) -> Self {
        debug!(
            "Allocating table: {} slots, compact threshold {:?}",
            capacity, compact_threshold
        );
        Self {
            slots: SlotStore::new(capacity),
            size: 0,
            equality,
            compact_threshold,
        }
    }

    /// Returns the number of slots. Never changes after construction.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of live entries
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of live entries
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no live entries
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of tombstone slots left by removals
    pub fn tombstones(&self) -> usize {
        self.slots.tombstones()
    }

    /// Ratio of live entries to slots
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns a reference to the table's equality policy
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Hashes `key` into `[0, capacity)` the same way the table places keys
    pub fn hash<Q>(&self, key: &Q, capacity: usize) -> Result<usize, TableError>
    where
        Q: RollingKey + ?Sized,
    {
        hasher::hash(key, capacity)
    }

    /// Maps a hash to a slot index in `[0, capacity)`
    pub fn index(&self, hash: usize, capacity: usize) -> Result<usize, TableError> {
        hasher::index(hash, capacity)
    }

    /// Compares two possibly absent values with the table's equality policy
    ///
    /// # Examples
    ///
    /// ```
    /// use probe_table::HashTable;
    ///
    /// let table: HashTable<String, String> = HashTable::new();
    /// let a = String::from("xyz");
    /// let b = String::from("xyz");
    ///
    /// assert!(table.is_values_equal(Some(&a), Some(&b)));
    /// assert!(table.is_values_equal::<String>(None, None));
    /// assert!(!table.is_values_equal(None, Some(&a)));
    /// ```
    pub fn is_values_equal<T>(&self, a: Option<&T>, b: Option<&T>) -> bool
    where
        T: ?Sized,
        E: EqualityPolicy<T>,
    {
        self.equality.equal_nullable(a, b)
    }

    /// Clears the table, removing all entries and tombstones
    pub fn clear(&mut self) {
        debug!(
            "Clearing table: {} entries, {} tombstones",
            self.size,
            self.slots.tombstones()
        );
        self.slots.clear();
        self.size = 0;
    }

    /// Iterates over live entries in slot order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter(),
            remaining: self.size,
        }
    }

    /// Iterates over live keys in slot order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over live values in slot order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    #[inline(always)]
    fn note_probe(&self, steps: usize) {
        let capacity = self.capacity();
        if steps > capacity / 4 {
            trace!("Long probe: {} of {} slots visited", steps, capacity);
        }
    }
}

impl<K, V, E> HashTable<K, V, E>
where
    K: RollingKey,
{
    /// Home slot of a key: the first index of its probe sequence
    #[inline(always)]
    fn home<Q>(&self, key: &Q) -> usize
    where
        Q: RollingKey + ?Sized,
    {
        hasher::reduce(key.rolling_hash(), self.capacity())
    }

    /// Finds the slot holding `key`, stopping at the first empty slot
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: RollingKey + ?Sized,
        E: EqualityPolicy<Q>,
    {
        let mut probe = ProbeSequence::new(self.home(key), self.capacity());

        while let Some(idx) = probe.next() {
            match self.slots.get(idx) {
                Slot::Empty => break,
                Slot::Occupied(k, _) if self.equality.equal(k.borrow(), key) => {
                    self.note_probe(probe.steps());
                    return Some(idx);
                }
                _ => {}
            }
        }

        self.note_probe(probe.steps());
        None
    }

    /// Places an entry into a table known to hold no equal key
    fn place_fresh(&mut self, key: K, value: V) {
        let start = self.home(&key);
        let vacant = ProbeSequence::new(start, self.capacity())
            .find(|&idx| !self.slots.get(idx).is_occupied());
        debug_assert!(vacant.is_some(), "no vacant slot for a fresh entry");
        if let Some(idx) = vacant {
            self.slots.occupy(idx, key, value);
        }
    }

    /// Rebuilds the slot array at the same capacity, dropping every
    /// tombstone and re-placing live entries from their home slots.
    pub fn compact(&mut self) {
        let cleared = self.slots.tombstones();
        let entries: Vec<(K, V)> = self.slots.drain().collect();
        for (key, value) in entries {
            self.place_fresh(key, value);
        }
        debug!(
            "Compacted table: {} tombstones cleared, {} entries re-placed",
            cleared, self.size
        );
    }

    /// Moves every entry into a new table with `capacity` slots, keeping the
    /// equality policy and compaction setting.
    ///
    /// Fails with [`TableError::TableFull`] if `capacity` is smaller than the
    /// number of live entries. The original table is consumed either way.
    pub fn rebuild(self, capacity: usize) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity { capacity });
        }
        if self.size > capacity {
            warn!(
                "Rebuild rejected: {} entries do not fit in {} slots",
                self.size, capacity
            );
            return Err(TableError::TableFull { capacity });
        }

        let HashTable {
            slots,
            size,
            equality,
            compact_threshold,
        } = self;

        let mut table = Self::build(capacity, equality, compact_threshold);
        for (key, value) in slots.into_entries() {
            table.place_fresh(key, value);
        }
        table.size = size;
        debug!("Rebuilt table with {} entries into {} slots", size, capacity);
        Ok(table)
    }

    /// Returns a reference to the value for `key`
    ///
    /// A missing key is not an error.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: RollingKey + ?Sized,
        E: EqualityPolicy<Q>,
    {
        self.find(key)
            .and_then(|idx| self.slots.get(idx).entry())
            .map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: RollingKey + ?Sized,
        E: EqualityPolicy<Q>,
    {
        self.find(key).and_then(|idx| self.slots.get(idx).entry())
    }

    /// Returns a mutable reference to the value for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: RollingKey + ?Sized,
        E: EqualityPolicy<Q>,
    {
        let idx = self.find(key)?;
        match self.slots.get_mut(idx) {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Returns true if the table holds `key`
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: RollingKey + ?Sized,
        E: EqualityPolicy<Q>,
    {
        self.find(key).is_some()
    }

    /// Removes `key`, returning its value if it was present
    ///
    /// The slot becomes a tombstone so keys further along the same chain
    /// stay reachable.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: RollingKey + ?Sized,
        E: EqualityPolicy<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value if it was present
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: RollingKey + ?Sized,
        E: EqualityPolicy<Q>,
    {
        let idx = self.find(key)?;
        let entry = self.slots.bury(idx)?;
        self.size -= 1;
        Some(entry)
    }
}

impl<K, V, E> HashTable<K, V, E>
where
    K: RollingKey,
    E: EqualityPolicy<K>,
{
    /// Inserts a key-value pair into the table
    ///
    /// If the key is already present its value is replaced and the old value
    /// returned; the size does not change. Otherwise the entry takes the
    /// first tombstone on the key's chain, or the empty slot that ends it.
    ///
    /// # Errors
    ///
    /// [`TableError::TableFull`] when every slot holds a different live key.
    /// The table is left unchanged.
    pub fn add(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        self.maybe_compact();

        match self.locate(&key) {
            Locate::Found(idx) => match self.slots.get_mut(idx) {
                Slot::Occupied(_, slot_value) => Ok(Some(mem::replace(slot_value, value))),
                _ => Ok(None),
            },
            Locate::Vacant(idx) => {
                self.slots.occupy(idx, key, value);
                self.size += 1;
                Ok(None)
            }
            Locate::Full => {
                let capacity = self.capacity();
                warn!("Insert rejected: all {} slots hold live keys", capacity);
                Err(TableError::TableFull { capacity })
            }
        }
    }

    /// Walks the whole chain for `key`. Tombstones are remembered but never
    /// end the search, since a live copy of the key may sit beyond them.
    fn locate(&self, key: &K) -> Locate {
        let mut first_tombstone = None;
        let mut probe = ProbeSequence::new(self.home(key), self.capacity());

        while let Some(idx) = probe.next() {
            match self.slots.get(idx) {
                Slot::Empty => {
                    self.note_probe(probe.steps());
                    return Locate::Vacant(first_tombstone.unwrap_or(idx));
                }
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(idx);
                }
                Slot::Occupied(k, _) => {
                    if self.equality.equal(k, key) {
                        self.note_probe(probe.steps());
                        return Locate::Found(idx);
                    }
                }
            }
        }

        self.note_probe(probe.steps());
        match first_tombstone {
            Some(idx) => Locate::Vacant(idx),
            None => Locate::Full,
        }
    }

    fn maybe_compact(&mut self) {
        if let Some(ratio) = self.compact_threshold {
            let tombstones = self.slots.tombstones();
            if tombstones > 0 && tombstones as f64 / self.capacity() as f64 >= ratio {
                self.compact();
            }
        }
    }
}

impl<K, V> Default for HashTable<K, V, IdentityOrValue> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, E> fmt::Debug for HashTable<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the live entries of a [`HashTable`]
pub struct Iter<'a, K, V> {
    inner: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.inner.by_ref() {
            if let Slot::Occupied(k, v) = slot {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V, E> IntoIterator for &'a HashTable<K, V, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
