//! Polynomial rolling hash over key ordinals
//!
//! A key is hashed by feeding its ordinal sequence through a base-31
//! accumulator (`acc = acc * 31 + ordinal`) using wrapping 32-bit signed
//! arithmetic. The accumulator is then reduced into `[0, capacity)` with a
//! Euclidean remainder, so keys whose accumulator wrapped negative still map
//! to a valid bucket.
//!
//! ```
//! use probe_table::hasher::{hash, index};
//!
//! let h = hash("34", 100).unwrap();
//! assert_eq!(h, 33);
//! assert_eq!(index(h, 100).unwrap(), 33);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::TableError;

/// Multiplier applied to the accumulator before each ordinal is added
pub const MULTIPLIER: i32 = 31;

/// Accumulator state for the rolling hash
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollingHash {
    acc: i32,
}

impl RollingHash {
    /// Creates an accumulator starting at zero
    pub const fn new() -> Self {
        Self { acc: 0 }
    }

    /// Folds one ordinal into the accumulator
    #[inline(always)]
    pub fn write_ordinal(&mut self, ordinal: u32) {
        self.acc = self
            .acc
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(ordinal as i32);
    }

    /// Returns the raw, unreduced accumulator
    #[inline(always)]
    pub fn finish(&self) -> i32 {
        self.acc
    }
}

/// Types that can be viewed as an ordered sequence of ordinal values.
///
/// Two keys that compare equal must produce the same ordinal sequence, and a
/// borrowed form (`str` for `String`) must roll exactly like its owner so
/// lookups through [`Borrow`](core::borrow::Borrow) land on the same bucket.
pub trait RollingKey {
    /// Feeds this key's ordinals into `state`, in order
    fn roll(&self, state: &mut RollingHash);

    /// Returns the unreduced accumulator for this key alone
    fn rolling_hash(&self) -> i32 {
        let mut state = RollingHash::new();
        self.roll(&mut state);
        state.finish()
    }
}

impl RollingKey for str {
    fn roll(&self, state: &mut RollingHash) {
        for c in self.chars() {
            state.write_ordinal(c as u32);
        }
    }
}

impl RollingKey for String {
    fn roll(&self, state: &mut RollingHash) {
        self.as_str().roll(state);
    }
}

impl RollingKey for char {
    fn roll(&self, state: &mut RollingHash) {
        state.write_ordinal(*self as u32);
    }
}

impl RollingKey for bool {
    fn roll(&self, state: &mut RollingHash) {
        state.write_ordinal(*self as u32);
    }
}

impl RollingKey for [u8] {
    fn roll(&self, state: &mut RollingHash) {
        for &b in self {
            state.write_ordinal(b as u32);
        }
    }
}

impl RollingKey for Vec<u8> {
    fn roll(&self, state: &mut RollingHash) {
        self.as_slice().roll(state);
    }
}

impl<const N: usize> RollingKey for [u8; N] {
    fn roll(&self, state: &mut RollingHash) {
        self.as_slice().roll(state);
    }
}

macro_rules! narrow_int_key {
    ($($t:ty),*) => {
        $(
            impl RollingKey for $t {
                // Signed values are sign extended before reinterpretation.
                fn roll(&self, state: &mut RollingHash) {
                    state.write_ordinal(*self as i32 as u32);
                }
            }
        )*
    };
}

narrow_int_key!(u8, u16, u32, i8, i16, i32);

macro_rules! wide_int_key {
    ($($t:ty),*) => {
        $(
            impl RollingKey for $t {
                fn roll(&self, state: &mut RollingHash) {
                    let v = *self as u64;
                    state.write_ordinal((v ^ (v >> 32)) as u32);
                }
            }
        )*
    };
}

wide_int_key!(u64, i64, usize, isize);

impl<T: RollingKey + ?Sized> RollingKey for &T {
    fn roll(&self, state: &mut RollingHash) {
        (**self).roll(state);
    }
}

impl<T: RollingKey + ?Sized> RollingKey for Box<T> {
    fn roll(&self, state: &mut RollingHash) {
        (**self).roll(state);
    }
}

impl<T: RollingKey + ?Sized> RollingKey for Rc<T> {
    fn roll(&self, state: &mut RollingHash) {
        (**self).roll(state);
    }
}

impl<T: RollingKey + ?Sized> RollingKey for Arc<T> {
    fn roll(&self, state: &mut RollingHash) {
        (**self).roll(state);
    }
}

impl<A: RollingKey, B: RollingKey> RollingKey for (A, B) {
    fn roll(&self, state: &mut RollingHash) {
        self.0.roll(state);
        self.1.roll(state);
    }
}

impl<A: RollingKey, B: RollingKey, C: RollingKey> RollingKey for (A, B, C) {
    fn roll(&self, state: &mut RollingHash) {
        self.0.roll(state);
        self.1.roll(state);
        self.2.roll(state);
    }
}

#[inline(always)]
fn check_capacity(capacity: usize) -> Result<(), TableError> {
    if capacity == 0 {
        return Err(TableError::InvalidCapacity { capacity });
    }
    Ok(())
}

/// Reduces a raw accumulator into `[0, capacity)`. `capacity` must be non-zero.
#[inline(always)]
pub(crate) fn reduce(acc: i32, capacity: usize) -> usize {
    let modulus = i64::try_from(capacity).unwrap_or(i64::MAX);
    (acc as i64).rem_euclid(modulus) as usize
}

/// Hashes `key` into `[0, capacity)`.
///
/// Fails with [`TableError::InvalidCapacity`] when `capacity` is zero.
pub fn hash<Q>(key: &Q, capacity: usize) -> Result<usize, TableError>
where
    Q: RollingKey + ?Sized,
{
    check_capacity(capacity)?;
    Ok(reduce(key.rolling_hash(), capacity))
}

/// Maps a hash to a slot index in `[0, capacity)`.
///
/// Hashes produced by [`hash`] against the same capacity pass through
/// unchanged.
pub fn index(hash: usize, capacity: usize) -> Result<usize, TableError> {
    check_capacity(capacity)?;
    Ok(hash % capacity)
}

/// Bucket distribution of a key set against one capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Number of keys hashed
    pub keys: usize,
    /// Number of distinct buckets hit
    pub occupied_buckets: usize,
    /// Number of keys whose bucket was already hit by an earlier key
    pub collisions: usize,
}

/// Hashes every key against `capacity` and counts bucket collisions.
pub fn collisions<'a, Q, I>(keys: I, capacity: usize) -> Result<CollisionReport, TableError>
where
    Q: RollingKey + ?Sized + 'a,
    I: IntoIterator<Item = &'a Q>,
{
    check_capacity(capacity)?;
    let mut seen = vec![false; capacity];
    let mut report = CollisionReport::default();

    for key in keys {
        let bucket = index(hash(key, capacity)?, capacity)?;
        report.keys += 1;
        if seen[bucket] {
            report.collisions += 1;
        } else {
            seen[bucket] = true;
            report.occupied_buckets += 1;
        }
    }

    Ok(report)
}
