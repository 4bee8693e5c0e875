//! Key and value equality policies
//!
//! The table never calls `==` directly. Every key comparison goes through
//! an [`EqualityPolicy`] chosen at construction, which makes the identity
//! and value semantics explicit instead of relying on whatever `PartialEq`
//! a key type happens to provide.

use core::ptr;

/// Decides whether two values are the same.
pub trait EqualityPolicy<T: ?Sized> {
    /// Compares two present values
    fn equal(&self, a: &T, b: &T) -> bool;

    /// Compares two possibly absent values.
    ///
    /// Absent equals absent. Absent never equals a present value, in
    /// either argument order.
    fn equal_nullable(&self, a: Option<&T>, b: Option<&T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => self.equal(a, b),
            _ => false,
        }
    }
}

/// Same instance, or structurally equal.
///
/// References to one instance compare equal without calling `PartialEq`,
/// so a type whose `PartialEq` is not reflexive (such as `f64::NAN`) still
/// equals itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityOrValue;

impl<T: PartialEq + ?Sized> EqualityPolicy<T> for IdentityOrValue {
    #[inline(always)]
    fn equal(&self, a: &T, b: &T) -> bool {
        ptr::eq(a, b) || a == b
    }
}

impl<T: ?Sized, F> EqualityPolicy<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline(always)]
    fn equal(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
