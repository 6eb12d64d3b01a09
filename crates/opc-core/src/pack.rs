//! # Pack Primitives
//!
//! Newtypes for the two quantities the calculator reasons about, and the
//! immutable set of pack sizes a calculation runs against.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The fixed number of items contained in one pack. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct PackSize(u64);

impl PackSize {
    /// Create a pack size, rejecting zero.
    pub fn new(size: u64) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::InvalidPackSize(0));
        }
        Ok(Self(size))
    }

    /// Number of items in one pack.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for PackSize {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::InvalidPackSize(value));
        }
        Ok(Self(value as u64))
    }
}

impl From<PackSize> for u64 {
    fn from(size: PackSize) -> Self {
        size.0
    }
}

impl fmt::Display for PackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of items a caller asked for. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct OrderQuantity(u64);

impl OrderQuantity {
    /// Create an order quantity, rejecting zero.
    pub fn new(quantity: u64) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidOrder(0));
        }
        Ok(Self(quantity))
    }

    /// Number of items ordered.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for OrderQuantity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::InvalidOrder(value));
        }
        Ok(Self(value as u64))
    }
}

impl From<OrderQuantity> for u64 {
    fn from(order: OrderQuantity) -> Self {
        order.0
    }
}

impl fmt::Display for OrderQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Duplicate-free set of pack sizes, iterated smallest first.
///
/// Sets are values: adding or removing a size produces a new set and leaves
/// the original untouched, which is what lets the registry hand out snapshots
/// without copying on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackSizeSet {
    sizes: BTreeSet<PackSize>,
}

impl PackSizeSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn contains(&self, size: PackSize) -> bool {
        self.sizes.contains(&size)
    }

    /// Sizes in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = PackSize> + ExactSizeIterator + '_ {
        self.sizes.iter().copied()
    }

    /// Largest size, or `None` for an empty set.
    pub fn largest(&self) -> Option<PackSize> {
        self.sizes.last().copied()
    }

    /// Sizes in ascending order, collected.
    pub fn to_vec(&self) -> Vec<PackSize> {
        self.iter().collect()
    }

    /// A copy of this set with `size` added. Returns `None` if already present.
    pub fn with(&self, size: PackSize) -> Option<Self> {
        if self.contains(size) {
            return None;
        }
        let mut sizes = self.sizes.clone();
        sizes.insert(size);
        Some(Self { sizes })
    }

    /// A copy of this set with `size` removed. Returns `None` if absent.
    pub fn without(&self, size: PackSize) -> Option<Self> {
        if !self.contains(size) {
            return None;
        }
        let mut sizes = self.sizes.clone();
        sizes.remove(&size);
        Some(Self { sizes })
    }
}

impl FromIterator<PackSize> for PackSizeSet {
    fn from_iter<I: IntoIterator<Item = PackSize>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PackSizeSet {
    type Item = PackSize;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, PackSize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sizes.iter().copied()
    }
}
