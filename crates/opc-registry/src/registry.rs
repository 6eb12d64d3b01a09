//! # Pack Registry
//!
//! Copy-on-write set of pack sizes behind a versioned pointer swap.
//!
//! Reads clone an `Arc` under a momentary read guard and never wait on a
//! mutation in progress. Mutations serialize on a separate mutex, build the
//! next [`PackSnapshot`] off-lock, and take the write guard only for the
//! pointer swap. Locks are `parking_lot` (non-poisoning) and are never held
//! across `.await` points.

use std::sync::Arc;

use opc_core::{PackSize, PackSizeSet};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use crate::error::RegistryError;

/// Sizes a freshly started service offers when no configuration is given.
pub const DEFAULT_PACK_SIZES: [u64; 5] = [250, 500, 1000, 2000, 5000];

/// Immutable view of the registry at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackSnapshot {
    version: u64,
    sizes: PackSizeSet,
}

impl PackSnapshot {
    /// Number of successful mutations before this snapshot was taken.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn sizes(&self) -> &PackSizeSet {
        &self.sizes
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Shared, cloneable handle to the pack size registry.
#[derive(Clone)]
pub struct PackRegistry {
    inner: Arc<Inner>,
}

struct Inner {
    current: RwLock<Arc<PackSnapshot>>,
    writer: Mutex<()>,
}

impl std::fmt::Debug for PackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("PackRegistry")
            .field("version", &snapshot.version)
            .field("sizes", &snapshot.sizes.to_vec())
            .finish()
    }
}

impl PackRegistry {
    /// Create a registry holding `initial` (duplicates collapse). Version 0.
    pub fn new(initial: impl IntoIterator<Item = PackSize>) -> Self {
        let snapshot = PackSnapshot {
            version: 0,
            sizes: initial.into_iter().collect(),
        };
        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(Arc::new(snapshot)),
                writer: Mutex::new(()),
            }),
        }
    }

    /// Create a registry seeded with [`DEFAULT_PACK_SIZES`].
    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_PACK_SIZES
                .iter()
                .filter_map(|&size| PackSize::new(size).ok()),
        )
    }

    /// Create a registry with no sizes.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// The current snapshot. Holding it does not block mutations.
    pub fn snapshot(&self) -> Arc<PackSnapshot> {
        Arc::clone(&self.inner.current.read())
    }

    /// Current sizes, ascending.
    pub fn list(&self) -> Vec<PackSize> {
        self.snapshot().sizes.to_vec()
    }

    /// Register `size`. Fails with [`RegistryError::Duplicate`] if present.
    pub fn add(&self, size: PackSize) -> Result<Arc<PackSnapshot>, RegistryError> {
        let next = self.mutate(|sizes| sizes.with(size).ok_or(RegistryError::Duplicate(size)))?;
        tracing::info!(size = size.get(), version = next.version, "pack size added");
        Ok(next)
    }

    /// Unregister `size`. Fails with [`RegistryError::NotFound`] if absent.
    pub fn remove(&self, size: PackSize) -> Result<Arc<PackSnapshot>, RegistryError> {
        let next = self.mutate(|sizes| sizes.without(size).ok_or(RegistryError::NotFound(size)))?;
        tracing::info!(size = size.get(), version = next.version, "pack size removed");
        if next.is_empty() {
            tracing::warn!("registry is empty; calculations will fail until a size is added");
        }
        Ok(next)
    }

    fn mutate(
        &self,
        f: impl FnOnce(&PackSizeSet) -> Result<PackSizeSet, RegistryError>,
    ) -> Result<Arc<PackSnapshot>, RegistryError> {
        let _writer = self.inner.writer.lock();
        let current = self.snapshot();
        let next = Arc::new(PackSnapshot {
            version: current.version + 1,
            sizes: f(&current.sizes)?,
        });
        *self.inner.current.write() = Arc::clone(&next);
        Ok(next)
    }
}

impl Default for PackRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
