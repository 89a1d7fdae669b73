//! Thread-safe handle over an [`IntegrityRegistry`].

use std::sync::{Arc, RwLock};

use embedguard_core::{TokenId, Vector, VectorSet, VerdictMap};

use crate::{IntegrityRegistry, RegistryError};

/// A cloneable registry handle that serializes registration against
/// verification.
///
/// `register` takes the write lock; `verify` takes the read lock, so
/// concurrent verifications proceed in parallel but never observe a
/// half-applied registration.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<IntegrityRegistry>>,
}

impl SharedRegistry {
    /// Create a handle over an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing registry.
    #[must_use]
    pub fn from_registry(registry: IntegrityRegistry) -> Self {
        Self { inner: Arc::new(RwLock::new(registry)) }
    }

    /// See [`IntegrityRegistry::register`].
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn register<'a, I>(&self, trusted: I)
    where
        I: IntoIterator<Item = (TokenId, &'a Vector)>,
    {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.inner.write().expect("registry write lock poisoned").register(trusted);
    }

    /// See [`IntegrityRegistry::verify`].
    ///
    /// # Errors
    /// Returns [`RegistryError::MissingEntry`] if `candidate` is incomplete.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn verify(&self, candidate: &VectorSet) -> Result<VerdictMap, RegistryError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let registry = self.inner.read().expect("registry read lock poisoned");
        registry.verify(candidate)
    }

    /// Copy of the current baseline.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> IntegrityRegistry {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let registry = self.inner.read().expect("registry read lock poisoned");
        (*registry).clone()
    }
}
