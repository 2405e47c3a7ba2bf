//! Pluggable hash capability
//!
//! The engine never names a concrete digest. It asks a [`HashFactory`] for a
//! fresh [`ProofHasher`] once per search and resets it before every
//! candidate, so factories that hand out recycled instances are fine.

use std::sync::Arc;

use sha2::Sha512;
use sha2::digest::DynDigest;

use crate::error::HashError;

/// Stateful digest: reset, streaming absorption, finalization.
///
/// Instances are used by one search at a time and never shared across
/// threads, so implementations only need to be `Send`.
pub trait ProofHasher: Send {
    /// Discard any absorbed input.
    fn reset(&mut self);

    /// Absorb `data` into the running state.
    fn update(&mut self, data: &[u8]) -> Result<(), HashError>;

    /// Produce the digest of everything absorbed since the last reset.
    ///
    /// The hasher is left reset afterwards.
    fn finalize(&mut self) -> Result<Vec<u8>, HashError>;
}

/// Shared constructor for hash instances, cloned into every search snapshot.
pub type HashFactory = Arc<dyn Fn() -> Box<dyn ProofHasher> + Send + Sync>;

/// Adapter for any RustCrypto digest (`Sha512`, `Sha256`, ...).
#[derive(Debug, Clone, Default)]
pub struct DigestHasher<D> {
    inner: D,
}

impl<D: DynDigest + Default> DigestHasher<D> {
    pub fn new() -> Self {
        Self { inner: D::default() }
    }
}

impl<D: DynDigest + Send> ProofHasher for DigestHasher<D> {
    fn reset(&mut self) {
        DynDigest::reset(&mut self.inner);
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        DynDigest::update(&mut self.inner, data);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>, HashError> {
        Ok(DynDigest::finalize_reset(&mut self.inner).into_vec())
    }
}

impl ProofHasher for blake3::Hasher {
    fn reset(&mut self) {
        blake3::Hasher::reset(self);
    }

    fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        blake3::Hasher::update(self, data);
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>, HashError> {
        let digest = blake3::Hasher::finalize(self);
        blake3::Hasher::reset(self);
        Ok(digest.as_bytes().to_vec())
    }
}

/// Wrap a closure as a [`HashFactory`].
pub fn hash_factory<F, H>(make: F) -> HashFactory
where
    F: Fn() -> H + Send + Sync + 'static,
    H: ProofHasher + 'static,
{
    Arc::new(move || Box::new(make()) as Box<dyn ProofHasher>)
}

/// Factory for any RustCrypto digest type.
pub fn digest_factory<D>() -> HashFactory
where
    D: DynDigest + Default + Send + 'static,
{
    hash_factory(DigestHasher::<D>::new)
}

/// Default factory: SHA-512.
pub fn sha512_factory() -> HashFactory {
    digest_factory::<Sha512>()
}

/// BLAKE3 with its 256-bit default output.
pub fn blake3_factory() -> HashFactory {
    hash_factory(blake3::Hasher::new)
}
