//! Parameters & Init — process-wide, read-only pairing parameter cache
//!
//! Brings the pairing environment into a usable state once and caches the
//! order of G1 (`ord_1`), the order of G_T (`ord_T`), and the fixed
//! generator `g_1` of G1, following the same lazily-initialized singleton
//! pattern the teacher crate uses for its SRS state (`pcs::srs_g1()` /
//! `pcs::srs_g2()`): a `OnceLock` guarding a `RwLock<Option<_>>` so the slot
//! can later be invalidated by `deinit()`, which a plain `OnceLock` cannot do.
//!
//! For BN254 — a type-3 pairing curve — G1, G2 and G_T all have prime order
//! equal to the scalar field `Fr`'s modulus, so `ord_1` and `ord_T` are
//! numerically identical here. They are still carried as distinct named
//! fields (invariant 1 in the spec treats them independently) so a future
//! curve swap with distinct source/target orders only touches this module.

#![forbid(unsafe_code)]

use std::sync::{OnceLock, RwLock};

use ark_bn254::{Fr, G1Affine};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;

use crate::error::{Error, Result};

/// The fixed, publicly-known pairing parameters this crate operates over.
#[derive(Clone, Copy, Debug)]
pub struct Params {
    /// Order of G1 (`ord_1` in the spec).
    pub ord_1: <Fr as PrimeField>::BigInt,
    /// Order of G_T (`ord_T` in the spec). Numerically equal to `ord_1` on
    /// BN254, kept separate for documentation and future curve changes.
    pub ord_t: <Fr as PrimeField>::BigInt,
    /// Fixed generator of G1 (`g_1` in the spec).
    pub g1: G1Affine,
}

fn cache() -> &'static RwLock<Option<Params>> {
    static CACHE: OnceLock<RwLock<Option<Params>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(None))
}

/// Bring the pairing environment into a usable state and populate the
/// parameter cache. Idempotent: a second call after a successful first call
/// is a no-op that returns `Ok(())`.
pub fn init() -> Result<()> {
    let mut guard = cache()
        .write()
        .map_err(|_| Error::ArithmeticFailure("parameter cache lock poisoned".into()))?;
    if guard.is_some() {
        return Ok(());
    }

    let g1 = G1Affine::generator();
    let ord_1 = Fr::MODULUS;
    let ord_t = Fr::MODULUS;

    *guard = Some(Params { ord_1, ord_t, g1 });
    tracing::debug!("pythia core initialized");
    Ok(())
}

/// Release environment-level resources and invalidate the parameter cache.
/// After `deinit()`, no other core operation is defined until `init()`
/// succeeds again.
pub fn deinit() {
    if let Some(lock) = cache().get() {
        if let Ok(mut guard) = lock.write() {
            *guard = None;
        }
    }
    tracing::debug!("pythia core deinitialized");
}

/// Read the current parameter cache, failing with [`Error::NotInitialized`]
/// if `init()` has not (yet, or still) succeeded.
pub(crate) fn params() -> Result<Params> {
    let lock = cache().get().ok_or(Error::NotInitialized)?;
    let guard = lock
        .read()
        .map_err(|_| Error::ArithmeticFailure("parameter cache lock poisoned".into()))?;
    guard.ok_or(Error::NotInitialized)
}

/// Serializes every test in this crate that touches the parameter cache.
///
/// `cargo test` runs unit tests from every module in one multi-threaded
/// binary, and the cache in [`cache`] is process-wide — a test in this
/// module that calls [`deinit`] would otherwise race a test in, say,
/// `eval.rs` that assumes `init()` stays in effect for its whole body,
/// turning a spurious `NotInitialized` into a flaky panic. Every test
/// anywhere in the crate that calls [`init`] or [`deinit`] must hold this
/// lock for its duration.
#[cfg(test)]
pub(crate) fn test_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<std::sync::Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| std::sync::Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let _guard = test_lock();
        init().expect("first init");
        init().expect("second init is a no-op");
        let p = params().expect("params available after init");
        assert_eq!(p.g1, G1Affine::generator());
    }

    #[test]
    fn operations_fail_before_init() {
        let _guard = test_lock();
        deinit();
        assert!(matches!(params(), Err(Error::NotInitialized)));
        init().expect("leave cache initialized for other tests");
    }

    #[test]
    fn deinit_invalidates_then_reinit_recovers() {
        let _guard = test_lock();
        init().expect("init");
        deinit();
        assert!(matches!(params(), Err(Error::NotInitialized)));
        init().expect("reinit");
        assert!(params().is_ok());
    }
}
