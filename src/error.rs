//! Crate-wide error type
//!
//! Mirrors the five error kinds the core must distinguish: a call before
//! `init()`, RNG exhaustion, an internal pairing-library fault, a malformed
//! caller-provided encoding, and proof rejection. The last is intentionally
//! *not* constructed by [`crate::proof::verify`] itself — verification
//! failure is a normal boolean result, not a fault (see module docs on
//! `proof`) — but it is kept here for [`crate::proof::verify_strict`] and
//! for any caller that wants rejection folded into its own `Result` chain.

#![forbid(unsafe_code)]

/// Errors surfaced by the Pythia core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation was called before [`crate::params::init`] succeeded, or
    /// after [`crate::params::deinit`] invalidated the cache.
    #[error("pythia core not initialized; call pythia::init() first")]
    NotInitialized,

    /// The configured randomness source did not produce the bytes an
    /// operation needed.
    #[error("random number generator failed to produce entropy")]
    RngFailure,

    /// The underlying pairing arithmetic signaled an internal fault
    /// (a group element had no inverse where one was required, a MAC key
    /// could not be installed, etc).
    #[error("pairing arithmetic failure: {0}")]
    ArithmeticFailure(String),

    /// A caller-provided serialized group element failed to decode into a
    /// well-formed point. Only relevant at the boundary of wrappers that
    /// deserialize bytes before calling into this crate.
    #[error("invalid group element encoding")]
    InvalidEncoding,

    /// A proof was well-formed but did not verify. Not returned by
    /// [`crate::proof::verify`]; see [`crate::proof::verify_strict`].
    #[error("proof failed verification")]
    VerificationFailed,
}

/// Convenience alias used throughout this crate's public API.
pub type Result<T> = std::result::Result<T, Error>;
