//! Crate root: public surface and protocol-wide invariants
//!
//! This module is the single canonical entry-point for downstream users of
//! the library: it re-exports the submodules implementing the Pythia
//! partially-oblivious PRF core and the crate-wide error type.
//!
//! ## Invariants
//!
//! - **Curve.** All arithmetic runs over BN254 (`ark_bn254`), a type-3
//!   pairing curve: `e: G1 × G2 → G_T`. G1, G2 and G_T share one prime
//!   order, the scalar field `Fr`'s modulus — `ord_1` and `ord_T` in the
//!   module docs are numerically identical on this curve, though the API
//!   keeps them as distinct names (see [`params`]).
//! - **State.** The pairing environment must be brought up with [`init`]
//!   before any other operation; [`deinit`] tears it back down. Every public
//!   function here returns [`Error::NotInitialized`] outside that window.
//! - **Randomness.** Every operation that needs entropy (`blind`, `prove`)
//!   takes the caller's RNG rather than reaching for a global one, so tests
//!   can inject deterministic or adversarial sources.
//! - **Proof semantics.** [`proof::verify`] treats a well-formed but
//!   incorrect proof as an ordinary `Ok(false)`, never an error; only
//!   [`proof::verify_strict`] folds rejection into the `Result` channel.
//!
//! All arithmetic is constant-time as provided by Arkworks; this crate
//! forbids unsafe code throughout.

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms)]

/// Crate-wide error type.
pub mod error;
/// Process-wide pairing parameter cache: `init` / `deinit`.
pub mod params;
/// Hash-to-group, `H_1` and `H_2`.
pub mod hash;
/// Per-tweak scalar derivation, `genKw`.
pub mod genkw;
/// Client-side blinding and deblinding.
pub mod blind;
/// Server-side evaluation.
pub mod eval;
/// Chaum-Pedersen zero-knowledge proof of correct evaluation.
pub mod proof;
/// Key rotation: `getDelta` / `update`.
pub mod delta;
/// Ergonomic client/server session wrappers over the free-function core.
pub mod session;

pub use error::Error;
pub use params::{deinit, init};
