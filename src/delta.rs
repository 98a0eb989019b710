//! Key rotation — `getDelta` / `update`
//!
//! Rotating the master secret from one epoch to the next changes every
//! `k_w`, which would normally force re-enrollment of every stored record.
//! Instead the server publishes a single rotation factor `δ` per tweak and
//! each client (or a background migration job holding both old and new
//! `msk`) rolls its stored value forward with [`update`] — no re-blinding
//! protocol required.

#![forbid(unsafe_code)]

use ark_bn254::{Bn254, Fr, G1Affine};
use ark_ec::pairing::PairingOutput;
use ark_ec::CurveGroup;

use crate::error::{Error, Result};
use crate::params;

/// Output of [`get_delta`]: the rotation factor itself, and the new public
/// key point `p' = k_w1 · g_1` a client can use to verify proofs issued
/// under the new epoch.
#[derive(Clone, Copy, Debug)]
pub struct Delta {
    /// `δ = k_w1 · k_w0^{-1} mod ord_T`.
    pub delta: Fr,
    /// `p' = k_w1 · g_1`.
    pub p_new: G1Affine,
}

/// Compute the rotation factor taking records under `k_w0` to `k_w1`.
/// Requires `k_w0 != 0`; since `ord_1` is prime (invariant 1), any `k_w`
/// produced by [`crate::genkw::gen_kw`] is invertible except with
/// negligible probability, but a zero key is still rejected explicitly
/// rather than silently producing a meaningless delta.
#[tracing::instrument(level = "debug", skip(k_w0, k_w1))]
pub fn get_delta(k_w0: Fr, k_w1: Fr) -> Result<Delta> {
    let params = params::params()?;
    let k_w0_inv = k_w0
        .inverse()
        .ok_or_else(|| Error::ArithmeticFailure("get_delta: k_w0 has no inverse".into()))?;
    let delta = k_w1 * k_w0_inv;
    let p_new = (params.g1 * k_w1).into_affine();
    Ok(Delta { delta, p_new })
}

/// Roll a value stored under the old epoch forward: `r = z^δ`.
#[tracing::instrument(level = "debug", skip(z, delta))]
pub fn update(z: PairingOutput<Bn254>, delta: Fr) -> Result<PairingOutput<Bn254>> {
    params::params()?;
    Ok(z * delta)
}
