//! Hash-to-group `H_1`, `H_2`
//!
//! Maps an arbitrary byte string deterministically into a point of G1
//! (`H_1`) or G2 (`H_2`). The spec asks for "the underlying library's
//! standard map-to-curve"; arkworks' mainline BN254 support does not wire up
//! an indifferentiable SWU/WB hasher for this curve, so this module uses
//! try-and-increment instead — the same technique the reference C library's
//! pairing backend historically used for BN-family curves before
//! indifferentiable maps were standardized. See DESIGN.md for the rationale.
//!
//! Both `H_1` and `H_2` start from a SHA-384 digest of the input (per spec),
//! then repeatedly re-hash with an incrementing counter to produce candidate
//! affine coordinates until one lands on the curve, and finally clear the
//! cofactor so the result lies in the prime-order subgroup. The loop is
//! bounded: 256 failed candidates in a row indicates the hash function is
//! broken, not bad luck (the failure probability per attempt is ~1/2), so
//! that case is treated as an arithmetic fault rather than looping forever.

#![forbid(unsafe_code)]

use ark_bn254::{Fq, Fq2, G1Affine, G2Affine};
use ark_ec::short_weierstrass::Affine;
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use sha2::{Digest, Sha384};

use crate::error::{Error, Result};

const MAX_ATTEMPTS: u16 = 256;

/// `H_1`: deterministically hash `m` into a point of G1.
#[tracing::instrument(level = "debug", skip(m), fields(len = m.len()))]
pub fn hash_to_g1(m: &[u8]) -> Result<G1Affine> {
    let digest = sha384(m);
    for ctr in 0..MAX_ATTEMPTS {
        let buf = sha384_with_counter(&digest, ctr, 0);
        let x = Fq::from_be_bytes_mod_order(&buf);
        let greatest = buf[0] & 1 == 1;
        if let Some(p) = Affine::get_point_from_x_unchecked(x, greatest) {
            return Ok(p.mul_by_cofactor());
        }
    }
    Err(Error::ArithmeticFailure(
        "hash_to_g1: no valid candidate point found".into(),
    ))
}

/// `H_2`: deterministically hash `m` into a point of G2.
#[tracing::instrument(level = "debug", skip(m), fields(len = m.len()))]
pub fn hash_to_g2(m: &[u8]) -> Result<G2Affine> {
    let digest = sha384(m);
    for ctr in 0..MAX_ATTEMPTS {
        let buf0 = sha384_with_counter(&digest, ctr, 0);
        let buf1 = sha384_with_counter(&digest, ctr, 1);
        let c0 = Fq::from_be_bytes_mod_order(&buf0);
        let c1 = Fq::from_be_bytes_mod_order(&buf1);
        let x = Fq2::new(c0, c1);
        let greatest = buf0[0] & 1 == 1;
        if let Some(p) = Affine::get_point_from_x_unchecked(x, greatest) {
            return Ok(p.mul_by_cofactor());
        }
    }
    Err(Error::ArithmeticFailure(
        "hash_to_g2: no valid candidate point found".into(),
    ))
}

/// SHA-384 of `m`, per spec §4.2.
fn sha384(m: &[u8]) -> [u8; 48] {
    let mut h = Sha384::new();
    h.update(m);
    h.finalize().into()
}

/// Re-hash `digest` with a two-byte domain tag `(ctr, sub)` to produce a
/// fresh 48-byte candidate. `sub` distinguishes the two field-element draws
/// needed for an `Fq2` coordinate in `hash_to_g2`.
fn sha384_with_counter(digest: &[u8; 48], ctr: u16, sub: u8) -> [u8; 48] {
    let mut h = Sha384::new();
    h.update(digest);
    h.update(ctr.to_be_bytes());
    h.update([sub]);
    h.finalize().into()
}
