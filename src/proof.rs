//! Chaum–Pedersen zero-knowledge proof of correct evaluation
//!
//! Proves, without revealing `k_w`, that the same scalar was used to produce
//! both the public key point `p = k_w · g_1` and the evaluation
//! `y = β^{k_w}` where `β = e(x, t̃)`. This is a standard Chaum–Pedersen
//! discrete-log-equality proof lifted across two groups (G1 and G_T) that
//! happen to share the same scalar field, made non-interactive via
//! Fiat–Shamir — but the challenge hash is HMAC-SHA384 under a fixed domain
//! tag, not a generic transcript hash, so it is bit-exact with the reference
//! and must not be swapped for `transcript::Transcript`.

#![forbid(unsafe_code)]

use ark_bn254::{Bn254, Fr, G1Affine};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::CurveGroup;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use hmac::{Hmac, Mac};
use rand_core::{CryptoRng, RngCore};
use sha2::Sha384;

use crate::error::{Error, Result};
use crate::params;

type HmacSha384 = Hmac<Sha384>;

/// Domain tag keying the Fiat–Shamir challenge MAC. Thirty bytes, fixed,
/// bit-exact with the reference library's `TAG_RELIC_HASH_Z` constant.
const HASH_Z_TAG: &[u8; 30] = b"TAG_RELIC_HASH_ZMESSAGE_HASH_Z";

/// A non-interactive Chaum–Pedersen proof that `eval` used the same `k_w`
/// implied by the public commitment `p`. Wire-minimal per spec §4.7 step 8:
/// exactly `(p, c, u)`, nothing more — the verifier's own `t_1'`/`t_2'`
/// commitments (spec §4.8 steps 3-4) are reconstructed by [`verify`], never
/// transmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proof {
    /// Public commitment, `p = k_w · g_1` in G1.
    pub p: G1Affine,
    /// Fiat–Shamir challenge, `c = hashZ(g_1, p, β, y, t_1, t_2)`.
    pub c: Fr,
    /// Response, `u = v - c·k_w mod ord_T`.
    pub u: Fr,
}

/// Serialize every argument with its canonical compressed encoding and feed
/// them into HMAC-SHA384 under [`HASH_Z_TAG`] in the order given, with no
/// length prefixes between them — this ordering and the absence of framing
/// is load-bearing for interop, not a style choice.
fn hash_z(
    g1: &G1Affine,
    p: &G1Affine,
    beta: &PairingOutput<Bn254>,
    y: &PairingOutput<Bn254>,
    t1: &G1Affine,
    t2: &PairingOutput<Bn254>,
) -> Result<Fr> {
    let mut mac = HmacSha384::new_from_slice(HASH_Z_TAG)
        .map_err(|e| Error::ArithmeticFailure(format!("hashZ key setup failed: {e}")))?;

    let mut buf = Vec::new();
    g1.serialize_compressed(&mut buf)
        .map_err(|e| Error::ArithmeticFailure(format!("hashZ encode failed: {e}")))?;
    p.serialize_compressed(&mut buf)
        .map_err(|e| Error::ArithmeticFailure(format!("hashZ encode failed: {e}")))?;
    beta.serialize_compressed(&mut buf)
        .map_err(|e| Error::ArithmeticFailure(format!("hashZ encode failed: {e}")))?;
    y.serialize_compressed(&mut buf)
        .map_err(|e| Error::ArithmeticFailure(format!("hashZ encode failed: {e}")))?;
    t1.serialize_compressed(&mut buf)
        .map_err(|e| Error::ArithmeticFailure(format!("hashZ encode failed: {e}")))?;
    t2.serialize_compressed(&mut buf)
        .map_err(|e| Error::ArithmeticFailure(format!("hashZ encode failed: {e}")))?;

    mac.update(&buf);
    let out = mac.finalize().into_bytes();
    Ok(Fr::from_be_bytes_mod_order(&out))
}

/// Produce a proof that `y = eval(k_w, x, t)` and `p = k_w · g_1` share the
/// same `k_w`, without revealing it.
#[tracing::instrument(level = "debug", skip(k_w, x, y, rng))]
pub fn prove(
    k_w: Fr,
    x: G1Affine,
    y: PairingOutput<Bn254>,
    t_point: ark_bn254::G2Affine,
    rng: &mut (impl RngCore + CryptoRng),
) -> Result<Proof> {
    let params = params::params()?;
    let beta = Bn254::pairing(x, t_point);

    let mut buf = [0u8; 48];
    rng.try_fill_bytes(&mut buf).map_err(|_| Error::RngFailure)?;
    let v = Fr::from_be_bytes_mod_order(&buf);

    let p = (params.g1 * k_w).into_affine();
    let t1 = (params.g1 * v).into_affine();
    let t2 = beta * v;

    let c = hash_z(&params.g1, &p, &beta, &y, &t1, &t2)?;
    let u = v - c * k_w;

    Ok(Proof { p, c, u })
}

/// Check a proof produced by [`prove`]. Per spec §4.8 steps 3-4, the
/// verifier reconstructs `t_1' = u·g_1 + c·p` and `t_2' = β^u·y^c` itself
/// from `(p, c, u)` rather than trusting prover-supplied commitments, then
/// checks `hashZ(g_1, p, β, y, t_1', t_2') == c` (step 5-6). Returns
/// `Ok(false)` for a well-formed proof that simply does not verify —
/// cryptographic rejection is an expected outcome, not a fault — and
/// `Err(_)` only when the arithmetic itself cannot be carried out (core not
/// initialized, etc).
#[tracing::instrument(level = "debug", skip(x, y, proof))]
pub fn verify(
    x: G1Affine,
    t_point: ark_bn254::G2Affine,
    y: PairingOutput<Bn254>,
    proof: &Proof,
) -> Result<bool> {
    let params = params::params()?;
    let beta = Bn254::pairing(x, t_point);

    let t1_prime = (params.g1 * proof.u + proof.p * proof.c).into_affine();
    let t2_prime = beta * proof.u + y * proof.c;

    let expected_c = hash_z(&params.g1, &proof.p, &beta, &y, &t1_prime, &t2_prime)?;
    Ok(expected_c == proof.c)
}

/// Like [`verify`], but folds a failed verification into the error channel
/// as [`Error::VerificationFailed`] for callers that prefer `?`-propagation
/// over inspecting a `bool`.
pub fn verify_strict(
    x: G1Affine,
    t_point: ark_bn254::G2Affine,
    y: PairingOutput<Bn254>,
    proof: &Proof,
) -> Result<()> {
    if verify(x, t_point, y, proof)? {
        Ok(())
    } else {
        Err(Error::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blind::blind;
    use crate::eval::eval;
    use crate::genkw::gen_kw;
    use rand::rngs::OsRng;

    const MSK: &[u8] = &[0u8; 16];

    #[test]
    fn honest_proof_verifies() {
        let _guard = params::test_lock();
        params::init().unwrap();
        let k_w = gen_kw(b"user-42", MSK, b"salt").unwrap();
        let blinded = blind(b"correct horse battery staple", &mut OsRng).unwrap();
        let evaluation = eval(k_w, blinded.x, b"login-2024-01").unwrap();

        let proof = prove(k_w, blinded.x, evaluation.y, evaluation.t_point, &mut OsRng).unwrap();
        assert!(verify(blinded.x, evaluation.t_point, evaluation.y, &proof).unwrap());
        assert!(verify_strict(blinded.x, evaluation.t_point, evaluation.y, &proof).is_ok());
    }

    #[test]
    fn proof_rejects_a_swapped_public_key() {
        let _guard = params::test_lock();
        params::init().unwrap();
        let k_w0 = gen_kw(b"user-42", MSK, b"salt").unwrap();
        let k_w1 = gen_kw(b"user-43", MSK, b"salt").unwrap();
        let blinded = blind(b"correct horse battery staple", &mut OsRng).unwrap();
        let evaluation = eval(k_w0, blinded.x, b"login-2024-01").unwrap();

        let wrong_p = (params::params().unwrap().g1 * k_w1).into_affine();
        let mut proof = prove(k_w0, blinded.x, evaluation.y, evaluation.t_point, &mut OsRng).unwrap();
        proof.p = wrong_p;

        assert!(!verify(blinded.x, evaluation.t_point, evaluation.y, &proof).unwrap());
        assert!(matches!(
            verify_strict(blinded.x, evaluation.t_point, evaluation.y, &proof),
            Err(Error::VerificationFailed)
        ));
    }

    #[test]
    fn proof_rejects_tampered_response() {
        let _guard = params::test_lock();
        params::init().unwrap();
        let k_w = gen_kw(b"user-42", MSK, b"salt").unwrap();
        let blinded = blind(b"correct horse battery staple", &mut OsRng).unwrap();
        let evaluation = eval(k_w, blinded.x, b"login-2024-01").unwrap();

        let mut proof = prove(k_w, blinded.x, evaluation.y, evaluation.t_point, &mut OsRng).unwrap();
        proof.u += Fr::from(1u64);
        assert!(!verify(blinded.x, evaluation.t_point, evaluation.y, &proof).unwrap());
    }
}
