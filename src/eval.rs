//! Server-side evaluation
//!
//! `eval(k_w, x, t) = e(k_w · x, H_2(t))`. This is the one operation the
//! server ever performs on a blinded client request; it never sees `m`
//! itself, only the blinded point `x`.

#![forbid(unsafe_code)]

use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_ec::CurveGroup;

use crate::error::Result;
use crate::hash;
use crate::params;

/// Result of [`eval`]: the raw pairing value `y`, together with the
/// server-computed commitment `t_point = H_2(t)` and public key point
/// `p = k_w · g_1`, both of which [`crate::proof::prove`] needs and which
/// are cheap to hand back alongside `y` rather than recompute.
#[derive(Clone, Copy, Debug)]
pub struct Evaluation {
    /// `y = e(k_w · x, H_2(t))`, returned to the client for deblinding.
    pub y: PairingOutput<Bn254>,
    /// `H_2(t)`, reused by [`crate::proof::prove`] as `t_2`.
    pub t_point: G2Affine,
}

/// `eval(k_w, x, t) -> y`. Requires [`params::init`] to have succeeded.
#[tracing::instrument(level = "debug", skip(k_w, x, t), fields(t_len = t.len()))]
pub fn eval(k_w: Fr, x: G1Affine, t: &[u8]) -> Result<Evaluation> {
    params::params()?;
    let t_point = hash::hash_to_g2(t)?;
    let kx = (x * k_w).into_affine();
    let y = Bn254::pairing(kx, t_point);
    Ok(Evaluation { y, t_point })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blind::blind;
    use crate::genkw::gen_kw;
    use rand::rngs::OsRng;

    const MSK: &[u8] = &[0u8; 16];

    #[test]
    fn eval_is_deterministic_for_fixed_inputs() {
        let _guard = params::test_lock();
        params::init().unwrap();
        let k_w = gen_kw(b"user-42", MSK, b"salt").unwrap();
        let blinded = blind(b"correct horse battery staple", &mut OsRng).unwrap();

        let a = eval(k_w, blinded.x, b"login-2024-01").unwrap();
        let b = eval(k_w, blinded.x, b"login-2024-01").unwrap();
        assert_eq!(a.y, b.y);
        assert_eq!(a.t_point, b.t_point);
    }

    #[test]
    fn eval_differs_across_tweaks() {
        let _guard = params::test_lock();
        params::init().unwrap();
        let k_w = gen_kw(b"user-42", MSK, b"salt").unwrap();
        let blinded = blind(b"correct horse battery staple", &mut OsRng).unwrap();

        let a = eval(k_w, blinded.x, b"login-2024-01").unwrap();
        let b = eval(k_w, blinded.x, b"login-2024-02").unwrap();
        assert_ne!(a.y, b.y);
    }

    #[test]
    fn eval_differs_across_keys() {
        let _guard = params::test_lock();
        params::init().unwrap();
        let k_w0 = gen_kw(b"user-42", MSK, b"salt").unwrap();
        let k_w1 = gen_kw(b"user-43", MSK, b"salt").unwrap();
        let blinded = blind(b"correct horse battery staple", &mut OsRng).unwrap();

        let a = eval(k_w0, blinded.x, b"login-2024-01").unwrap();
        let b = eval(k_w1, blinded.x, b"login-2024-01").unwrap();
        assert_ne!(a.y, b.y);
    }
}
