//! Blinding / Deblinding — client side
//!
//! `blind(m)` samples an invertible scalar `r`, masks `H_1(m)` as
//! `x = r · H_1(m)`, and returns `(x, r_inv)`; `r` itself is never returned
//! and is dropped at the end of the call. `deblind(y, r_inv)` later removes
//! the blinding factor from the server's response.

#![forbid(unsafe_code)]

use ark_bn254::{Bn254, Fr, G1Affine};
use ark_ec::pairing::PairingOutput;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use rand_core::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::hash;
use crate::params;

/// Output of [`blind`]: the blinded point to send to the server, and the
/// inverse blinding scalar to keep for [`deblind`].
#[derive(Clone, Copy, Debug)]
pub struct Blinded {
    /// `x = r · H_1(m)`, sent to the server.
    pub x: G1Affine,
    /// `r^{-1} mod ord_1`, kept by the client for [`deblind`].
    pub r_inv: Fr,
}

/// Sample a blinding scalar `r` uniformly in `[0, 2^384)`, rejecting and
/// resampling until it is nonzero mod `ord_1` (equivalently, coprime to
/// `ord_1`, since invariant 1 makes `ord_1` prime — see DESIGN.md). Returns
/// `(r, r_inv)`.
fn sample_invertible_scalar(rng: &mut (impl RngCore + CryptoRng)) -> Result<(Fr, Fr)> {
    let mut attempts = 0u32;
    loop {
        let mut buf = [0u8; 48];
        rng.try_fill_bytes(&mut buf).map_err(|_| Error::RngFailure)?;
        let r = Fr::from_be_bytes_mod_order(&buf);
        if let Some(r_inv) = r.inverse() {
            return Ok((r, r_inv));
        }
        attempts += 1;
        if attempts > 1000 {
            // A uniform 384-bit sample lands on zero mod a ~254-bit prime
            // with probability ~2^-130; this branch exists to turn a
            // catastrophically broken RNG into a fault instead of a hang.
            return Err(Error::RngFailure);
        }
    }
}

/// `blind(m) -> (x, r_inv)`. Requires [`params::init`] to have succeeded.
#[tracing::instrument(level = "debug", skip(m, rng), fields(len = m.len()))]
pub fn blind(m: &[u8], rng: &mut (impl RngCore + CryptoRng)) -> Result<Blinded> {
    params::params()?;
    let (r, r_inv) = sample_invertible_scalar(rng)?;
    let h1 = hash::hash_to_g1(m)?;
    let x = (h1 * r).into_affine();
    Ok(Blinded { x, r_inv })
}

/// `deblind(y, r_inv) -> a = y^{r_inv}`. Per spec §4.6 this is the raw
/// exponentiation with no identity rejection: invariant 3 allows `k_w = 0`,
/// in which case `eval` legitimately returns the G_T identity and `deblind`
/// must still carry it through unchanged.
#[tracing::instrument(level = "debug", skip(y, r_inv))]
pub fn deblind(y: PairingOutput<Bn254>, r_inv: Fr) -> Result<PairingOutput<Bn254>> {
    params::params()?;
    Ok(y * r_inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    /// A fixed sequence of byte buffers, used to drive [`sample_invertible_scalar`]
    /// through a deliberately non-coprime (zero) sample before a valid one.
    struct ScriptedRng<'a> {
        buffers: std::slice::Iter<'a, [u8; 48]>,
    }

    impl<'a> RngCore for ScriptedRng<'a> {
        fn next_u32(&mut self) -> u32 {
            unimplemented!("only try_fill_bytes is exercised in these tests")
        }
        fn next_u64(&mut self) -> u64 {
            unimplemented!("only try_fill_bytes is exercised in these tests")
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.try_fill_bytes(dest).expect("scripted buffers exhausted");
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
            let next = self.buffers.next().expect("scripted buffers exhausted");
            dest.copy_from_slice(next);
            Ok(())
        }
    }
    impl<'a> CryptoRng for ScriptedRng<'a> {}

    #[test]
    fn resamples_on_non_coprime_value() {
        // The all-zero sample reduces to Fr::zero(), which has no inverse —
        // the "gcd != 1" footgun called out in spec §9. The loop must not
        // return it, and must move on to the next scripted sample.
        let zero = [0u8; 48];
        let mut nonzero = [0u8; 48];
        nonzero[47] = 7;
        let scripted = [zero, nonzero];
        let mut rng = ScriptedRng { buffers: scripted.iter() };

        let (r, r_inv) = sample_invertible_scalar(&mut rng).expect("should resample past zero");
        assert_ne!(r, Fr::zero());
        assert_eq!(r * r_inv, Fr::from(1u64));
    }

    #[test]
    fn blind_then_deblind_round_trips_through_identity_scalar() {
        let _guard = params::test_lock();
        params::init().unwrap();
        let mut rng = OsRng;
        let blinded = blind(b"correct horse battery staple", &mut rng).unwrap();
        assert_eq!(blinded.x.is_on_curve(), true);
    }

    #[test]
    fn deblind_carries_the_identity_through_unchanged() {
        // Invariant 3 allows k_w = 0, so a legitimate eval() can legitimately
        // return the G_T identity; spec §4.6 has no identity rejection and
        // deblind must pass it straight through.
        let _guard = params::test_lock();
        params::init().unwrap();
        let identity = PairingOutput::<Bn254>::zero();
        let r_inv = Fr::from(7u64);
        assert_eq!(deblind(identity, r_inv).unwrap(), identity);
    }
}
