//! Scalar derivation `genKw`
//!
//! Derives the per-tweak secret scalar `k_w` from a record tweak `w`, the
//! master secret `msk`, and a pepper/salt `z`: `k_w = HMAC-SHA384(msk, z ‖ w)
//! mod ord_T`. `z` is concatenated *before* `w` with no length prefix or
//! separator — this is load-bearing for interop (see spec §9) and must not
//! be "fixed" by adding one.

#![forbid(unsafe_code)]

use ark_bn254::Fr;
use ark_ff::PrimeField;
use hmac::{Hmac, Mac};
use sha2::Sha384;

use crate::error::{Error, Result};

type HmacSha384 = Hmac<Sha384>;

/// Derive `k_w` from `(w, msk, z)`. Callers MUST ensure `(z, w)` pairs are
/// unambiguous for their use case — there is no length prefix separating
/// them in the MAC input, by design (bit-exact with the reference).
#[tracing::instrument(level = "debug", skip(w, msk, z), fields(w_len = w.len(), z_len = z.len()))]
pub fn gen_kw(w: &[u8], msk: &[u8], z: &[u8]) -> Result<Fr> {
    let mut mac = HmacSha384::new_from_slice(msk)
        .map_err(|e| Error::ArithmeticFailure(format!("HMAC key setup failed: {e}")))?;
    mac.update(z);
    mac.update(w);
    let mac_bytes = mac.finalize().into_bytes();
    Ok(Fr::from_be_bytes_mod_order(&mac_bytes))
}
