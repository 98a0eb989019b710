//! Happy-path session API
//!
//! Wraps the free-function core (`blind`, `eval`, `deblind`, `prove`,
//! `verify`) with two small builders that hold the per-protagonist state
//! (`msk` for the server, `r_inv`/the message for the client) so callers
//! driving a full client/server exchange don't have to thread intermediate
//! values by hand. This mirrors the teacher's `ProverBuilder` /
//! `VerifierBuilder` split — one builder per protocol role, a `build()`-free
//! direct-call surface here since there is no expensive setup to defer.

#![forbid(unsafe_code)]

use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
use ark_ec::pairing::PairingOutput;
use rand_core::{CryptoRng, RngCore};

use crate::blind::{self, Blinded};
use crate::error::Result;
use crate::eval::{self, Evaluation};
use crate::genkw;
use crate::params;
use crate::proof::{self, Proof};

/// Client-side half of a Pythia exchange: blinds a message, then later
/// deblinds and optionally verifies the server's response.
pub struct ClientSession {
    r_inv: Fr,
    x: G1Affine,
}

impl ClientSession {
    /// Blind `m` and hold onto the state needed to finish the exchange.
    pub fn begin(m: &[u8], rng: &mut (impl RngCore + CryptoRng)) -> Result<Self> {
        let Blinded { x, r_inv } = blind::blind(m, rng)?;
        Ok(Self { r_inv, x })
    }

    /// The blinded point to send to the server.
    pub fn blinded_point(&self) -> G1Affine {
        self.x
    }

    /// Remove the blinding factor from the server's raw response `y`,
    /// producing the final PRF output `a`.
    pub fn finish(&self, y: PairingOutput<Bn254>) -> Result<PairingOutput<Bn254>> {
        blind::deblind(y, self.r_inv)
    }

    /// Verify the server's proof that `y` (and the public key `p` carried
    /// inside it) were computed honestly, before calling [`Self::finish`].
    pub fn verify(
        &self,
        t_point: G2Affine,
        y: PairingOutput<Bn254>,
        proof: &Proof,
    ) -> Result<bool> {
        proof::verify(self.x, t_point, y, proof)
    }
}

/// Server-side half of a Pythia exchange: holds the secrets needed to
/// evaluate a blinded request and prove the evaluation was done honestly.
pub struct ServerEvaluator<'a> {
    msk: &'a [u8],
}

impl<'a> ServerEvaluator<'a> {
    /// Bind a master secret for the lifetime of this evaluator.
    pub fn new(msk: &'a [u8]) -> Self {
        Self { msk }
    }

    /// Derive `k_w`, evaluate the blinded request, and produce a proof of
    /// correct evaluation, all in one call — the common case for a server
    /// handling a single request end to end.
    pub fn evaluate_and_prove(
        &self,
        w: &[u8],
        z: &[u8],
        x: G1Affine,
        t: &[u8],
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<(Evaluation, Proof)> {
        let k_w = genkw::gen_kw(w, self.msk, z)?;
        let evaluation = eval::eval(k_w, x, t)?;
        let proof = proof::prove(k_w, x, evaluation.y, evaluation.t_point, rng)?;
        Ok((evaluation, proof))
    }
}
