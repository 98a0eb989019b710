//! Minimal CLI demo of a full Pythia exchange, run entirely in-process.
//!
//! Transport is explicitly out of scope for this crate, so this binary
//! plays both client and server locally: it blinds a message, derives a
//! per-tweak key from a master secret, evaluates and proves, verifies, and
//! deblinds — printing each intermediate artifact as hex so the flow can be
//! inspected end to end.
//!
//! Usage: `pythia_demo [--msk <hex>] [--tweak <w>] [--salt <z>] [--token <t>] [--message <m>]`

#![forbid(unsafe_code)]

use std::env;

use ark_serialize::CanonicalSerialize;
use pythia_core::session::{ClientSession, ServerEvaluator};
use rand::rngs::OsRng;
use tracing::info;

fn parse_flag<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == key {
            return it.next().map(String::as_str);
        }
    }
    None
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let msk_hex = parse_flag(&args, "--msk").unwrap_or("000102030405060708090a0b0c0d0e0f");
    let tweak = parse_flag(&args, "--tweak").unwrap_or("user-42").as_bytes();
    let salt = parse_flag(&args, "--salt").unwrap_or("salt").as_bytes();
    let token = parse_flag(&args, "--token").unwrap_or("login-2024-01").as_bytes();
    let message = parse_flag(&args, "--message")
        .unwrap_or("correct horse battery staple")
        .as_bytes();

    let msk = hex::decode(msk_hex)?;

    pythia_core::init()?;
    info!("pairing core initialized");

    let mut rng = OsRng;
    let client = ClientSession::begin(message, &mut rng)?;
    info!(x = %hex_point(&client.blinded_point()), "client blinded message");

    let server = ServerEvaluator::new(&msk);
    let (evaluation, proof) =
        server.evaluate_and_prove(tweak, salt, client.blinded_point(), token, &mut rng)?;
    info!("server evaluated request and produced a proof");

    let ok = client.verify(evaluation.t_point, evaluation.y, &proof)?;
    if !ok {
        anyhow::bail!("proof failed to verify");
    }
    info!("client verified the proof");

    let output = client.finish(evaluation.y)?;
    let mut output_bytes = Vec::new();
    output.serialize_compressed(&mut output_bytes)?;
    println!("pythia output: {}", hex::encode(output_bytes));

    pythia_core::deinit();
    Ok(())
}

fn hex_point(p: &ark_bn254::G1Affine) -> String {
    let mut buf = Vec::new();
    let _ = p.serialize_compressed(&mut buf);
    hex::encode(buf)
}
