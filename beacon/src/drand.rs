//! drand — external randomness beacon from the League of Entropy.
//!
//! drand publishes a BLS-signed random value every `period` seconds. This module
//! provides a blocking HTTP client that fetches a given round, optionally verifies
//! its BLS12-381 signature against the network's distributed public key, and exposes
//! it as a [`RandomnessBeacon`]. [`DrandClock`] maps wall-clock time to rounds.

use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};
use shuffle_types::Round;

use crate::{BeaconError, RandomnessBeacon, RoundClock};

/// Default drand mainnet relay URL.
pub const DRAND_MAINNET_URL: &str = "https://api.drand.sh";

/// Chain hash of the drand quicknet network.
pub const QUICKNET_CHAIN_HASH: &str =
    "52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971";

/// UNIX timestamp of quicknet round 1.
pub const QUICKNET_GENESIS_TIME: u64 = 1692803367;

/// Seconds between quicknet rounds.
pub const QUICKNET_PERIOD: u64 = 3;

/// Domain separation tag used by drand's quicknet (unchained) scheme.
/// This is the DST for BLS signatures on G1 with SHA-256 hash-to-curve.
const DRAND_QUICKNET_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Distributed public key for the drand quicknet network (G2 point, compressed).
const DRAND_QUICKNET_PUBKEY_HEX: &str = concat!(
    "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c",
    "8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb",
    "5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a",
);

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// A drand response for one round.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DrandRound {
    pub round: u64,
    /// Hex-encoded randomness value (`SHA-256(signature)`).
    pub randomness: String,
    /// Hex-encoded BLS signature over the round message.
    pub signature: String,
}

impl DrandRound {
    /// Decode the 32-byte randomness.
    pub fn randomness_bytes(&self) -> Result<[u8; 32], BeaconError> {
        let bytes = hex::decode(&self.randomness)
            .map_err(|e| BeaconError::InvalidProof(format!("randomness hex decode: {e}")))?;
        bytes.try_into().map_err(|b: Vec<u8>| {
            BeaconError::InvalidProof(format!("randomness is {} bytes, expected 32", b.len()))
        })
    }
}

/// Bind round randomness to caller data: `SHA-256(randomness || user_data)`.
///
/// Different commitments revealing against the same round therefore receive
/// unrelated outputs.
pub fn bind_user_data(randomness: &[u8; 32], user_data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(randomness);
    hasher.update(user_data);
    hasher.finalize().into()
}

/// BLS12-381 verifier for unchained drand rounds (signatures on G1, key on G2).
///
/// Performs full cryptographic verification:
/// 1. Checks that `randomness == SHA-256(signature)` (drand's derivation rule)
/// 2. Verifies the BLS signature over `SHA-256(round as BE u64)` against the
///    network's distributed public key
pub struct DrandVerifier {
    pub_key_bytes: Vec<u8>,
}

impl DrandVerifier {
    /// Create a verifier with a custom public key (hex-encoded, compressed G2).
    pub fn new(pub_key_hex: &str) -> Result<Self, BeaconError> {
        let pub_key_bytes = hex::decode(pub_key_hex)
            .map_err(|e| BeaconError::InvalidPublicKey(format!("hex decode: {e}")))?;
        Ok(Self { pub_key_bytes })
    }

    /// Create a verifier for the drand quicknet network.
    pub fn quicknet() -> Result<Self, BeaconError> {
        Self::new(DRAND_QUICKNET_PUBKEY_HEX)
    }

    /// Verify a drand round.
    ///
    /// Returns `Ok(true)` if both the randomness derivation and BLS signature
    /// are valid, `Ok(false)` if either check fails.
    pub fn verify_round(&self, round: &DrandRound) -> Result<bool, BeaconError> {
        let sig_bytes = hex::decode(&round.signature)
            .map_err(|e| BeaconError::InvalidSignature(format!("hex decode: {e}")))?;
        let randomness_bytes = hex::decode(&round.randomness)
            .map_err(|e| BeaconError::InvalidProof(format!("randomness hex decode: {e}")))?;

        if Sha256::digest(&sig_bytes).as_slice() != randomness_bytes.as_slice() {
            return Ok(false);
        }

        let message = round_message(round.round);
        self.verify_bls(&sig_bytes, &message)
    }

    fn verify_bls(&self, sig_bytes: &[u8], message: &[u8]) -> Result<bool, BeaconError> {
        use blst::min_pk::{PublicKey, Signature};

        let pk = PublicKey::from_bytes(&self.pub_key_bytes).map_err(|e| {
            BeaconError::InvalidPublicKey(format!("G2 point deserialization: {e:?}"))
        })?;
        let sig = Signature::from_bytes(sig_bytes).map_err(|e| {
            BeaconError::InvalidSignature(format!("G1 point deserialization: {e:?}"))
        })?;

        let result = sig.verify(true, message, DRAND_QUICKNET_DST, &[], &pk, true);
        Ok(result == blst::BLST_ERROR::BLST_SUCCESS)
    }
}

/// The message an unchained round signs.
fn round_message(round: u64) -> [u8; 32] {
    Sha256::digest(round.to_be_bytes()).into()
}

/// Metadata about a drand chain, used for round/time mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainInfo {
    /// Seconds between rounds.
    pub period: u64,
    /// UNIX timestamp of round 1.
    pub genesis_time: u64,
    /// Hex-encoded chain hash.
    pub chain_hash: String,
}

impl ChainInfo {
    pub fn quicknet() -> Self {
        Self {
            period: QUICKNET_PERIOD,
            genesis_time: QUICKNET_GENESIS_TIME,
            chain_hash: QUICKNET_CHAIN_HASH.to_string(),
        }
    }

    pub fn current_round(&self, now: u64) -> u64 {
        if now < self.genesis_time || self.period == 0 {
            return 0;
        }
        ((now - self.genesis_time) / self.period) + 1
    }

    pub fn is_round_available(&self, round: u64, now: u64) -> bool {
        round <= self.current_round(now)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Round clock driven by the system time and a chain's genesis/period.
pub struct DrandClock {
    info: ChainInfo,
}

impl DrandClock {
    pub fn new(info: ChainInfo) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &ChainInfo {
        &self.info
    }
}

impl RoundClock for DrandClock {
    fn current_round(&self) -> Round {
        Round::new(self.info.current_round(unix_now()))
    }
}

/// Blocking HTTP client for a drand relay.
pub struct DrandClient {
    /// Base URL of the drand HTTP relay.
    base_url: String,
    client: reqwest::blocking::Client,
    /// The chain hash identifying which drand network to use (optional filter).
    chain_hash: Option<String>,
    /// Optional verifier for full BLS signature checking.
    verifier: Option<DrandVerifier>,
    /// Chain metadata used to refuse future rounds without a network call.
    chain_info: Option<ChainInfo>,
    /// Most recently fetched round; rounds are immutable once published.
    cached_round: Mutex<Option<DrandRound>>,
}

impl DrandClient {
    /// Create a client pointing at a relay URL (no BLS verification).
    pub fn with_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
            chain_hash: None,
            verifier: None,
            chain_info: None,
            cached_round: Mutex::new(None),
        }
    }

    /// Create a client with a specific chain hash for network selection.
    pub fn with_chain(base_url: &str, chain_hash: &str) -> Self {
        Self {
            chain_hash: Some(chain_hash.to_string()),
            ..Self::with_url(base_url)
        }
    }

    /// Create a client configured for drand quicknet with full BLS verification.
    pub fn quicknet() -> Result<Self, BeaconError> {
        Ok(Self::with_chain(DRAND_MAINNET_URL, QUICKNET_CHAIN_HASH)
            .with_verifier(DrandVerifier::quicknet()?)
            .with_chain_info(ChainInfo::quicknet()))
    }

    /// Attach a BLS verifier so fetched rounds are fully verified.
    pub fn with_verifier(mut self, verifier: DrandVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Attach chain info for future-round rejection.
    pub fn with_chain_info(mut self, info: ChainInfo) -> Self {
        self.chain_info = Some(info);
        self
    }

    pub fn chain_info(&self) -> Option<&ChainInfo> {
        self.chain_info.as_ref()
    }

    /// Build the API path prefix, incorporating chain_hash if set.
    fn api_prefix(&self) -> String {
        match &self.chain_hash {
            Some(hash) => format!("{}/{}", self.base_url, hash),
            None => self.base_url.clone(),
        }
    }

    /// Fetch (and verify, if a verifier is attached) a specific round.
    pub fn fetch_round(&self, round: u64) -> Result<DrandRound, BeaconError> {
        if let Some(cached) = self.cached(round) {
            return Ok(cached);
        }
        if let Some(ref info) = self.chain_info {
            if !info.is_round_available(round, unix_now()) {
                return Err(BeaconError::NotYetAvailable { round });
            }
        }

        let url = format!("{}/public/{}", self.api_prefix(), round);
        tracing::debug!(round, url = %url, "fetching drand round");
        let resp = self
            .client
            .get(&url)
            .timeout(HTTP_TIMEOUT)
            .send()
            .map_err(|e| BeaconError::Fetch(e.to_string()))?;

        let status = resp.status();
        // Relays answer 404 or 425 (Too Early) for rounds they have not produced.
        if status == reqwest::StatusCode::NOT_FOUND || status.as_u16() == 425 {
            return Err(BeaconError::NotYetAvailable { round });
        }
        if !status.is_success() {
            return Err(BeaconError::Fetch(format!("HTTP {} from {}", status, url)));
        }

        let fetched: DrandRound = resp.json().map_err(|e| BeaconError::Fetch(e.to_string()))?;
        if fetched.round != round {
            return Err(BeaconError::InvalidProof(format!(
                "relay answered round {} for round {}",
                fetched.round, round
            )));
        }
        self.maybe_verify(&fetched)?;

        if let Ok(mut cache) = self.cached_round.lock() {
            *cache = Some(fetched.clone());
        }
        Ok(fetched)
    }

    fn cached(&self, round: u64) -> Option<DrandRound> {
        self.cached_round
            .lock()
            .ok()
            .and_then(|cache| cache.as_ref().filter(|r| r.round == round).cloned())
    }

    /// If a verifier is attached, perform full BLS verification.
    fn maybe_verify(&self, round: &DrandRound) -> Result<(), BeaconError> {
        if let Some(ref verifier) = self.verifier {
            if !verifier.verify_round(round)? {
                tracing::warn!(round = round.round, "drand round failed BLS verification");
                return Err(BeaconError::BlsVerification(format!(
                    "round {} failed BLS signature verification",
                    round.round,
                )));
            }
        }
        Ok(())
    }
}

impl RandomnessBeacon for DrandClient {
    fn must_get(&self, round: Round, user_data: &[u8]) -> Result<[u8; 32], BeaconError> {
        let fetched = self.fetch_round(round.as_u64())?;
        let randomness = fetched.randomness_bytes()?;
        Ok(bind_user_data(&randomness, user_data))
    }

    fn name(&self) -> &str {
        "drand"
    }
}
