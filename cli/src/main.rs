//! shuffle — entry point for committing to, revealing and auditing selections.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;

use shuffle_beacon::drand::QUICKNET_CHAIN_HASH;
use shuffle_beacon::{ChainInfo, DrandClient, DrandClock, DrandVerifier, RoundClock};
use shuffle_budget::{ExecutionBudget, PermitPool, Unmetered};
use shuffle_engine::{
    audit_winners, init_logging, reveal_with_retry, DrandConfig, ShuffleConfig, VerifiableShuffle,
};
use shuffle_store_lmdb::environment::DEFAULT_MAP_SIZE;
use shuffle_store_lmdb::{LmdbCommitmentStore, LmdbEnvironment};
use shuffle_types::{CommitmentId, CommitterKey, Round, SelectionParams};

type Engine =
    VerifiableShuffle<LmdbCommitmentStore, Arc<DrandClient>, DrandClock, Arc<dyn ExecutionBudget>>;

#[derive(Parser)]
#[command(name = "shuffle", about = "Verifiable random selection over the drand beacon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "SHUFFLE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the commitment database.
    #[arg(long, env = "SHUFFLE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SHUFFLE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "SHUFFLE_LOG_FORMAT")]
    log_format: Option<String>,

    /// drand relay URL.
    #[arg(long, env = "SHUFFLE_DRAND_URL")]
    drand_url: Option<String>,

    /// Minimum rounds between commit and reveal.
    #[arg(long, env = "SHUFFLE_SAFETY_ROUND_GAP")]
    safety_round_gap: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Commit to drawing winners from a future beacon round.
    Commit {
        #[arg(long)]
        committer: String,
        /// Number of participants (n).
        #[arg(long)]
        participants: u32,
        /// Number of winners (k), 1 to 34.
        #[arg(long)]
        winners: u8,
        /// Rounds until the target round. Defaults to the safety gap.
        #[arg(long)]
        delay: Option<u64>,
    },

    /// Reveal the winners of an outstanding commitment.
    Reveal {
        #[arg(long)]
        committer: String,
        /// Keep retrying while the target round is not published.
        #[arg(long)]
        wait: bool,
    },

    /// Recompute the winners of a past reveal from public data.
    Audit {
        /// Target round of the commitment.
        #[arg(long)]
        round: u64,
        /// Commitment id (64 hex characters).
        #[arg(long)]
        commitment_id: String,
        #[arg(long)]
        participants: u32,
        #[arg(long)]
        winners: u8,
    },

    /// Show deployment settings and, optionally, a committer's pending commitment.
    Info {
        #[arg(long)]
        committer: Option<String>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ShuffleConfig> {
    let mut config = match &cli.config {
        Some(path) => ShuffleConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ShuffleConfig::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if let Some(url) = &cli.drand_url {
        config.drand.url = url.clone();
    }
    if let Some(gap) = cli.safety_round_gap {
        config.safety_round_gap = gap;
    }
    config.validate()?;
    Ok(config)
}

fn drand_client(drand: &DrandConfig) -> anyhow::Result<DrandClient> {
    let info = ChainInfo {
        period: drand.period,
        genesis_time: drand.genesis_time,
        chain_hash: drand.chain_hash.clone(),
    };
    let client = if drand.chain_hash.is_empty() {
        DrandClient::with_url(&drand.url)
    } else {
        DrandClient::with_chain(&drand.url, &drand.chain_hash)
    }
    .with_chain_info(info);

    if !drand.verify_signatures {
        return Ok(client);
    }
    if drand.chain_hash != QUICKNET_CHAIN_HASH {
        tracing::warn!(
            chain_hash = %drand.chain_hash,
            "BLS verification is only available for quicknet; rounds will not be verified"
        );
        return Ok(client);
    }
    Ok(client.with_verifier(DrandVerifier::quicknet()?))
}

fn build_engine(config: &ShuffleConfig) -> anyhow::Result<Engine> {
    let env = LmdbEnvironment::open(&config.data_dir, DEFAULT_MAP_SIZE)
        .with_context(|| format!("opening database in {}", config.data_dir.display()))?;
    let store = LmdbCommitmentStore::new(Arc::new(env));

    let beacon = Arc::new(drand_client(&config.drand)?);
    let clock = DrandClock::new(ChainInfo {
        period: config.drand.period,
        genesis_time: config.drand.genesis_time,
        chain_hash: config.drand.chain_hash.clone(),
    });
    let budget: Arc<dyn ExecutionBudget> = match config.budget.pool_permits {
        Some(permits) => Arc::new(PermitPool::new(permits)),
        None => Arc::new(Unmetered),
    };

    Ok(VerifiableShuffle::new(
        config.settings(),
        store,
        beacon,
        clock,
        budget,
    ))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format()?, &config.log_level);

    match cli.command {
        Command::Commit {
            committer,
            participants,
            winners,
            delay,
        } => {
            let engine = build_engine(&config)?;
            let committer = CommitterKey::new(committer)?;
            let delay = delay.unwrap_or(engine.safety_round_gap());
            let id = engine.commit(&committer, delay, participants, winners)?;
            let commitment = engine
                .pending_commitment(&committer)?
                .context("commitment vanished right after commit")?;
            print_json(&json!({
                "committer": committer.as_str(),
                "commitment_id": id.to_string(),
                "committed_at": commitment.committed_at.as_u64(),
                "target_round": commitment.target_round.as_u64(),
                "participants": participants,
                "winners": winners,
            }))
        }

        Command::Reveal { committer, wait } => {
            let engine = Arc::new(build_engine(&config)?);
            let committer = CommitterKey::new(committer)?;
            let reveal = if wait {
                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()
                    .context("starting async runtime")?;
                runtime.block_on(reveal_with_retry(
                    Arc::clone(&engine),
                    committer.clone(),
                    config.retry_policy(),
                ))?
            } else {
                match engine.reveal(&committer) {
                    Err(e) if e.is_transient() => {
                        bail!("{e}; try again later or pass --wait")
                    }
                    other => other?,
                }
            };
            print_json(&json!({
                "committer": committer.as_str(),
                "commitment_id": reveal.commitment_id.to_string(),
                "winners": reveal.winners,
            }))
        }

        Command::Audit {
            round,
            commitment_id,
            participants,
            winners,
        } => {
            let beacon = drand_client(&config.drand)?;
            let id = CommitmentId::from_hex(&commitment_id)?;
            let params = SelectionParams::new(participants, winners)?;
            let winners = audit_winners(&beacon, Round::new(round), &id, params)?;
            print_json(&json!({
                "round": round,
                "commitment_id": id.to_string(),
                "winners": winners,
            }))
        }

        Command::Info { committer } => {
            let engine = build_engine(&config)?;
            let pending = match committer {
                Some(raw) => {
                    let key = CommitterKey::new(raw)?;
                    engine.pending_commitment(&key)?.map(|c| {
                        json!({
                            "commitment_id": c.id.to_string(),
                            "committed_at": c.committed_at.as_u64(),
                            "target_round": c.target_round.as_u64(),
                            "participants": c.params.participants(),
                            "winners": c.params.winners(),
                        })
                    })
                }
                None => None,
            };
            print_json(&json!({
                "randomness_beacon_id": engine.randomness_beacon_id(),
                "opup_id": engine.opup_id(),
                "safety_round_gap": engine.safety_round_gap(),
                "current_round": engine.clock().current_round().as_u64(),
                "data_dir": config.data_dir.display().to_string(),
                "pending": pending,
            }))
        }
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shuffle.toml");
        std::fs::write(&path, "safety_round_gap = 5\nlog_level = \"debug\"\n").unwrap();

        let cli = Cli::parse_from([
            "shuffle",
            "--config",
            path.to_str().unwrap(),
            "--safety-round-gap",
            "8",
            "info",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.safety_round_gap, 8);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn parses_reveal_wait() {
        let cli = Cli::parse_from(["shuffle", "reveal", "--committer", "alice", "--wait"]);
        assert!(matches!(cli.command, Command::Reveal { wait: true, .. }));
    }

    #[test]
    fn drand_client_without_verification() {
        let drand = DrandConfig {
            verify_signatures: false,
            ..DrandConfig::default()
        };
        let client = drand_client(&drand).unwrap();
        assert_eq!(client.chain_info().map(|i| i.period), Some(drand.period));
    }
}
