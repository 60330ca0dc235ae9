use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::abi::address_from_hex;
use crate::constants::{DEFAULT_CHAIN_ID, DEFAULT_SALT_DIGITS};
use crate::summon::{SummonRequest, SummonVariant};

/// CLI arguments for the summon argument builder
#[derive(Parser, Debug)]
#[command(
    name = "dao-summon-args",
    about = "Predict addresses and assemble summon arguments for DAOhaus Baal DAOs"
)]
pub struct Cli {
    /// JSON-RPC endpoint used for address predictions.
    /// Can also be set via BASE_RPC environment variable.
    #[arg(long, env = "BASE_RPC", default_value = "https://mainnet.base.org", global = true)]
    pub rpc_url: String,

    /// Chain ID whose registry entries are used
    #[arg(long, default_value_t = DEFAULT_CHAIN_ID, global = true)]
    pub chain_id: u64,

    /// Registry JSON file overlaid on the bundled Base addresses.
    ///
    /// Format: `{ "<chain_id>": { "YEET24_SUMMONER": "0x...", ... } }`.
    /// The DAOhaus singletons, summoner and claim module must come from here.
    #[arg(long, env = "SUMMON_REGISTRY", global = true)]
    pub registry: Option<PathBuf>,

    /// JSON file overriding the governance, yeeter and meme defaults.
    /// Absent fields keep their built-in values.
    #[arg(long, global = true)]
    pub defaults: Option<PathBuf>,

    /// Directory of contract interface JSON files replacing the bundled ones
    #[arg(long, global = true)]
    pub abi_dir: Option<PathBuf>,

    /// Per-request RPC timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub rpc_timeout_secs: u64,

    /// Enable structured JSON logging instead of human-readable output.
    ///
    /// When enabled, all log output is emitted as newline-delimited JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw fresh deployment salts
    Salt {
        /// Decimal digits per salt
        #[arg(long, default_value_t = DEFAULT_SALT_DIGITS)]
        digits: usize,

        /// Number of salts to draw
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Predict the DAO and treasury addresses for a salt
    Predict {
        /// Salt nonce (decimal); a fresh one is drawn when omitted
        #[arg(long)]
        salt: Option<String>,
    },

    /// Assemble arguments for a meme-token DAO (liquidity shaman + yeeter)
    Meme(SummonOpts),

    /// Assemble arguments for a crowdfund DAO (yeeter only)
    Crowdfund(SummonOpts),

    /// Show the effective contract registry for the chain
    Registry,
}

/// Inputs shared by the summon subcommands
#[derive(Args, Debug, Clone)]
pub struct SummonOpts {
    /// DAO name (also the share token name)
    #[arg(long)]
    pub name: String,

    /// Share token symbol
    #[arg(long)]
    pub symbol: String,

    /// Avatar image URL
    #[arg(long, default_value = "")]
    pub image: String,

    /// DAO description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Proposer address; receives a fee share (and initial shares for crowdfunds)
    #[arg(long, value_parser = parse_address)]
    pub proposer: Option<Address>,

    /// Use this salt instead of drawing a fresh one
    #[arg(long)]
    pub salt: Option<String>,

    /// Print the arguments as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

impl SummonOpts {
    /// Build the library request for `variant` on `chain_id`.
    pub fn to_request(&self, variant: SummonVariant, chain_id: u64) -> SummonRequest {
        SummonRequest {
            dao_name: self.name.clone(),
            token_symbol: self.symbol.clone(),
            image: self.image.clone(),
            description: self.description.clone(),
            proposer: self.proposer,
            chain_id,
            variant,
        }
    }
}

fn parse_address(s: &str) -> Result<Address, String> {
    address_from_hex(s).map_err(|e| e.to_string())
}
