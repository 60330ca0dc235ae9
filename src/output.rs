//! Colored console output for the summon argument builder.
//!
//! Color scheme: blue+bold headers, cyan values, green success,
//! yellow warnings, dimmed secondary text.

use alloy_primitives::{hex, Address, Bytes};
use colored::Colorize;

use crate::abi::to_checksum;
use crate::registry::{ContractRegistry, ContractRole};
use crate::salt::Salt;
use crate::summon::{PredictedAddresses, SummonArgs, SummonTransaction, SummonVariant};

/// Hex bytes shown before a payload is elided.
const PREVIEW_BYTES: usize = 16;

// ── Helpers ────────────────────────────────────────────────────────

/// Short preview of a byte string: `0x1234…abcd (N bytes)`.
pub fn preview_bytes(data: &[u8]) -> String {
    if data.len() <= PREVIEW_BYTES {
        return format!("0x{} ({} bytes)", hex::encode(data), data.len());
    }
    let head = &data[..PREVIEW_BYTES / 2];
    let tail = &data[data.len() - PREVIEW_BYTES / 2..];
    format!("0x{}…{} ({} bytes)", hex::encode(head), hex::encode(tail), data.len())
}

/// Render an address, flagging the zero-address sentinel.
pub fn format_predicted(address: &Address) -> String {
    if address.is_zero() {
        format!("{} {}", to_checksum(address), "(unavailable)".yellow())
    } else {
        to_checksum(address).cyan().to_string()
    }
}

/// Human name of each post-initialization action, in order.
pub fn action_labels(variant: SummonVariant) -> &'static [&'static str] {
    match variant {
        SummonVariant::Meme => &["governance config", "metadata post", "token config", "module enable"],
        SummonVariant::Crowdfund => {
            &["governance config", "metadata post", "token distribution", "token config"]
        }
    }
}

// ── Banner ─────────────────────────────────────────────────────────

/// Print the startup banner.
pub fn print_banner(chain_id: u64, rpc_url: &str) {
    println!();
    println!("{}", "=== DAO Summon Args ===".blue().bold());
    println!("  Chain ID:     {}", chain_id.to_string().cyan());
    println!("  RPC:          {}", rpc_url.cyan());
}

// ── Salts & Predictions ────────────────────────────────────────────

/// Print freshly drawn salts.
pub fn print_salts(salts: &[Salt]) {
    println!();
    println!("{}", "Salts:".blue().bold());
    for (i, salt) in salts.iter().enumerate() {
        println!("    {}. {}", (i + 1).to_string().dimmed(), salt.as_str().cyan());
    }
}

/// Print predicted addresses for a salt.
pub fn print_predictions(salt: &Salt, predicted: &PredictedAddresses) {
    println!();
    println!("{}", "Predicted addresses:".blue().bold());
    println!("  {} {}", "Salt:    ".dimmed(), salt.as_str().cyan());
    println!("  {} {}", "DAO:     ".dimmed(), format_predicted(&predicted.dao));
    println!("  {} {}", "Treasury:".dimmed(), format_predicted(&predicted.treasury));
    if let Some(shaman) = &predicted.shaman {
        println!("  {} {}", "Shaman:  ".dimmed(), format_predicted(shaman));
    }
}

// ── Summon Args ────────────────────────────────────────────────────

/// Print a summary of assembled summon arguments.
pub fn print_summon_args(variant: SummonVariant, args: &SummonArgs) {
    println!();
    println!("{} {}", "Summon arguments:".blue().bold(), variant.to_string().cyan());
    println!("  {} {}", "Loot params:  ".dimmed(), preview_bytes(&args.loot_token_params));
    println!("  {} {}", "Share params: ".dimmed(), preview_bytes(&args.share_token_params));
    println!("  {} {}", "Shaman params:".dimmed(), preview_bytes(&args.shaman_params));
    println!(
        "  {} ({}):",
        "Actions      ".dimmed(),
        args.post_initialization_actions.len().to_string().cyan()
    );
    let labels = action_labels(variant);
    for (i, action) in args.post_initialization_actions.iter().enumerate() {
        println!(
            "    {}. {:<18} {}",
            (i + 1).to_string().dimmed(),
            labels.get(i).copied().unwrap_or("action"),
            preview_bytes(action).dimmed()
        );
    }
    println!("  {} {}", "Salt nonce:   ".dimmed(), args.salt.as_str().cyan());
}

/// Print the unsigned summon transaction.
pub fn print_transaction(tx: &SummonTransaction) {
    println!();
    println!("{}", "Summon transaction (unsigned):".blue().bold());
    println!("  {} {}", "To:   ".dimmed(), to_checksum(&tx.to).cyan());
    println!("  {} {}", "Input:".dimmed(), preview_bytes(&tx.input));
    println!(
        "  {} {}",
        "NOTE".yellow().bold(),
        "Sign and broadcast with your own wallet tooling.".dimmed()
    );
}

/// Print full calldata, for piping into a signer.
pub fn print_calldata(input: &Bytes) {
    println!("0x{}", hex::encode(input));
}

// ── Registry ───────────────────────────────────────────────────────

/// Print every role for `chain_id`, marking the unconfigured ones.
pub fn print_registry(registry: &ContractRegistry, chain_id: u64) {
    println!();
    println!("{} {}", "Contract registry for chain".blue().bold(), chain_id.to_string().cyan());
    for role in ContractRole::ALL {
        match registry.lookup(chain_id, role) {
            Ok(address) => println!(
                "  {} {:<31} {}",
                "OK".green().bold(),
                role.key(),
                to_checksum(&address).cyan()
            ),
            Err(_) => println!(
                "  {} {:<31} {}",
                "--".yellow().bold(),
                role.key(),
                "not configured".dimmed()
            ),
        }
    }
}

/// Print a warning line.
pub fn print_warning(msg: &str) {
    println!("  {} {}", "WARNING:".yellow().bold(), msg);
}

// ── Tests ───────────────────────────────────────────────────────────
