//! # DAO Summon Args - deterministic deployment planning for DAOhaus Baal DAOs
//!
//! Predicts the addresses a DAO, its Safe treasury and its shaman modules will
//! occupy before they exist, and assembles the ABI-encoded argument tuple for
//! the summoner's `summonBaalFromReferrer` entry point. Signing and
//! broadcasting are left to the caller.

pub mod abi;
pub mod actions;
pub mod cli;
pub mod constants;
pub mod errors;
pub mod oracle;
pub mod output;
pub mod registry;
pub mod salt;
pub mod summon;
