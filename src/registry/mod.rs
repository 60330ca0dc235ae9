//! Contract registry
//!
//! Static mapping `chain_id -> role -> address` of the singletons and
//! factories the summon pipeline depends on. Built once at start from the
//! bundled defaults, optionally overlaid with an operator JSON file, and then
//! passed by reference. Roles serialize under the names DAOhaus deployment
//! tooling uses (`YEET24_SUMMONER`, `DH_TOKEN_SINGLETON`, ...), so a registry
//! file looks like:
//!
//! ```json
//! { "8453": { "YEET24_SUMMONER": "0x...", "DH_TOKEN_SINGLETON": "0x..." } }
//! ```

pub mod addresses;
pub mod defaults;

pub use addresses::{
    BASE_SAFE_MASTER_COPY, BASE_SAFE_PROXY_FACTORY, BASE_UNISWAP_V3_POSITION_MANAGER, BASE_WETH,
    POSTER_ADDRESS,
};
pub use defaults::{GovernanceDefaults, MemeDefaults, Numberish, SummonDefaults, YeeterDefaults};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::constants::DEFAULT_CHAIN_ID;
use crate::errors::{Result, SummonError};

/// Well-known contract roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractRole {
    /// HOS summoner: predicts DAO and shaman addresses, and is the summon target
    #[serde(rename = "YEET24_SUMMONER")]
    DaoProxyFactory,
    /// Shares / loot token singleton
    #[serde(rename = "DH_TOKEN_SINGLETON")]
    TokenSingleton,
    /// Liquidity-bootstrapping (meme) shaman singleton
    #[serde(rename = "YEET24_SINGLETON")]
    MemeShamanSingleton,
    /// Yeeter (crowdfund) shaman singleton
    #[serde(rename = "YEETER_SINGLETON")]
    YeeterShamanSingleton,
    /// Safe proxy factory
    #[serde(rename = "GNOSIS_SAFE_PROXY_FACTORY")]
    SafeProxyFactory,
    /// Safe master copy the treasury proxy points at
    #[serde(rename = "GNOSIS_SAFE_MASTER_COPY")]
    SafeMasterCopy,
    /// Poster contract for DAO metadata
    #[serde(rename = "POSTER")]
    Poster,
    /// Wrapped native token
    #[serde(rename = "WETH")]
    Weth,
    /// Uniswap v3 position manager
    #[serde(rename = "UNISWAP_V3_NF_POSITION_MANAGER")]
    PositionManager,
    /// Claim module used by the meme shaman after the raise
    #[serde(rename = "YEET24_CLAIM_MODULE")]
    ClaimModule,
}

impl ContractRole {
    /// Every role, in registry-file order.
    pub const ALL: [ContractRole; 10] = [
        ContractRole::DaoProxyFactory,
        ContractRole::TokenSingleton,
        ContractRole::MemeShamanSingleton,
        ContractRole::YeeterShamanSingleton,
        ContractRole::SafeProxyFactory,
        ContractRole::SafeMasterCopy,
        ContractRole::Poster,
        ContractRole::Weth,
        ContractRole::PositionManager,
        ContractRole::ClaimModule,
    ];

    /// Key used in registry files.
    pub fn key(self) -> &'static str {
        match self {
            ContractRole::DaoProxyFactory => "YEET24_SUMMONER",
            ContractRole::TokenSingleton => "DH_TOKEN_SINGLETON",
            ContractRole::MemeShamanSingleton => "YEET24_SINGLETON",
            ContractRole::YeeterShamanSingleton => "YEETER_SINGLETON",
            ContractRole::SafeProxyFactory => "GNOSIS_SAFE_PROXY_FACTORY",
            ContractRole::SafeMasterCopy => "GNOSIS_SAFE_MASTER_COPY",
            ContractRole::Poster => "POSTER",
            ContractRole::Weth => "WETH",
            ContractRole::PositionManager => "UNISWAP_V3_NF_POSITION_MANAGER",
            ContractRole::ClaimModule => "YEET24_CLAIM_MODULE",
        }
    }
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Addresses configured for a single chain.
pub type ChainContracts = BTreeMap<ContractRole, Address>;

/// Immutable `chain_id -> role -> address` lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractRegistry {
    chains: BTreeMap<u64, ChainContracts>,
}

impl ContractRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical Base deployments bundled with the crate.
    ///
    /// Only chain-agnostic infrastructure is bundled (Safe, Poster, WETH,
    /// Uniswap). DAOhaus singletons, the summoner and the claim module are
    /// deployment specific and must come from a registry file.
    pub fn base_defaults() -> Self {
        let mut registry = Self::new();
        for (role, address) in [
            (ContractRole::SafeProxyFactory, BASE_SAFE_PROXY_FACTORY),
            (ContractRole::SafeMasterCopy, BASE_SAFE_MASTER_COPY),
            (ContractRole::Poster, POSTER_ADDRESS),
            (ContractRole::Weth, BASE_WETH),
            (ContractRole::PositionManager, BASE_UNISWAP_V3_POSITION_MANAGER),
        ] {
            registry.insert(DEFAULT_CHAIN_ID, role, address);
        }
        registry
    }

    /// Parse a registry from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SummonError::Configuration {
            chain_id: 0,
            role: format!("registry document ({e})"),
        })
    }

    /// Read a registry JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SummonError::Configuration {
            chain_id: 0,
            role: format!("registry file {} ({e})", path.display()),
        })?;
        Self::from_json_str(&json)
    }

    /// Set one entry.
    pub fn insert(&mut self, chain_id: u64, role: ContractRole, address: Address) {
        self.chains.entry(chain_id).or_default().insert(role, address);
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: ContractRegistry) {
        for (chain_id, contracts) in other.chains {
            self.chains.entry(chain_id).or_default().extend(contracts);
        }
    }

    /// Address for `role` on `chain_id`.
    ///
    /// Missing and zero entries are both configuration errors.
    pub fn lookup(&self, chain_id: u64, role: ContractRole) -> Result<Address> {
        self.chains
            .get(&chain_id)
            .and_then(|contracts| contracts.get(&role))
            .copied()
            .filter(|address| !address.is_zero())
            .ok_or(SummonError::Configuration { chain_id, role: role.to_string() })
    }

    /// All entries for one chain.
    pub fn chain(&self, chain_id: u64) -> Option<&ChainContracts> {
        self.chains.get(&chain_id)
    }

    /// Configured chain IDs, ascending.
    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.chains.keys().copied()
    }

    /// Roles with no usable entry for `chain_id`.
    pub fn missing_roles(&self, chain_id: u64) -> Vec<ContractRole> {
        ContractRole::ALL
            .into_iter()
            .filter(|role| self.lookup(chain_id, *role).is_err())
            .collect()
    }
}
