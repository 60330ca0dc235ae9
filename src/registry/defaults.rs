use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

use crate::abi::parse_uint;
use crate::constants::DAO_PROFILE_POSTER_TAG;

/// A number that may arrive as a JSON integer or as a numeric string.
///
/// Governance values are commonly written as strings (`"1000000000000000000"`)
/// because they overflow JSON-safe integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numberish {
    /// Plain integer
    Int(u64),
    /// Decimal or `0x` hex integer string
    Text(String),
}

impl Numberish {
    /// Integer value, if this is a non-negative integer that fits in 256 bits.
    pub fn to_u256(&self) -> Option<U256> {
        match self {
            Numberish::Int(v) => Some(U256::from(*v)),
            Numberish::Text(s) => parse_uint(s),
        }
    }

    /// Whether [`Self::to_u256`] succeeds.
    pub fn is_numeric(&self) -> bool {
        self.to_u256().is_some()
    }
}

impl From<u64> for Numberish {
    fn from(v: u64) -> Self {
        Numberish::Int(v)
    }
}

impl From<&str> for Numberish {
    fn from(s: &str) -> Self {
        Numberish::Text(s.to_owned())
    }
}

/// Baal governance configuration applied by the first post-init action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceDefaults {
    /// Voting period in seconds (uint32)
    pub voting_period_in_seconds: Numberish,
    /// Grace period in seconds (uint32)
    pub grace_period_in_seconds: Numberish,
    /// Proposal offering in wei
    pub new_offering: Numberish,
    /// Quorum percentage
    pub quorum: Numberish,
    /// Shares required to sponsor a proposal; also the crowdfund proposer's initial mint
    pub sponsor_threshold: Numberish,
    /// Minimum retention percentage
    pub min_retention: Numberish,
}

impl Default for GovernanceDefaults {
    fn default() -> Self {
        Self {
            voting_period_in_seconds: 259_200.into(), // 3 days
            grace_period_in_seconds: 172_800.into(),  // 2 days
            new_offering: "10000000000000000".into(),
            quorum: "20".into(),
            sponsor_threshold: "1000000000000000000".into(),
            min_retention: "66".into(),
        }
    }
}

/// Yeeter (crowdfund) shaman parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YeeterDefaults {
    /// Price per contribution unit in wei
    pub price: U256,
    /// Shares minted per unit
    pub multiplier: U256,
    /// Mint shares (true) or loot (false)
    pub is_shares: bool,
    /// Raise must reach this to succeed
    pub min_threshold_goal: U256,
    /// Protocol fee recipients
    pub fee_recipients: Vec<Address>,
    /// Fee per recipient, parallel to `fee_recipients`
    pub fee_amounts: Vec<U256>,
}

impl Default for YeeterDefaults {
    fn default() -> Self {
        Self {
            price: U256::from(50_000_000_000_000u64),
            multiplier: U256::from(1_000u64),
            is_shares: true,
            min_threshold_goal: U256::from(1_000_000_000_000_000u64),
            fee_recipients: vec![address!("D0f8720846890a7961945261FE5012E4cA39918e")],
            fee_amounts: vec![U256::from(5_000u64)],
        }
    }
}

/// Liquidity-bootstrapping (meme) shaman parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemeDefaults {
    /// Uniswap v3 pool fee tier (uint24)
    pub pool_fee: u32,
    /// Fee routed to the meme shaman as the boost reward
    pub boost_reward_fee: U256,
}

impl Default for MemeDefaults {
    fn default() -> Self {
        Self { pool_fee: 10_000, boost_reward_fee: U256::from(5_000u64) }
    }
}

/// Everything the summon pipeline does not derive or predict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummonDefaults {
    /// Governance config
    pub governance: GovernanceDefaults,
    /// Yeeter shaman config
    pub yeeter: YeeterDefaults,
    /// Meme shaman config
    pub meme: MemeDefaults,
    /// Permission bitmask granted to the meme shaman
    pub meme_shaman_permissions: U256,
    /// Permission bitmask granted to the yeeter shaman
    pub yeeter_shaman_permissions: U256,
    /// Seconds between assembly time and the raise start
    pub start_date_offset_secs: u64,
    /// Length of the raise in seconds
    pub duration_secs: u64,
    /// Poster tag for the DAO profile
    pub poster_tag: String,
    /// Tags embedded in the DAO profile document
    pub profile_tags: Vec<String>,
}

impl Default for SummonDefaults {
    fn default() -> Self {
        Self {
            governance: GovernanceDefaults::default(),
            yeeter: YeeterDefaults::default(),
            meme: MemeDefaults::default(),
            meme_shaman_permissions: U256::from(2),
            yeeter_shaman_permissions: U256::from(2),
            start_date_offset_secs: 300,
            duration_secs: 86_400,
            poster_tag: DAO_PROFILE_POSTER_TAG.to_owned(),
            profile_tags: vec!["YEET24".to_owned(), "AGENT".to_owned()],
        }
    }
}

impl SummonDefaults {
    /// Parse from JSON; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
