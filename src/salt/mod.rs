//! Salt generation for deterministic deployments.
//!
//! A salt is a random decimal string interpreted as a `uint256`. The same salt
//! feeds every address derivation of one summon attempt, so it must be fresh
//! per attempt. [`SaltGenerator`] additionally remembers a bounded window of
//! recently issued salts and redraws on a repeat.

use alloy_primitives::U256;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Mutex;
use tracing::debug;

use crate::constants::{DEFAULT_SALT_DIGITS, MAX_SALT_DIGITS};
use crate::errors::{Result, SummonError};

/// Number of redraws before [`SaltGenerator::next_salt`] gives up.
const MAX_REDRAWS: usize = 16;

/// A deployment salt.
///
/// Keeps the exact decimal digits it was drawn as (leading zeros included)
/// alongside the integer value used on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Salt {
    digits: String,
    value: U256,
}

impl Salt {
    /// Parse a salt from a non-empty string of decimal digits.
    pub fn from_decimal(digits: &str) -> Result<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SummonError::validation("salt", format!("{digits:?} is not a decimal number")));
        }
        let value = U256::from_str_radix(digits, 10)
            .map_err(|_| SummonError::validation("salt", format!("{digits:?} exceeds 256 bits")))?;
        Ok(Self { digits: digits.to_owned(), value })
    }

    /// Integer value used as the on-chain salt nonce.
    pub fn value(&self) -> U256 {
        self.value
    }

    /// Decimal digits exactly as drawn.
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl Serialize for Salt {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits)
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let digits = String::deserialize(deserializer)?;
        Salt::from_decimal(&digits).map_err(serde::de::Error::custom)
    }
}

/// Draw `digit_length` independent uniform decimal digits from `rng`.
pub fn new_salt_with(rng: &mut impl Rng, digit_length: usize) -> Result<Salt> {
    if digit_length == 0 || digit_length > MAX_SALT_DIGITS {
        return Err(SummonError::validation(
            "salt",
            format!("digit length must be within 1..={MAX_SALT_DIGITS}, got {digit_length}"),
        ));
    }
    let digits: String = (0..digit_length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    Salt::from_decimal(&digits)
}

/// Draw a fresh salt from the thread-local RNG.
pub fn new_salt(digit_length: usize) -> Result<Salt> {
    new_salt_with(&mut rand::thread_rng(), digit_length)
}

#[derive(Debug, Default)]
struct RecentSalts {
    seen: HashSet<U256>,
    order: VecDeque<U256>,
}

/// Issues salts, refusing to repeat any of the last `window` salts it issued.
#[derive(Debug)]
pub struct SaltGenerator {
    digit_length: usize,
    window: usize,
    recent: Mutex<RecentSalts>,
}

impl SaltGenerator {
    /// Create a generator drawing `digit_length`-digit salts.
    pub fn new(digit_length: usize, window: usize) -> Self {
        Self { digit_length, window, recent: Mutex::new(RecentSalts::default()) }
    }

    /// Digit length of issued salts.
    pub fn digit_length(&self) -> usize {
        self.digit_length
    }

    /// Issue a salt not among the recently issued ones.
    pub fn next_salt(&self) -> Result<Salt> {
        self.next_salt_with(&mut rand::thread_rng())
    }

    /// [`Self::next_salt`] with an explicit RNG.
    pub fn next_salt_with(&self, rng: &mut impl Rng) -> Result<Salt> {
        let mut recent = self.recent.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for _ in 0..MAX_REDRAWS {
            let salt = new_salt_with(rng, self.digit_length)?;
            if recent.seen.contains(&salt.value()) {
                debug!(target: "summon::salt", salt = %salt, "redrawing repeated salt");
                continue;
            }
            if self.window > 0 {
                if recent.order.len() >= self.window {
                    if let Some(oldest) = recent.order.pop_front() {
                        recent.seen.remove(&oldest);
                    }
                }
                recent.seen.insert(salt.value());
                recent.order.push_back(salt.value());
            }
            debug!(target: "summon::salt", salt = %salt, "issued salt");
            return Ok(salt);
        }
        Err(SummonError::validation(
            "salt",
            format!("no unused {}-digit salt after {MAX_REDRAWS} draws", self.digit_length),
        ))
    }

    /// Number of salts currently remembered.
    pub fn remembered(&self) -> usize {
        self.recent.lock().map(|r| r.order.len()).unwrap_or_default()
    }
}

impl Default for SaltGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SALT_DIGITS, 1_024)
    }
}
