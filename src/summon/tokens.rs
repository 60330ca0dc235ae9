use alloy_primitives::{Address, Bytes};

use crate::abi::{encode_values, TypeTag};
use crate::constants::{LOOT_NAME_SUFFIX, LOOT_SYMBOL_SUFFIX};
use crate::errors::Result;

/// `abi.encode(address singleton, bytes abi.encode(string name, string symbol))`.
pub fn encode_token_params(singleton: Address, name: &str, symbol: &str) -> Result<Bytes> {
    let metadata = encode_values(&[TypeTag::String, TypeTag::String], &[name.into(), symbol.into()])?;
    encode_values(&[TypeTag::Address, TypeTag::Bytes], &[singleton.into(), metadata.into()])
}

/// Loot and share token initialization params, in that order.
///
/// The loot (non-voting) token takes the DAO name and symbol with
/// [`LOOT_NAME_SUFFIX`] and [`LOOT_SYMBOL_SUFFIX`] appended.
pub fn assemble_token_params(singleton: Address, dao_name: &str, symbol: &str) -> Result<(Bytes, Bytes)> {
    let loot = encode_token_params(
        singleton,
        &format!("{dao_name}{LOOT_NAME_SUFFIX}"),
        &format!("{symbol}{LOOT_SYMBOL_SUFFIX}"),
    )?;
    let shares = encode_token_params(singleton, dao_name, symbol)?;
    Ok((loot, shares))
}
