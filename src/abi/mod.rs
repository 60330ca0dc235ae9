//! ABI codec
//!
//! Canonical contract ABI encoding for the values and calls the summon
//! pipeline produces: static types in 32-byte slots, dynamic types (`bytes`,
//! `string`, `T[]`) through head/tail offsets. Encoding itself is delegated to
//! `alloy-dyn-abi`; this module owns type checking, coercion and interface
//! lookup so that every payload is produced from an explicit
//! [`TypeTag`]/[`Value`] pair.

pub mod address;
pub mod interface;
pub mod selectors;
pub mod types;

pub use address::{address_from_hex, is_usable_address, is_valid_address, to_checksum};
pub use interface::{ContractInterface, ContractInterfaceRegistry, InterfaceKind};
pub use selectors::{canonical_signature, function_selector};
pub use types::{parse_uint, TypeTag, Value};

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};

use crate::errors::{Result, SummonError};

/// `abi.encode(values...)` for parallel type and value lists.
pub fn encode_values(types: &[TypeTag], values: &[Value]) -> Result<Bytes> {
    if types.len() != values.len() {
        return Err(SummonError::Arity { types: types.len(), values: values.len() });
    }
    let tokens = types
        .iter()
        .zip(values)
        .map(|(ty, value)| value.coerce(ty))
        .collect::<Result<Vec<_>>>()?;
    Ok(DynSolValue::Tuple(tokens).abi_encode_params().into())
}

/// Selector-prefixed calldata for `function_name(args...)` on `interface`.
pub fn encode_function(
    interface: &ContractInterface,
    function_name: &str,
    args: &[Value],
) -> Result<Bytes> {
    let function = interface.function(function_name, args.len())?;
    let types = function
        .inputs
        .iter()
        .map(|param| param.ty.parse::<TypeTag>())
        .collect::<Result<Vec<_>>>()?;

    let selector = function_selector(&canonical_signature(&function.name, &types));
    let encoded = encode_values(&types, args)?;

    let mut calldata = Vec::with_capacity(4 + encoded.len());
    calldata.extend_from_slice(selector.as_slice());
    calldata.extend_from_slice(&encoded);
    Ok(calldata.into())
}

/// Decode an address from the first 32-byte word of return data.
///
/// The upper 12 bytes of the word must be zero.
pub fn decode_address_word(data: &[u8]) -> Option<Address> {
    let word = data.get(..32)?;
    if word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    Some(Address::from_slice(&word[12..32]))
}

/// Left-pad an address into a 32-byte ABI word.
pub fn encode_address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..32].copy_from_slice(address.as_slice());
    word
}
