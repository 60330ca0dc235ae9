use alloy_primitives::Address;

use crate::errors::{Result, SummonError};

/// Length of a hex-encoded address without the `0x` prefix.
const ADDRESS_HEX_LENGTH: usize = 40;

/// Parse a `0x`-prefixed, 40-hex-digit address.
///
/// All-lowercase and all-uppercase input is accepted as-is. Mixed-case input
/// is treated as EIP-55 checksummed and must verify.
pub fn address_from_hex(s: &str) -> Result<Address> {
    let trimmed = s.trim();
    let invalid = || SummonError::InvalidAddress(s.to_owned());

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(invalid)?;
    if digits.len() != ADDRESS_HEX_LENGTH || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{digits}"), None).map_err(|_| invalid())
    } else {
        digits.parse::<Address>().map_err(|_| invalid())
    }
}

/// Whether `s` parses as an address (see [`address_from_hex`]).
pub fn is_valid_address(s: &str) -> bool {
    address_from_hex(s).is_ok()
}

/// EIP-55 checksummed rendering.
pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}

/// Whether an address can be used as a call target or module.
///
/// The zero address is the oracle's "prediction unavailable" sentinel and is
/// never usable.
pub fn is_usable_address(address: &Address) -> bool {
    !address.is_zero()
}
