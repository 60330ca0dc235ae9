use alloy_primitives::Address;

use super::client::RevertError;
use crate::abi::address_from_hex;

/// Offset of the address inside the Safe factory's revert payload.
///
/// `calculateCreateProxyWithNonceAddress` deploys the proxy and then reverts
/// with `Error(string(abi.encodePacked(proxy)))`:
/// selector (4) + string offset (32) + string length (32), then 20 raw bytes.
pub const REVERT_ADDRESS_OFFSET: usize = 4 + 32 + 32;

/// Recover the predicted address from a treasury-factory revert.
///
/// Reads the fixed offset in the revert data first, then falls back to the
/// first `0x`-prefixed 40-hex-digit token in the node's message.
pub fn address_from_revert(revert: &RevertError) -> Option<Address> {
    address_from_revert_data(&revert.data).or_else(|| address_from_revert_message(&revert.message))
}

/// The 20 bytes at [`REVERT_ADDRESS_OFFSET`], if present and non-zero.
pub fn address_from_revert_data(data: &[u8]) -> Option<Address> {
    let raw = data.get(REVERT_ADDRESS_OFFSET..REVERT_ADDRESS_OFFSET + 20)?;
    let address = Address::from_slice(raw);
    (!address.is_zero()).then_some(address)
}

/// First address-shaped token in a free-form error message.
pub fn address_from_revert_message(message: &str) -> Option<Address> {
    message
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ':' | ';' | '"' | '\'' | '(' | ')'))
        .filter(|token| token.len() == 42 && token.starts_with("0x"))
        .find_map(|token| address_from_hex(token).ok())
        .filter(|address| !address.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex, Bytes};

    const PROXY: Address = address!("5a0b54D5DC17e0AadC383d2DB43B0A0D3E029c4c");

    /// Error(string) carrying the 20 raw address bytes, as the Safe factory emits.
    fn safe_factory_revert(proxy: Address) -> Bytes {
        let mut data = hex!("08c379a0").to_vec();
        let mut offset = [0u8; 32];
        offset[31] = 0x20;
        let mut length = [0u8; 32];
        length[31] = 20;
        data.extend_from_slice(&offset);
        data.extend_from_slice(&length);
        data.extend_from_slice(proxy.as_slice());
        data.extend_from_slice(&[0u8; 12]);
        data.into()
    }

    #[test]
    fn test_address_at_fixed_offset() {
        let revert = RevertError {
            data: safe_factory_revert(PROXY),
            message: "execution reverted".into(),
        };
        assert_eq!(address_from_revert(&revert), Some(PROXY));
    }

    #[test]
    fn test_short_revert_data_yields_none() {
        assert_eq!(address_from_revert_data(&hex!("08c379a0")), None);
        assert_eq!(address_from_revert_data(&[]), None);
    }

    #[test]
    fn test_message_fallback() {
        let revert = RevertError {
            data: Bytes::new(),
            message: format!("execution reverted: proxy at {}, aborting", PROXY),
        };
        assert_eq!(address_from_revert(&revert), Some(PROXY));
    }

    #[test]
    fn test_unparseable_revert() {
        let revert = RevertError {
            data: Bytes::from_static(&[0xde, 0xad]),
            message: "execution reverted: GS000".into(),
        };
        assert_eq!(address_from_revert(&revert), None);
    }
}
