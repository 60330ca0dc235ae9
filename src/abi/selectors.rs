use alloy_primitives::{keccak256, FixedBytes};

use super::TypeTag;

/// Compute the Solidity function selector (first 4 bytes of keccak256(signature)).
pub fn function_selector(signature: &str) -> FixedBytes<4> {
    let hash = keccak256(signature.as_bytes());
    FixedBytes::from_slice(&hash[..4])
}

/// Canonical signature string: `name(type1,type2,...)`.
pub fn canonical_signature(name: &str, inputs: &[TypeTag]) -> String {
    let types: Vec<String> = inputs.iter().map(ToString::to_string).collect();
    format!("{name}({})", types.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::hex;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(function_selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex::encode(function_selector("enableModule(address)")), "610b5925");
        assert_eq!(
            hex::encode(function_selector("execTransactionFromModule(address,uint256,bytes,uint8)")),
            "468721a7"
        );
    }

    #[test]
    fn test_canonical_signature() {
        let inputs = [TypeTag::Address, TypeTag::UINT256, TypeTag::Bytes];
        assert_eq!(
            canonical_signature("executeAsBaal", &inputs),
            "executeAsBaal(address,uint256,bytes)"
        );
        assert_eq!(canonical_signature("noArgs", &[]), "noArgs()");
        assert_eq!(
            canonical_signature("mintShares", &[TypeTag::array(TypeTag::Address), TypeTag::array(TypeTag::UINT256)]),
            "mintShares(address[],uint256[])"
        );
    }

    #[test]
    fn test_selector_deterministic() {
        assert_eq!(
            function_selector("setAdminConfig(bool,bool)"),
            function_selector("setAdminConfig(bool,bool)")
        );
        assert_ne!(
            function_selector("setAdminConfig(bool,bool)"),
            function_selector("setGovernanceConfig(bytes)")
        );
    }
}
