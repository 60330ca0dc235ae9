//! Post-initialization actions
//!
//! Payloads the freshly summoned Baal executes against itself, in order,
//! right after construction. Every payload is a selector-prefixed call built
//! from the bundled interfaces; calls aimed at other contracts (Poster, the
//! treasury Safe) are wrapped in `executeAsBaal`.
//!
//! ```text
//!   meme       governance, metadata, token config, module enable
//!   crowdfund  governance, metadata, token distribution, token config
//! ```
//!
//! Nothing here performs I/O.

use alloy_primitives::{Address, Bytes, U256};
use serde::Serialize;

use crate::abi::{
    encode_function, encode_values, is_usable_address, to_checksum, ContractInterfaceRegistry,
    InterfaceKind, TypeTag, Value,
};
use crate::constants::SAFE_OPERATION_CALL;
use crate::errors::{Result, SummonError};
use crate::registry::{GovernanceDefaults, Numberish};

/// Poster table the DAO profile is written to.
const PROFILE_TABLE: &str = "daoProfile";
/// Poster query type for the DAO profile.
const PROFILE_QUERY_TYPE: &str = "list";

/// DAO profile document published through Poster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoProfile {
    /// DAO name
    pub name: String,
    /// Predicted DAO address (checksummed)
    pub dao_id: String,
    /// Poster table
    pub table: String,
    /// Poster query type
    pub query_type: String,
    /// Free-form description
    pub description: String,
    /// Avatar image URL
    pub avatar_img: String,
    /// Display title
    pub title: String,
    /// Discovery tags
    pub tags: Vec<String>,
    /// Proposer address (checksummed), if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_address: Option<String>,
}

impl DaoProfile {
    /// Build a profile for the DAO about to be summoned at `dao_address`.
    pub fn new(
        name: &str,
        dao_address: Address,
        description: &str,
        image: &str,
        author: Option<Address>,
        tags: &[String],
    ) -> Self {
        Self {
            name: name.to_owned(),
            dao_id: to_checksum(&dao_address),
            table: PROFILE_TABLE.to_owned(),
            query_type: PROFILE_QUERY_TYPE.to_owned(),
            description: description.to_owned(),
            avatar_img: image.to_owned(),
            title: format!("{name} tst"),
            tags: tags.to_vec(),
            author_address: author.map(|a| to_checksum(&a)),
        }
    }
}

/// Builds the individual post-initialization payloads.
#[derive(Debug, Clone, Copy)]
pub struct ActionAssembler<'a> {
    interfaces: &'a ContractInterfaceRegistry,
}

impl<'a> ActionAssembler<'a> {
    /// Create an assembler over the bundled (or operator-supplied) interfaces.
    pub fn new(interfaces: &'a ContractInterfaceRegistry) -> Self {
        Self { interfaces }
    }

    /// `setGovernanceConfig(abi.encode(uint32, uint32, uint256, uint256, uint256, uint256))`.
    ///
    /// Every field must be numeric; the check runs before any encoding.
    pub fn governance_config_tx(&self, governance: &GovernanceDefaults) -> Result<Bytes> {
        let fields: [(&str, &Numberish); 6] = [
            ("votingPeriodInSeconds", &governance.voting_period_in_seconds),
            ("gracePeriodInSeconds", &governance.grace_period_in_seconds),
            ("newOffering", &governance.new_offering),
            ("quorum", &governance.quorum),
            ("sponsorThreshold", &governance.sponsor_threshold),
            ("minRetention", &governance.min_retention),
        ];
        let values = fields
            .iter()
            .map(|(field, value)| {
                value.to_u256().map(Value::Uint).ok_or_else(|| {
                    SummonError::validation(
                        "governance config",
                        format!("{field} must be numeric, got {value:?}"),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let config = encode_values(
            &[
                TypeTag::Uint(32),
                TypeTag::Uint(32),
                TypeTag::UINT256,
                TypeTag::UINT256,
                TypeTag::UINT256,
                TypeTag::UINT256,
            ],
            &values,
        )?;
        encode_function(self.baal(), "setGovernanceConfig", &[config.into()])
    }

    /// `executeAsBaal(poster, 0, post(profileJson, tag))`.
    pub fn metadata_config_tx(&self, profile: &DaoProfile, poster: Address, tag: &str) -> Result<Bytes> {
        if profile.name.trim().is_empty() {
            return Err(SummonError::validation("metadata config", "DAO name must be a non-empty string"));
        }
        let content = serde_json::to_string(profile)
            .map_err(|e| SummonError::Encoding(format!("DAO profile: {e}")))?;
        let post = encode_function(
            self.interfaces.get(InterfaceKind::Poster),
            "post",
            &[content.into(), tag.into()],
        )?;
        self.execute_as_baal(poster, post)
    }

    /// `mintShares([proposer], [amount])`, or empty arrays without a proposer.
    pub fn token_distribution_tx(&self, proposer: Option<Address>, amount: U256) -> Result<Bytes> {
        let (recipients, amounts): (Vec<Value>, Vec<Value>) = match proposer {
            Some(proposer) => (vec![proposer.into()], vec![amount.into()]),
            None => (Vec::new(), Vec::new()),
        };
        encode_function(self.baal(), "mintShares", &[Value::Array(recipients), Value::Array(amounts)])
    }

    /// `setAdminConfig(pauseVote, pauseNonVote)`.
    pub fn token_config_tx(&self, pause_vote: bool, pause_non_vote: bool) -> Result<Bytes> {
        encode_function(self.baal(), "setAdminConfig", &[pause_vote.into(), pause_non_vote.into()])
    }

    /// Enable `shaman` as a module on the treasury Safe.
    ///
    /// `executeAsBaal(treasury, 0, execTransactionFromModule(treasury, 0, enableModule(shaman), Call))`.
    /// This is where a zero-address prediction is rejected.
    pub fn shaman_module_config_tx(&self, shaman: Address, treasury: Address) -> Result<Bytes> {
        for (role, address) in [("shaman", shaman), ("treasury", treasury)] {
            if !is_usable_address(&address) {
                return Err(SummonError::validation(
                    "shaman module config",
                    format!("{role} address {address} is not a usable address"),
                ));
            }
        }

        let safe = self.interfaces.get(InterfaceKind::SafeL2);
        let enable = encode_function(safe, "enableModule", &[shaman.into()])?;
        let exec = encode_function(
            safe,
            "execTransactionFromModule",
            &[
                treasury.into(),
                U256::ZERO.into(),
                enable.into(),
                u64::from(SAFE_OPERATION_CALL).into(),
            ],
        )?;
        self.execute_as_baal(treasury, exec)
    }

    fn execute_as_baal(&self, to: Address, data: Bytes) -> Result<Bytes> {
        encode_function(self.baal(), "executeAsBaal", &[to.into(), U256::ZERO.into(), data.into()])
    }

    fn baal(&self) -> &'a crate::abi::ContractInterface {
        self.interfaces.get(InterfaceKind::Baal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::function_selector;
    use crate::registry::POSTER_ADDRESS;
    use alloy_dyn_abi::{DynSolType, DynSolValue};
    use alloy_primitives::address;

    const SHAMAN: Address = address!("5a0b54D5DC17e0AadC383d2DB43B0A0D3E029c4c");
    const TREASURY: Address = address!("D0f8720846890a7961945261FE5012E4cA39918e");

    fn decode(signature_types: &str, data: &[u8]) -> Vec<DynSolValue> {
        match DynSolType::parse(signature_types).unwrap().abi_decode_params(data).unwrap() {
            DynSolValue::Tuple(values) => values,
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    fn bytes_of(value: &DynSolValue) -> Vec<u8> {
        value.as_bytes().unwrap().to_vec()
    }

    #[test]
    fn test_governance_config_accepts_numeric_strings() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);

        let mut governance = GovernanceDefaults::default();
        governance.quorum = "100".into();
        let tx = assembler.governance_config_tx(&governance).unwrap();

        assert_eq!(&tx[..4], function_selector("setGovernanceConfig(bytes)").as_slice());
        let outer = decode("(bytes)", &tx[4..]);
        let inner = decode("(uint32,uint32,uint256,uint256,uint256,uint256)", &bytes_of(&outer[0]));
        assert_eq!(inner[0].as_uint().unwrap().0, U256::from(259_200));
        assert_eq!(inner[3].as_uint().unwrap().0, U256::from(100));
        assert_eq!(inner[4].as_uint().unwrap().0, U256::from(10).pow(U256::from(18)));
    }

    #[test]
    fn test_governance_config_rejects_non_numeric() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);

        let mut governance = GovernanceDefaults::default();
        governance.quorum = "abc".into();
        let err = assembler.governance_config_tx(&governance).unwrap_err();
        assert!(matches!(err, SummonError::Validation { context: "governance config", .. }));
    }

    #[test]
    fn test_governance_config_width_is_checked() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);

        let mut governance = GovernanceDefaults::default();
        governance.voting_period_in_seconds = "4294967296".into();
        assert!(matches!(
            assembler.governance_config_tx(&governance),
            Err(SummonError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_metadata_posts_profile_through_baal() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);
        let tags = vec!["YEET24".to_owned(), "AGENT".to_owned()];
        let profile = DaoProfile::new("Test DAO", SHAMAN, "a dao", "https://img", Some(TREASURY), &tags);

        let tx = assembler
            .metadata_config_tx(&profile, POSTER_ADDRESS, "daohaus.summoner.daoProfile")
            .unwrap();
        assert_eq!(&tx[..4], function_selector("executeAsBaal(address,uint256,bytes)").as_slice());

        let outer = decode("(address,uint256,bytes)", &tx[4..]);
        assert_eq!(outer[0].as_address().unwrap(), POSTER_ADDRESS);
        let post = bytes_of(&outer[2]);
        assert_eq!(&post[..4], function_selector("post(string,string)").as_slice());

        let args = decode("(string,string)", &post[4..]);
        assert_eq!(args[1].as_str().unwrap(), "daohaus.summoner.daoProfile");
        let doc: serde_json::Value = serde_json::from_str(args[0].as_str().unwrap()).unwrap();
        assert_eq!(doc["name"], "Test DAO");
        assert_eq!(doc["daoId"], to_checksum(&SHAMAN));
        assert_eq!(doc["table"], "daoProfile");
        assert_eq!(doc["queryType"], "list");
        assert_eq!(doc["title"], "Test DAO tst");
        assert_eq!(doc["tags"], serde_json::json!(["YEET24", "AGENT"]));
        assert_eq!(doc["authorAddress"], to_checksum(&TREASURY));
    }

    #[test]
    fn test_metadata_rejects_blank_name() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);
        let profile = DaoProfile::new("  ", SHAMAN, "", "", None, &[]);

        assert!(matches!(
            assembler.metadata_config_tx(&profile, POSTER_ADDRESS, "tag"),
            Err(SummonError::Validation { context: "metadata config", .. })
        ));
    }

    #[test]
    fn test_token_distribution() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);

        let tx = assembler.token_distribution_tx(Some(TREASURY), U256::from(7)).unwrap();
        assert_eq!(&tx[..4], function_selector("mintShares(address[],uint256[])").as_slice());
        let args = decode("(address[],uint256[])", &tx[4..]);
        assert_eq!(args[0], DynSolValue::Array(vec![DynSolValue::Address(TREASURY)]));
        assert_eq!(args[1], DynSolValue::Array(vec![DynSolValue::Uint(U256::from(7), 256)]));

        let empty = assembler.token_distribution_tx(None, U256::from(7)).unwrap();
        let args = decode("(address[],uint256[])", &empty[4..]);
        assert_eq!(args[0], DynSolValue::Array(vec![]));
    }

    #[test]
    fn test_token_config_flags() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);

        let tx = assembler.token_config_tx(false, true).unwrap();
        assert_eq!(&tx[..4], function_selector("setAdminConfig(bool,bool)").as_slice());
        let args = decode("(bool,bool)", &tx[4..]);
        assert_eq!(args, vec![DynSolValue::Bool(false), DynSolValue::Bool(true)]);
    }

    #[test]
    fn test_module_enable_wraps_safe_call() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);

        let tx = assembler.shaman_module_config_tx(SHAMAN, TREASURY).unwrap();
        assert!(!tx.is_empty());

        let outer = decode("(address,uint256,bytes)", &tx[4..]);
        assert_eq!(outer[0].as_address().unwrap(), TREASURY);
        let exec = bytes_of(&outer[2]);
        assert_eq!(
            &exec[..4],
            function_selector("execTransactionFromModule(address,uint256,bytes,uint8)").as_slice()
        );
        let exec_args = decode("(address,uint256,bytes,uint8)", &exec[4..]);
        assert_eq!(exec_args[0].as_address().unwrap(), TREASURY);
        assert_eq!(exec_args[3].as_uint().unwrap().0, U256::ZERO);

        let enable = bytes_of(&exec_args[2]);
        assert_eq!(&enable[..4], function_selector("enableModule(address)").as_slice());
        assert_eq!(decode("(address)", &enable[4..])[0].as_address().unwrap(), SHAMAN);
    }

    #[test]
    fn test_module_enable_rejects_zero_addresses() {
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let assembler = ActionAssembler::new(&interfaces);

        for (shaman, treasury) in [(Address::ZERO, TREASURY), (SHAMAN, Address::ZERO)] {
            assert!(matches!(
                assembler.shaman_module_config_tx(shaman, treasury),
                Err(SummonError::Validation { context: "shaman module config", .. })
            ));
        }
    }
}
