//! Summon argument builder
//!
//! Orchestrates one summon attempt end to end:
//!
//! ```text
//!   salt -> token params -> predict DAO + treasury -> shaman params
//!        -> predict shaman (meme only) -> post-init actions -> SummonArgs
//! ```
//!
//! Any error aborts the attempt; nothing partial is returned.

pub mod shamans;
pub mod tokens;
pub mod transaction;

pub use shamans::{
    encode_shaman_params, fee_schedule, meme_shaman_params, yeeter_shaman_params,
    MemeShamanContracts, RaiseWindow, ShamanModule,
};
pub use tokens::{assemble_token_params, encode_token_params};
pub use transaction::SummonTransaction;

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::abi::ContractInterfaceRegistry;
use crate::actions::{ActionAssembler, DaoProfile};
use crate::errors::{Result, SummonError};
use crate::oracle::{AddressOracle, ChainClient};
use crate::registry::{ContractRegistry, ContractRole, SummonDefaults};
use crate::salt::{Salt, SaltGenerator};

/// Which DAO flavour to summon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummonVariant {
    /// Liquidity-bootstrapping shaman plus yeeter shaman
    Meme,
    /// Yeeter shaman only, with an initial share mint to the proposer
    Crowdfund,
}

impl SummonVariant {
    /// `(pauseVote, pauseNonVote)` for the token config action.
    pub fn token_pause_flags(self) -> (bool, bool) {
        match self {
            SummonVariant::Meme => (true, true),
            SummonVariant::Crowdfund => (false, true),
        }
    }
}

impl fmt::Display for SummonVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummonVariant::Meme => write!(f, "meme"),
            SummonVariant::Crowdfund => write!(f, "crowdfund"),
        }
    }
}

/// Caller-supplied inputs for one summon attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummonRequest {
    /// DAO (and share token) name
    pub dao_name: String,
    /// Share token symbol
    pub token_symbol: String,
    /// Avatar image URL
    pub image: String,
    /// Free-form description
    pub description: String,
    /// Proposer receiving fees (and, for crowdfunds, the initial shares)
    pub proposer: Option<Address>,
    /// Target chain
    pub chain_id: u64,
    /// DAO flavour
    pub variant: SummonVariant,
}

/// The argument tuple for `summonBaalFromReferrer`, in call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonArgs {
    /// Loot (non-voting) token init params
    #[serde(rename = "initializationLootTokenParams")]
    pub loot_token_params: Bytes,
    /// Share (voting) token init params
    #[serde(rename = "initializationShareTokenParams")]
    pub share_token_params: Bytes,
    /// Parallel shaman singleton / permission / init-param arrays
    #[serde(rename = "initializationShamanParams")]
    pub shaman_params: Bytes,
    /// Self-calls executed right after construction, in order
    #[serde(rename = "postInitializationActions")]
    pub post_initialization_actions: Vec<Bytes>,
    /// Salt nonce shared by every derived address
    #[serde(rename = "saltNonce")]
    pub salt: Salt,
}

/// Addresses predicted during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedAddresses {
    /// Baal proxy
    pub dao: Address,
    /// Safe proxy
    pub treasury: Address,
    /// Liquidity shaman clone, meme variant only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shaman: Option<Address>,
}

/// Assembled arguments together with the predictions they embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummonPlan {
    /// Arguments for the summon call
    pub args: SummonArgs,
    /// Predictions used to build them
    pub predicted: PredictedAddresses,
}

/// Builds [`SummonArgs`] from a request, predicting addresses through `C`.
pub struct SummonArgBuilder<'a, C: ?Sized> {
    oracle: AddressOracle<'a, C>,
    registry: &'a ContractRegistry,
    interfaces: &'a ContractInterfaceRegistry,
    defaults: &'a SummonDefaults,
    salts: &'a SaltGenerator,
}

impl<'a, C: ChainClient + ?Sized> SummonArgBuilder<'a, C> {
    /// Create a builder over shared, read-only collaborators.
    pub fn new(
        client: &'a C,
        registry: &'a ContractRegistry,
        interfaces: &'a ContractInterfaceRegistry,
        defaults: &'a SummonDefaults,
        salts: &'a SaltGenerator,
    ) -> Self {
        Self {
            oracle: AddressOracle::new(client, registry, interfaces),
            registry,
            interfaces,
            defaults,
            salts,
        }
    }

    /// Assemble the summon arguments with a fresh salt, timed from now.
    pub async fn assemble_summon_args(&self, request: &SummonRequest) -> Result<SummonArgs> {
        Ok(self.plan(request, unix_now()).await?.args)
    }

    /// Assemble arguments as of `now` (unix seconds), keeping the predictions.
    pub async fn plan(&self, request: &SummonRequest, now: u64) -> Result<SummonPlan> {
        let salt = self.salts.next_salt()?;
        self.plan_with_salt(request, salt, now).await
    }

    /// Assemble arguments for an explicit salt.
    pub async fn plan_with_salt(&self, request: &SummonRequest, salt: Salt, now: u64) -> Result<SummonPlan> {
        let chain_id = request.chain_id;
        let defaults = self.defaults;
        debug!(target: "summon::builder", variant = %request.variant, chain_id, %salt, "assembling summon args");

        let token_singleton = self.registry.lookup(chain_id, ContractRole::TokenSingleton)?;
        let (loot_token_params, share_token_params) =
            assemble_token_params(token_singleton, &request.dao_name, &request.token_symbol)?;

        let (dao, treasury) = tokio::try_join!(
            self.oracle.predict_dao_address(&salt, chain_id),
            self.oracle.predict_treasury_address(&salt, chain_id),
        )?;

        let window = RaiseWindow::starting_after(now, defaults.start_date_offset_secs, defaults.duration_secs);
        let proposer_fee = match request.proposer {
            Some(proposer) => {
                let fee = defaults.yeeter.fee_amounts.first().copied().ok_or_else(|| {
                    SummonError::validation("yeeter fees", "no default fee amount to apply to the proposer")
                })?;
                Some((proposer, fee))
            }
            None => None,
        };

        let (modules, shaman) = match request.variant {
            SummonVariant::Meme => {
                let contracts = MemeShamanContracts {
                    position_manager: self.registry.lookup(chain_id, ContractRole::PositionManager)?,
                    weth: self.registry.lookup(chain_id, ContractRole::Weth)?,
                    claim_module: self.registry.lookup(chain_id, ContractRole::ClaimModule)?,
                };
                let meme = ShamanModule {
                    singleton: self.registry.lookup(chain_id, ContractRole::MemeShamanSingleton)?,
                    permissions: defaults.meme_shaman_permissions,
                    init_params: meme_shaman_params(&contracts, &defaults.yeeter, &defaults.meme, window)?,
                };
                let shaman = self.oracle.predict_shaman_address(&salt, chain_id, dao, &meme).await?;

                let mut extra = vec![(shaman, defaults.meme.boost_reward_fee)];
                extra.extend(proposer_fee);
                let yeeter = self.yeeter_module(chain_id, window, &extra)?;
                (vec![meme, yeeter], Some(shaman))
            }
            SummonVariant::Crowdfund => {
                let extra: Vec<_> = proposer_fee.into_iter().collect();
                (vec![self.yeeter_module(chain_id, window, &extra)?], None)
            }
        };
        let shaman_params = encode_shaman_params(&modules)?;

        let post_initialization_actions = self.actions(request, dao, treasury, shaman)?;

        info!(
            target: "summon::builder",
            variant = %request.variant,
            chain_id,
            %dao,
            %treasury,
            shaman = ?shaman,
            actions = post_initialization_actions.len(),
            %salt,
            "assembled summon args"
        );

        Ok(SummonPlan {
            args: SummonArgs {
                loot_token_params,
                share_token_params,
                shaman_params,
                post_initialization_actions,
                salt,
            },
            predicted: PredictedAddresses { dao, treasury, shaman },
        })
    }

    fn yeeter_module(
        &self,
        chain_id: u64,
        window: RaiseWindow,
        extra: &[(Address, U256)],
    ) -> Result<ShamanModule> {
        let yeeter = &self.defaults.yeeter;
        let (recipients, amounts) = fee_schedule(yeeter, extra)?;
        Ok(ShamanModule {
            singleton: self.registry.lookup(chain_id, ContractRole::YeeterShamanSingleton)?,
            permissions: self.defaults.yeeter_shaman_permissions,
            init_params: yeeter_shaman_params(yeeter, window, recipients, amounts)?,
        })
    }

    /// Post-init actions in their fixed order.
    fn actions(
        &self,
        request: &SummonRequest,
        dao: Address,
        treasury: Address,
        shaman: Option<Address>,
    ) -> Result<Vec<Bytes>> {
        let assembler = ActionAssembler::new(self.interfaces);
        let defaults = self.defaults;

        let profile = DaoProfile::new(
            &request.dao_name,
            dao,
            &request.description,
            &request.image,
            request.proposer,
            &defaults.profile_tags,
        );
        let poster = self.registry.lookup(request.chain_id, ContractRole::Poster)?;

        let mut actions = vec![
            assembler.governance_config_tx(&defaults.governance)?,
            assembler.metadata_config_tx(&profile, poster, &defaults.poster_tag)?,
        ];

        if request.variant == SummonVariant::Crowdfund {
            let amount = defaults.governance.sponsor_threshold.to_u256().ok_or_else(|| {
                SummonError::validation("token distribution", "sponsorThreshold must be numeric")
            })?;
            actions.push(assembler.token_distribution_tx(request.proposer, amount)?);
        }

        let (pause_vote, pause_non_vote) = request.variant.token_pause_flags();
        actions.push(assembler.token_config_tx(pause_vote, pause_non_vote)?);

        if let Some(shaman) = shaman {
            actions.push(assembler.shaman_module_config_tx(shaman, treasury)?);
        }
        Ok(actions)
    }
}

fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::function_selector;
    use crate::oracle::tests::{full_registry, StubChainClient, PREDICTED, YEETER_SINGLETON};
    use crate::oracle::{CallError, RevertError};
    use alloy_dyn_abi::{DynSolType, DynSolValue};
    use alloy_primitives::address;

    const PROPOSER: Address = address!("00000000000000000000000000000000000B0B00");
    const NOW: u64 = 1_700_000_000;

    fn request(variant: SummonVariant) -> SummonRequest {
        SummonRequest {
            dao_name: "Test DAO".into(),
            token_symbol: "TST".into(),
            image: "https://example.org/avatar.png".into(),
            description: "A test DAO".into(),
            proposer: Some(PROPOSER),
            chain_id: 8453,
            variant,
        }
    }

    fn decode(types: &str, data: &[u8]) -> Vec<DynSolValue> {
        match DynSolType::parse(types).unwrap().abi_decode_params(data).unwrap() {
            DynSolValue::Tuple(values) => values,
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    fn selectors(actions: &[Bytes]) -> Vec<[u8; 4]> {
        actions.iter().map(|a| [a[0], a[1], a[2], a[3]]).collect()
    }

    #[tokio::test]
    async fn test_meme_end_to_end() {
        let client = StubChainClient::returning(PREDICTED);
        let registry = full_registry();
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let args = builder.assemble_summon_args(&request(SummonVariant::Meme)).await.unwrap();

        assert_eq!(args.salt.as_str().len(), 32);
        assert!(args.salt.as_str().bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(args.post_initialization_actions.len(), 4);

        let execute = function_selector("executeAsBaal(address,uint256,bytes)").0;
        assert_eq!(
            selectors(&args.post_initialization_actions),
            vec![
                function_selector("setGovernanceConfig(bytes)").0,
                execute,
                function_selector("setAdminConfig(bool,bool)").0,
                execute,
            ]
        );

        let shamans = decode("(address[],uint256[],bytes[])", &args.shaman_params);
        assert_eq!(shamans[0].as_array().unwrap().len(), 2);
        assert_eq!(shamans[0].as_array().unwrap()[1].as_address().unwrap(), YEETER_SINGLETON);
    }

    #[tokio::test]
    async fn test_crowdfund_end_to_end() {
        let client = StubChainClient::returning(PREDICTED);
        let registry = full_registry();
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let plan = builder.plan(&request(SummonVariant::Crowdfund), NOW).await.unwrap();
        let args = &plan.args;

        assert_eq!(args.salt.as_str().len(), 32);
        assert_eq!(
            selectors(&args.post_initialization_actions),
            vec![
                function_selector("setGovernanceConfig(bytes)").0,
                function_selector("executeAsBaal(address,uint256,bytes)").0,
                function_selector("mintShares(address[],uint256[])").0,
                function_selector("setAdminConfig(bool,bool)").0,
            ]
        );
        assert_eq!(plan.predicted.shaman, None);
        // DAO and treasury only; no shaman prediction
        assert_eq!(client.call_count(), 2);

        let shamans = decode("(address[],uint256[],bytes[])", &args.shaman_params);
        assert_eq!(shamans[0].as_array().unwrap().len(), 1);

        let yeeter = decode(
            "(uint256,uint256,bool,uint256,uint256,uint256,address[],uint256[])",
            shamans[2].as_array().unwrap()[0].as_bytes().unwrap(),
        );
        assert_eq!(yeeter[0].as_uint().unwrap().0, U256::from(NOW + 300));
        assert_eq!(yeeter[1].as_uint().unwrap().0, U256::from(NOW + 300 + 86_400));
        let recipients = yeeter[6].as_array().unwrap();
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[1].as_address().unwrap(), PROPOSER);
    }

    #[tokio::test]
    async fn test_meme_fee_schedule_includes_shaman_then_proposer() {
        let client = StubChainClient::returning(PREDICTED);
        let registry = full_registry();
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let plan = builder.plan(&request(SummonVariant::Meme), NOW).await.unwrap();
        assert_eq!(plan.predicted.shaman, Some(PREDICTED));

        let shamans = decode("(address[],uint256[],bytes[])", &plan.args.shaman_params);
        let yeeter = decode(
            "(uint256,uint256,bool,uint256,uint256,uint256,address[],uint256[])",
            shamans[2].as_array().unwrap()[1].as_bytes().unwrap(),
        );
        let recipients: Vec<Address> =
            yeeter[6].as_array().unwrap().iter().map(|v| v.as_address().unwrap()).collect();
        assert_eq!(recipients[1..], [PREDICTED, PROPOSER]);
    }

    #[tokio::test]
    async fn test_treasury_revert_fails_meme_but_not_crowdfund() {
        let client = StubChainClient::returning(PREDICTED).on(
            "calculateCreateProxyWithNonceAddress(address,bytes,uint256)",
            Err(CallError::Revert(RevertError { data: Bytes::new(), message: "execution reverted".into() })),
        );
        let registry = full_registry();
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let err = builder.assemble_summon_args(&request(SummonVariant::Meme)).await.unwrap_err();
        assert!(matches!(err, SummonError::Validation { context: "shaman module config", .. }));

        let args = builder.assemble_summon_args(&request(SummonVariant::Crowdfund)).await.unwrap();
        assert_eq!(args.post_initialization_actions.len(), 4);
    }

    #[tokio::test]
    async fn test_repeat_meme_runs_share_token_params_only() {
        let client = StubChainClient::deriving();
        let registry = full_registry();
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let first = builder.plan(&request(SummonVariant::Meme), NOW).await.unwrap().args;
        let second = builder.plan(&request(SummonVariant::Meme), NOW).await.unwrap().args;

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.shaman_params, second.shaman_params);
        assert_eq!(first.loot_token_params, second.loot_token_params);
        assert_eq!(first.share_token_params, second.share_token_params);
    }

    #[tokio::test]
    async fn test_missing_meme_role_is_configuration_error() {
        let client = StubChainClient::returning(PREDICTED);
        let mut registry = full_registry();
        registry.insert(8453, ContractRole::ClaimModule, Address::ZERO);
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let err = builder.assemble_summon_args(&request(SummonVariant::Meme)).await.unwrap_err();
        assert_eq!(
            err,
            SummonError::Configuration { chain_id: 8453, role: "YEET24_CLAIM_MODULE".into() }
        );
    }

    #[tokio::test]
    async fn test_crowdfund_without_proposer_mints_nothing() {
        let client = StubChainClient::returning(PREDICTED);
        let registry = full_registry();
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let mut req = request(SummonVariant::Crowdfund);
        req.proposer = None;
        let args = builder.assemble_summon_args(&req).await.unwrap();

        let mint = &args.post_initialization_actions[2];
        let values = decode("(address[],uint256[])", &mint[4..]);
        assert!(values[0].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_args_render_with_summon_keys() {
        let client = StubChainClient::returning(PREDICTED);
        let registry = full_registry();
        let interfaces = ContractInterfaceRegistry::bundled().unwrap();
        let defaults = SummonDefaults::default();
        let salts = SaltGenerator::default();
        let builder = SummonArgBuilder::new(&client, &registry, &interfaces, &defaults, &salts);

        let args = builder.assemble_summon_args(&request(SummonVariant::Meme)).await.unwrap();
        let json = serde_json::to_value(&args).unwrap();

        assert_eq!(json["saltNonce"], args.salt.as_str());
        assert!(json["initializationLootTokenParams"].as_str().unwrap().starts_with("0x"));
        assert_eq!(json["postInitializationActions"].as_array().unwrap().len(), 4);
        assert!(json.get("initializationShareTokenParams").is_some());
        assert!(json.get("initializationShamanParams").is_some());
    }
}
