//! Address oracle
//!
//! Predicts where not-yet-deployed contracts will land by simulating the
//! factories' own prediction functions:
//!
//! ```text
//!   DAO       HOS summoner.calculateBaalAddress(salt)
//!   treasury  Safe proxy factory.calculateCreateProxyWithNonceAddress(masterCopy, 0x, salt)
//!   shaman    HOS summoner.predictDeterministicShamanAddress(singleton, derivedSalt)
//! ```
//!
//! A reverted or failed simulation is downgraded to [`Address::ZERO`], the
//! in-band "prediction unavailable" value, and logged. Consumers that cannot
//! tolerate the sentinel should pass results through
//! [`AddressOracle::require_prediction`]. Missing registry entries and
//! encoding failures are raised, not downgraded.
//!
//! Predictions are only valid for the deployment immediately following them
//! and are never cached.

pub mod client;
pub mod providers;
pub mod revert;

pub use client::{CallError, ChainClient, RevertError};
pub use providers::RpcChainClient;
pub use revert::{address_from_revert, address_from_revert_data, REVERT_ADDRESS_OFFSET};

use alloy_primitives::{keccak256, Address, Bytes, B256};
use tracing::{debug, warn};

use crate::abi::{
    decode_address_word, encode_values, ContractInterfaceRegistry, InterfaceKind, TypeTag,
};
use crate::constants::FIRST_SHAMAN_INDEX;
use crate::errors::{Result, SummonError};
use crate::registry::{ContractRegistry, ContractRole};
use crate::salt::Salt;
use crate::summon::ShamanModule;

/// Derived salt the HOS summoner uses for a shaman clone:
///
/// `keccak256(abi.encode(dao, index, singleton, permissions, keccak256(initParams), salt))`
pub fn derive_shaman_salt(
    dao_address: Address,
    index: u64,
    module: &ShamanModule,
    salt: &Salt,
) -> Result<B256> {
    let preimage = encode_values(
        &[
            TypeTag::Address,
            TypeTag::UINT256,
            TypeTag::Address,
            TypeTag::UINT256,
            TypeTag::FixedBytes(32),
            TypeTag::UINT256,
        ],
        &[
            dao_address.into(),
            index.into(),
            module.singleton.into(),
            module.permissions.into(),
            keccak256(&module.init_params).into(),
            salt.value().into(),
        ],
    )?;
    Ok(keccak256(&preimage))
}

/// Address predictions for one chain client, registry and interface set.
#[derive(Debug)]
pub struct AddressOracle<'a, C: ?Sized> {
    client: &'a C,
    registry: &'a ContractRegistry,
    interfaces: &'a ContractInterfaceRegistry,
}

impl<'a, C: ChainClient + ?Sized> AddressOracle<'a, C> {
    /// Create an oracle over the given collaborators.
    pub fn new(
        client: &'a C,
        registry: &'a ContractRegistry,
        interfaces: &'a ContractInterfaceRegistry,
    ) -> Self {
        Self { client, registry, interfaces }
    }

    /// Predicted Baal (DAO) proxy address for `salt`.
    pub async fn predict_dao_address(&self, salt: &Salt, chain_id: u64) -> Result<Address> {
        let factory = self.registry.lookup(chain_id, ContractRole::DaoProxyFactory)?;
        let outcome = self
            .client
            .simulate_call(
                factory,
                self.interfaces.get(InterfaceKind::HosSummoner),
                "calculateBaalAddress",
                &[salt.value().into()],
            )
            .await;
        settle(factory, "calculateBaalAddress", outcome, |_| None)
    }

    /// Predicted treasury (Safe proxy) address for `salt`.
    ///
    /// The Safe factory reports the address through a revert, which is parsed
    /// before falling back to the sentinel.
    pub async fn predict_treasury_address(&self, salt: &Salt, chain_id: u64) -> Result<Address> {
        let factory = self.registry.lookup(chain_id, ContractRole::SafeProxyFactory)?;
        let master_copy = self.registry.lookup(chain_id, ContractRole::SafeMasterCopy)?;
        let outcome = self
            .client
            .simulate_call(
                factory,
                self.interfaces.get(InterfaceKind::SafeProxyFactory),
                "calculateCreateProxyWithNonceAddress",
                &[master_copy.into(), Bytes::new().into(), salt.value().into()],
            )
            .await;
        settle(factory, "calculateCreateProxyWithNonceAddress", outcome, address_from_revert)
    }

    /// Predicted address of the first shaman clone of the DAO at `dao_address`.
    pub async fn predict_shaman_address(
        &self,
        salt: &Salt,
        chain_id: u64,
        dao_address: Address,
        module: &ShamanModule,
    ) -> Result<Address> {
        let summoner = self.registry.lookup(chain_id, ContractRole::DaoProxyFactory)?;
        let derived = derive_shaman_salt(dao_address, FIRST_SHAMAN_INDEX, module, salt)?;
        debug!(target: "summon::oracle", %dao_address, %derived, "derived shaman salt");
        let outcome = self
            .client
            .simulate_call(
                summoner,
                self.interfaces.get(InterfaceKind::HosSummoner),
                "predictDeterministicShamanAddress",
                &[module.singleton.into(), derived.into()],
            )
            .await;
        settle(summoner, "predictDeterministicShamanAddress", outcome, |_| None)
    }

    /// Turn the zero-address sentinel into [`SummonError::PredictionUnavailable`].
    pub fn require_prediction(&self, predicted: Address, factory: Address) -> Result<Address> {
        if predicted.is_zero() {
            return Err(SummonError::PredictionUnavailable { factory });
        }
        Ok(predicted)
    }
}

/// Map a simulation outcome onto a predicted address or the sentinel.
fn settle(
    factory: Address,
    function: &'static str,
    outcome: std::result::Result<Bytes, CallError>,
    from_revert: impl FnOnce(&RevertError) -> Option<Address>,
) -> Result<Address> {
    match outcome {
        Ok(data) => match decode_address_word(&data) {
            Some(predicted) => {
                debug!(target: "summon::oracle", %factory, function, %predicted, "predicted address");
                Ok(predicted)
            }
            None => {
                warn!(target: "summon::oracle", %factory, function, len = data.len(), "undecodable prediction result");
                Ok(Address::ZERO)
            }
        },
        Err(CallError::Revert(revert)) => match from_revert(&revert) {
            Some(predicted) => {
                debug!(target: "summon::oracle", %factory, function, %predicted, "predicted address from revert");
                Ok(predicted)
            }
            None => {
                warn!(target: "summon::oracle", %factory, function, %revert, "prediction reverted");
                Ok(Address::ZERO)
            }
        },
        Err(CallError::Transport(reason)) => {
            warn!(target: "summon::oracle", %factory, function, %reason, "prediction call failed");
            Ok(Address::ZERO)
        }
        Err(CallError::Encoding(err)) => Err(err),
    }
}
