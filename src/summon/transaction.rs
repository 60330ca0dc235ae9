use alloy_primitives::{Address, Bytes};
use serde::Serialize;

use super::SummonArgs;
use crate::abi::{encode_function, ContractInterfaceRegistry, InterfaceKind, Value};
use crate::errors::Result;
use crate::registry::{ContractRegistry, ContractRole};

/// Unsigned call to the summoner, ready for an external signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummonTransaction {
    /// HOS summoner
    pub to: Address,
    /// `summonBaalFromReferrer` calldata
    pub input: Bytes,
}

impl SummonArgs {
    /// Encode these arguments as a `summonBaalFromReferrer` call on `chain_id`'s summoner.
    pub fn to_transaction(
        &self,
        registry: &ContractRegistry,
        interfaces: &ContractInterfaceRegistry,
        chain_id: u64,
    ) -> Result<SummonTransaction> {
        let to = registry.lookup(chain_id, ContractRole::DaoProxyFactory)?;
        let actions = self.post_initialization_actions.iter().cloned().map(Value::from).collect::<Vec<_>>();
        let input = encode_function(
            interfaces.get(InterfaceKind::HosSummoner),
            "summonBaalFromReferrer",
            &[
                self.loot_token_params.clone().into(),
                self.share_token_params.clone().into(),
                self.shaman_params.clone().into(),
                Value::Array(actions),
                self.salt.value().into(),
            ],
        )?;
        Ok(SummonTransaction { to, input })
    }
}
