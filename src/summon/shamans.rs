use alloy_primitives::{Address, Bytes, U256};

use crate::abi::{encode_values, TypeTag, Value};
use crate::errors::{Result, SummonError};
use crate::registry::{MemeDefaults, YeeterDefaults};

/// One shaman to be cloned and attached to the DAO at summon time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShamanModule {
    /// Singleton the clone is made from
    pub singleton: Address,
    /// Permission bitmask granted to the clone
    pub permissions: U256,
    /// ABI-encoded `setup` params
    pub init_params: Bytes,
}

/// Addresses the liquidity (meme) shaman interacts with after the raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemeShamanContracts {
    /// Uniswap v3 position manager
    pub position_manager: Address,
    /// Wrapped native token
    pub weth: Address,
    /// Claim module
    pub claim_module: Address,
}

/// Raise window, in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaiseWindow {
    /// Contributions open
    pub start: u64,
    /// Contributions close
    pub end: u64,
}

impl RaiseWindow {
    /// Window opening `offset` seconds after `now` and lasting `duration`.
    pub fn starting_after(now: u64, offset: u64, duration: u64) -> Self {
        let start = now.saturating_add(offset);
        Self { start, end: start.saturating_add(duration) }
    }
}

/// `abi.encode(address posMgr, address weth, address claimModule, uint256 minThresholdGoal, uint256 endDate, uint24 poolFee)`.
pub fn meme_shaman_params(
    contracts: &MemeShamanContracts,
    yeeter: &YeeterDefaults,
    meme: &MemeDefaults,
    window: RaiseWindow,
) -> Result<Bytes> {
    encode_values(
        &[
            TypeTag::Address,
            TypeTag::Address,
            TypeTag::Address,
            TypeTag::UINT256,
            TypeTag::UINT256,
            TypeTag::Uint(24),
        ],
        &[
            contracts.position_manager.into(),
            contracts.weth.into(),
            contracts.claim_module.into(),
            yeeter.min_threshold_goal.into(),
            window.end.into(),
            meme.pool_fee.into(),
        ],
    )
}

/// Yeeter fee schedule: the configured recipients followed by `extra`.
///
/// Recipients and amounts stay parallel.
pub fn fee_schedule(yeeter: &YeeterDefaults, extra: &[(Address, U256)]) -> Result<(Vec<Address>, Vec<U256>)> {
    if yeeter.fee_recipients.len() != yeeter.fee_amounts.len() {
        return Err(SummonError::validation(
            "yeeter fees",
            format!(
                "{} fee recipients but {} fee amounts",
                yeeter.fee_recipients.len(),
                yeeter.fee_amounts.len()
            ),
        ));
    }
    let mut recipients = yeeter.fee_recipients.clone();
    let mut amounts = yeeter.fee_amounts.clone();
    for (recipient, amount) in extra {
        recipients.push(*recipient);
        amounts.push(*amount);
    }
    Ok((recipients, amounts))
}

/// `abi.encode(uint256 start, uint256 end, bool isShares, uint256 price, uint256 multiplier, uint256 minThresholdGoal, address[] feeRecipients, uint256[] feeAmounts)`.
pub fn yeeter_shaman_params(
    yeeter: &YeeterDefaults,
    window: RaiseWindow,
    fee_recipients: Vec<Address>,
    fee_amounts: Vec<U256>,
) -> Result<Bytes> {
    encode_values(
        &[
            TypeTag::UINT256,
            TypeTag::UINT256,
            TypeTag::Bool,
            TypeTag::UINT256,
            TypeTag::UINT256,
            TypeTag::UINT256,
            TypeTag::array(TypeTag::Address),
            TypeTag::array(TypeTag::UINT256),
        ],
        &[
            window.start.into(),
            window.end.into(),
            yeeter.is_shares.into(),
            yeeter.price.into(),
            yeeter.multiplier.into(),
            yeeter.min_threshold_goal.into(),
            fee_recipients.into(),
            fee_amounts.into(),
        ],
    )
}

/// `abi.encode(address[] singletons, uint256[] permissions, bytes[] initParams)`.
///
/// The three arrays follow the order of `modules`.
pub fn encode_shaman_params(modules: &[ShamanModule]) -> Result<Bytes> {
    let singletons: Vec<Value> = modules.iter().map(|m| m.singleton.into()).collect();
    let permissions: Vec<Value> = modules.iter().map(|m| m.permissions.into()).collect();
    let init_params: Vec<Value> = modules.iter().map(|m| m.init_params.clone().into()).collect();
    encode_values(
        &[
            TypeTag::array(TypeTag::Address),
            TypeTag::array(TypeTag::UINT256),
            TypeTag::array(TypeTag::Bytes),
        ],
        &[singletons.into(), permissions.into(), init_params.into()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_dyn_abi::{DynSolType, DynSolValue};
    use alloy_primitives::address;

    const MEME: Address = address!("3333333333333333333333333333333333333333");
    const YEETER: Address = address!("4444444444444444444444444444444444444444");

    fn decode(types: &str, data: &[u8]) -> Vec<DynSolValue> {
        match DynSolType::parse(types).unwrap().abi_decode_params(data).unwrap() {
            DynSolValue::Tuple(values) => values,
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    fn test_raise_window() {
        let window = RaiseWindow::starting_after(1_000, 300, 86_400);
        assert_eq!(window, RaiseWindow { start: 1_300, end: 87_700 });
    }

    #[test]
    fn test_meme_params_layout() {
        let contracts = MemeShamanContracts {
            position_manager: address!("03a520b32C04BF3bEEf7BEb72E919cf822Ed34f1"),
            weth: address!("4200000000000000000000000000000000000006"),
            claim_module: address!("5555555555555555555555555555555555555555"),
        };
        let params = meme_shaman_params(
            &contracts,
            &YeeterDefaults::default(),
            &MemeDefaults::default(),
            RaiseWindow { start: 10, end: 20 },
        )
        .unwrap();

        let values = decode("(address,address,address,uint256,uint256,uint24)", &params);
        assert_eq!(values[1].as_address().unwrap(), contracts.weth);
        assert_eq!(values[4].as_uint().unwrap().0, U256::from(20));
        assert_eq!(values[5].as_uint().unwrap().0, U256::from(10_000));
    }

    #[test]
    fn test_fee_schedule_extends_defaults() {
        let shaman = address!("00000000000000000000000000000000000000aa");
        let (recipients, amounts) =
            fee_schedule(&YeeterDefaults::default(), &[(shaman, U256::from(5_000))]).unwrap();
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[1], shaman);
        assert_eq!(amounts, vec![U256::from(5_000), U256::from(5_000)]);
    }

    #[test]
    fn test_fee_schedule_rejects_ragged_defaults() {
        let mut yeeter = YeeterDefaults::default();
        yeeter.fee_amounts.clear();
        assert!(matches!(
            fee_schedule(&yeeter, &[]),
            Err(SummonError::Validation { context: "yeeter fees", .. })
        ));
    }

    #[test]
    fn test_shaman_arrays_stay_parallel() {
        let modules = [
            ShamanModule {
                singleton: MEME,
                permissions: U256::from(2),
                init_params: Bytes::from_static(b"meme"),
            },
            ShamanModule {
                singleton: YEETER,
                permissions: U256::from(3),
                init_params: Bytes::from_static(b"yeeter"),
            },
        ];
        let encoded = encode_shaman_params(&modules).unwrap();
        let values = decode("(address[],uint256[],bytes[])", &encoded);

        let singletons = values[0].as_array().unwrap();
        let permissions = values[1].as_array().unwrap();
        let params = values[2].as_array().unwrap();
        assert_eq!(singletons[0].as_address().unwrap(), MEME);
        assert_eq!(permissions[0].as_uint().unwrap().0, U256::from(2));
        assert_eq!(params[0].as_bytes().unwrap(), b"meme");
        assert_eq!(singletons[1].as_address().unwrap(), YEETER);
        assert_eq!(permissions[1].as_uint().unwrap().0, U256::from(3));
        assert_eq!(params[1].as_bytes().unwrap(), b"yeeter");
    }
}
