use alloy_primitives::{address, Address};

/// Safe proxy factory v1.3.0 (EIP-155 deployment used on Base)
pub const BASE_SAFE_PROXY_FACTORY: Address =
    address!("C22834581EbC8527d974F8a1c97E1bEA4EF910BC");

/// Safe L2 singleton v1.3.0, the master copy every treasury proxy delegates to
pub const BASE_SAFE_MASTER_COPY: Address =
    address!("fb1bffC9d739B8D520DaF37dF666da4C687191EA");

/// Poster (EIP-3722), same address on every chain
pub const POSTER_ADDRESS: Address = address!("000000000000cd17345801aa8147b8D3950260FF");

/// Wrapped ether predeploy on OP-stack chains
pub const BASE_WETH: Address = address!("4200000000000000000000000000000000000006");

/// Uniswap v3 NonfungiblePositionManager on Base
pub const BASE_UNISWAP_V3_POSITION_MANAGER: Address =
    address!("03a520b32C04BF3bEEf7BEb72E919cf822Ed34f1");
