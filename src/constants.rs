/// Base mainnet chain ID (the default deployment target)
pub const DEFAULT_CHAIN_ID: u64 = 8453;
/// Number of decimal digits in a freshly drawn salt
pub const DEFAULT_SALT_DIGITS: usize = 32;
/// Largest digit count whose every value fits in a uint256 (10^77 - 1 < 2^256)
pub const MAX_SALT_DIGITS: usize = 77;
/// Module index of the first shaman in the summoner's derived-salt preimage
pub const FIRST_SHAMAN_INDEX: u64 = 0;
/// Safe `Enum.Operation.Call`
pub const SAFE_OPERATION_CALL: u8 = 0;
/// Poster tag under which DAO profiles are published
pub const DAO_PROFILE_POSTER_TAG: &str = "daohaus.summoner.daoProfile";
/// Suffix appended to the DAO name for the non-voting token
pub const LOOT_NAME_SUFFIX: &str = " LOOT";
/// Suffix appended to the token symbol for the non-voting token
pub const LOOT_SYMBOL_SUFFIX: &str = "-LOOT";
