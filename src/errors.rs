use alloy_primitives::Address;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SummonError> = std::result::Result<T, E>;

/// Errors raised while encoding, predicting or assembling summon arguments.
///
/// Every variant propagates unmodified to the caller of
/// [`crate::summon::SummonArgBuilder::assemble`]; nothing is retried locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummonError {
    /// Input is not a 20-byte hex address (or fails its EIP-55 checksum)
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    /// A value cannot be coerced to its declared ABI type
    #[error("Type mismatch: cannot encode {value} as {expected}")]
    TypeMismatch {
        /// Canonical ABI type the value was declared as
        expected: String,
        /// Short description of the offending value
        value: String,
    },

    /// Type list and value list lengths differ
    #[error("Arity mismatch: {types} types for {values} values")]
    Arity {
        /// Number of declared types
        types: usize,
        /// Number of supplied values
        values: usize,
    },

    /// The named function is absent from the contract interface
    #[error("Function {function} not found in {interface} interface")]
    FunctionNotFound {
        /// Interface that was searched
        interface: String,
        /// Function name that was requested
        function: String,
    },

    /// Domain input has the wrong shape or type
    #[error("{context} received arguments in the wrong shape or type: {reason}")]
    Validation {
        /// Step that rejected the input
        context: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Registry has no entry for the requested chain / role
    #[error("No {role} configured for chain {chain_id}")]
    Configuration {
        /// Chain that was looked up
        chain_id: u64,
        /// Registry role that was missing
        role: String,
    },

    /// Catch-all ABI encode/decode failure
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A contract interface description could not be parsed
    #[error("Invalid {name} interface: {reason}")]
    Interface {
        /// Interface name
        name: String,
        /// Parse failure
        reason: String,
    },

    /// An address prediction came back as the zero-address sentinel
    #[error("Address prediction from factory {factory} unavailable")]
    PredictionUnavailable {
        /// Factory contract that was asked
        factory: Address,
    },
}

impl SummonError {
    /// Shorthand for a [`SummonError::Validation`].
    pub fn validation(context: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation { context, reason: reason.into() }
    }

    /// Shorthand for a [`SummonError::TypeMismatch`].
    pub fn mismatch(expected: impl ToString, value: impl Into<String>) -> Self {
        Self::TypeMismatch { expected: expected.to_string(), value: value.into() }
    }
}

impl From<alloy_dyn_abi::Error> for SummonError {
    fn from(err: alloy_dyn_abi::Error) -> Self {
        SummonError::Encoding(err.to_string())
    }
}
