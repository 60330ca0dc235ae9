use alloy_primitives::{hex, Address, Bytes};
use async_trait::async_trait;
use thiserror::Error;

use crate::abi::{encode_function, ContractInterface, Value};
use crate::errors::SummonError;

/// Raw revert returned by a simulated call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevertError {
    /// ABI-encoded revert payload (may be empty)
    pub data: Bytes,
    /// Node-supplied error message
    pub message: String,
}

impl std::fmt::Display for RevertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.data.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (data 0x{})", self.message, hex::encode(&self.data))
        }
    }
}

/// Failure of a read-only call against the chain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    /// The contract reverted
    #[error("Call reverted: {0}")]
    Revert(RevertError),

    /// The node could not be reached or returned a non-revert error
    #[error("Transport error: {0}")]
    Transport(String),

    /// Calldata could not be built
    #[error(transparent)]
    Encoding(#[from] SummonError),
}

/// Read-only access to a chain node.
///
/// Implementations enforce their own timeout; callers wanting retries wrap the
/// oracle, not the client.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Execute `input` against `to` without creating a transaction
    /// (`eth_call` at the latest block).
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, CallError>;

    /// Encode `function(args...)` from `interface` and simulate it against `to`.
    async fn simulate_call(
        &self,
        to: Address,
        interface: &ContractInterface,
        function: &str,
        args: &[Value],
    ) -> Result<Bytes, CallError> {
        let input = encode_function(interface, function, args)?;
        self.call(to, input).await
    }
}

#[async_trait]
impl<T: ChainClient + ?Sized> ChainClient for std::sync::Arc<T> {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, CallError> {
        (**self).call(to, input).await
    }
}
