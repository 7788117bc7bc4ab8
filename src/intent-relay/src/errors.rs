use stylus_sdk::alloy_primitives::{Address, U256};

/// Errors during script decoding / encoding.
pub use intent_relay_types::{DecodeError, EncodeError};

/// Errors raised by a single intent invocation.
pub use intent_relay_types::InvokeError;

/// Errors of the relay's entry points. Every error aborts the whole operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    AlreadyInitialized,
    NotInitialized,
    Unauthorized(Address),
    InvalidOwner,
    Paused,
    InsufficientFee { required: U256, paid: U256 },
    InvalidScript(DecodeError),
    NotFound(u64),
    AlreadyExecuted(u64),
    IntentFailed { index: usize, cause: InvokeError },
    InsufficientFunds { balance: U256, requested: U256 },
    TransferFailed,
    IdsExhausted,
}

impl From<DecodeError> for RelayError {
    fn from(err: DecodeError) -> Self {
        RelayError::InvalidScript(err)
    }
}
