use alloc::vec::Vec;

use alloy_primitives::Address;

use crate::opcodes::Value;

/// Errors raised by a single intent invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The target reverted; carries its revert data.
    Reverted(Vec<u8>),
    /// The intent carries an operation that cannot be invoked (raw push/pack fragments).
    NotInvocable,
    /// Used by off-chain mocks or surfaces that refuse a target.
    Rejected,
}

/// A state holder that can be rolled back to an earlier point.
///
/// Hosts with native revert semantics (the EVM) implement this with no-ops.
pub trait Transactional {
    type Checkpoint;

    fn checkpoint(&mut self) -> Self::Checkpoint;

    fn rollback(&mut self, checkpoint: Self::Checkpoint);
}

/// Invocation surface abstraction, implemented differently on-chain vs off-chain.
///
/// `ctx` is the caller's own state, handed through so that an invoked target may re-enter it.
pub trait InvocationSurface<C: ?Sized> {
    fn invoke(
        &mut self,
        ctx: &mut C,
        target: Address,
        method: &str,
        args: &[Value],
    ) -> Result<Vec<u8>, InvokeError>;
}
