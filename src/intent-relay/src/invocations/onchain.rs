use alloc::vec::Vec;

use stylus_sdk::{
    alloy_primitives::{keccak256, Address},
    call::RawCall,
};

use crate::{
    errors::InvokeError,
    types::{
        invocation::{InvocationSurface, Transactional},
        opcodes::Value,
    },
};

/// Invocation surface that dispatches each intent as a plain `call` to its target.
///
/// Rollback is left to the EVM: a failed `execute` returns an error from the public method,
/// which reverts the frame together with every sub-call it made.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnchainSurface;

impl<C: ?Sized> InvocationSurface<C> for OnchainSurface {
    fn invoke(
        &mut self,
        _ctx: &mut C,
        target: Address,
        method: &str,
        args: &[Value],
    ) -> Result<Vec<u8>, InvokeError> {
        let data = calldata(method, args);
        unsafe { RawCall::new().call(target, &data) }.map_err(InvokeError::Reverted)
    }
}

impl Transactional for OnchainSurface {
    type Checkpoint = ();

    fn checkpoint(&mut self) -> Self::Checkpoint {}

    fn rollback(&mut self, _checkpoint: Self::Checkpoint) {}
}

/// `selector(method) || flattened args`.
pub fn calldata(method: &str, args: &[Value]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 * args.len());
    data.extend_from_slice(&selector(method));
    for arg in args {
        arg.flatten_into(&mut data);
    }
    data
}

pub fn selector(sig: &str) -> [u8; 4] {
    let h = keccak256(sig.as_bytes());
    [h[0], h[1], h[2], h[3]]
}
