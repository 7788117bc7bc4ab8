//! Shared intent model, script codec and invocation traits for the intent relay.
//!
//! Used by the Stylus contract (on-chain decoding) and by off-chain tooling (encoding).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod codec;
pub mod invocation;
pub mod opcodes;

pub use codec::{decode, encode, DecodeError, EncodeError};
pub use invocation::{InvocationSurface, InvokeError, Transactional};
pub use opcodes::{Intent, Opcode, Operation, Value};
