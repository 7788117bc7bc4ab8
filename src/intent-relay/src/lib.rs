//! Intent relay: fee-gated proposals of intent scripts, executed all-or-nothing.
//!
//! The lifecycle logic (`access`, `fees`, `executor`, `proposals`) is generic over
//! [`storage::RelayStorage`] and [`types::invocation::InvocationSurface`]; `relay` binds it to
//! Stylus storage and raw calls.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;

pub mod access;
pub mod errors;
pub mod events;
pub mod executor;
pub mod fees;
pub mod invocations;
pub mod proposals;
pub mod relay;
pub mod storage;
pub mod types;

#[cfg(test)]
mod testing;

pub use relay::IntentRelay;
