//! Off-chain tooling for intent relay scripts.
//!
//! Scripts are produced with the same codec the contract decodes with, so any script this
//! crate emits is accepted by `create` byte for byte.

pub mod encoder;
pub mod types;


pub use intent_relay_types::opcodes;
