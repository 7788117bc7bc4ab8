//! Intent model (shared crate) plus the relay's own records.

pub mod proposal;

pub use intent_relay_types::{codec, invocation, opcodes};
pub use proposal::{FeeSchedule, LinkedProposal, Proposal, ProposalStatus, NONE_SENTINEL};
