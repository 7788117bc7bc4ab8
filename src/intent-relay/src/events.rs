use alloc::string::String;

use stylus_sdk::alloy_primitives::{Address, U256};

use crate::types::LinkedProposal;

/// Notifications emitted by relay state transitions.
///
/// The Stylus entrypoint forwards each variant as the matching Solidity event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayEvent {
    ProposalCreated {
        id: u64,
        proposer: Address,
        offchain_uri: String,
        linked_proposal: LinkedProposal,
    },
    ProposalExecuted {
        id: u64,
    },
    FeeUpdated {
        proposal_fee: U256,
        execution_fee: U256,
    },
    Withdrawn {
        to: Address,
        amount: U256,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },
    Paused {
        by: Address,
    },
    Unpaused {
        by: Address,
    },
}
