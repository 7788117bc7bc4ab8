use alloc::{string::String, vec::Vec};

use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::types::opcodes::Intent;

/// Word submitted as `linkedProposal` when a proposal is not linked to anything.
pub const NONE_SENTINEL: FixedBytes<32> = FixedBytes::repeat_byte(0xff);

/// Opaque cross-system reference attached to a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkedProposal {
    None,
    Linked(FixedBytes<32>),
}

impl LinkedProposal {
    pub fn from_word(word: FixedBytes<32>) -> Self {
        if word == NONE_SENTINEL {
            LinkedProposal::None
        } else {
            LinkedProposal::Linked(word)
        }
    }

    pub fn to_word(self) -> FixedBytes<32> {
        match self {
            LinkedProposal::None => NONE_SENTINEL,
            LinkedProposal::Linked(word) => word,
        }
    }
}

/// Lifecycle of a proposal. `Executing` is only observable while an `execute` is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ProposalStatus {
    Proposed = 1,
    Executing = 2,
    Executed = 3,
}

impl TryFrom<u8> for ProposalStatus {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProposalStatus::Proposed),
            2 => Ok(ProposalStatus::Executing),
            3 => Ok(ProposalStatus::Executed),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    /// Script the intents were decoded from.
    pub script: Vec<u8>,
    pub intents: Vec<Intent>,
    pub offchain_uri: String,
    pub linked_proposal: LinkedProposal,
    pub status: ProposalStatus,
    pub created_at: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSchedule {
    pub proposal_fee: U256,
    pub execution_fee: U256,
}
