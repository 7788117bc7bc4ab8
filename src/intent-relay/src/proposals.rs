//! Proposal lifecycle: fee-gated creation from a script, then one atomic execution.

use alloc::string::String;

use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    access,
    errors::RelayError,
    events::RelayEvent,
    executor::{execute_intents, IntentFailure},
    fees,
    storage::RelayStorage,
    types::{
        codec::decode,
        invocation::{InvocationSurface, Transactional},
        LinkedProposal, Proposal, ProposalStatus,
    },
};

pub fn create<S: RelayStorage>(
    store: &mut S,
    proposer: Address,
    script: &[u8],
    offchain_uri: String,
    linked_proposal: FixedBytes<32>,
    fee_paid: U256,
) -> Result<u64, RelayError> {
    access::require_initialized(store)?;
    access::require_not_paused(store)?;

    let required = store.fee_schedule().proposal_fee;
    if fee_paid < required {
        return Err(RelayError::InsufficientFee {
            required,
            paid: fee_paid,
        });
    }

    let intents = decode(script)?;
    let linked_proposal = LinkedProposal::from_word(linked_proposal);

    let id = store
        .proposal_count()
        .checked_add(1)
        .ok_or(RelayError::IdsExhausted)?;
    store.set_proposal_count(id);
    store.insert_proposal(Proposal {
        id,
        proposer,
        script: script.to_vec(),
        intents,
        offchain_uri: offchain_uri.clone(),
        linked_proposal,
        status: ProposalStatus::Proposed,
        created_at: store.timestamp(),
    });
    fees::credit(store, fee_paid);

    store.emit(RelayEvent::ProposalCreated {
        id,
        proposer,
        offchain_uri,
        linked_proposal,
    });
    Ok(id)
}

/// Runs every intent of proposal `id`, or none of them.
///
/// The proposal is marked `Executing` before the first intent runs, so a reentrant `execute`
/// of the same id fails with `AlreadyExecuted`. On an intent failure the storage is rolled
/// back to the state before the mark; the status is `Proposed` again and the fee is not kept.
pub fn execute<S, I>(store: &mut S, surface: &mut I, id: u64, fee_paid: U256) -> Result<(), RelayError>
where
    S: RelayStorage,
    I: InvocationSurface<S> + Transactional,
{
    access::require_initialized(store)?;
    access::require_not_paused(store)?;

    let proposal = store.proposal(id).ok_or(RelayError::NotFound(id))?;
    if proposal.status != ProposalStatus::Proposed {
        return Err(RelayError::AlreadyExecuted(id));
    }
    let required = store.fee_schedule().execution_fee;
    if fee_paid < required {
        return Err(RelayError::InsufficientFee {
            required,
            paid: fee_paid,
        });
    }

    let checkpoint = store.checkpoint();
    store.set_proposal_status(id, ProposalStatus::Executing);

    if let Err(IntentFailure { index, cause }) =
        execute_intents(store, surface, &proposal.intents)
    {
        #[cfg(feature = "debug")]
        stylus_sdk::console!("proposal {} failed at intent {}", id, index);
        store.rollback(checkpoint);
        return Err(RelayError::IntentFailed { index, cause });
    }

    store.set_proposal_status(id, ProposalStatus::Executed);
    fees::credit(store, fee_paid);
    store.emit(RelayEvent::ProposalExecuted { id });
    Ok(())
}

pub fn get<S: RelayStorage>(store: &S, id: u64) -> Option<Proposal> {
    store.proposal(id)
}
