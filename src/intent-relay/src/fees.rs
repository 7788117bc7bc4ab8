//! Fee schedule and the balance accumulated from accepted fee payments.

use stylus_sdk::alloy_primitives::{Address, U256};

use crate::{
    access, errors::RelayError, events::RelayEvent, storage::RelayStorage, types::FeeSchedule,
};

pub fn fees<S: RelayStorage>(store: &S) -> FeeSchedule {
    store.fee_schedule()
}

/// Writes the schedule and reports it. No owner check; callers authorize first.
pub(crate) fn install<S: RelayStorage>(store: &mut S, schedule: FeeSchedule) {
    store.set_fee_schedule(schedule);
    store.emit(RelayEvent::FeeUpdated {
        proposal_fee: schedule.proposal_fee,
        execution_fee: schedule.execution_fee,
    });
}

pub fn set_proposal_fee<S: RelayStorage>(
    store: &mut S,
    caller: Address,
    amount: U256,
) -> Result<(), RelayError> {
    access::require_owner(store, caller)?;
    let mut schedule = store.fee_schedule();
    schedule.proposal_fee = amount;
    install(store, schedule);
    Ok(())
}

pub fn set_execution_fee<S: RelayStorage>(
    store: &mut S,
    caller: Address,
    amount: U256,
) -> Result<(), RelayError> {
    access::require_owner(store, caller)?;
    let mut schedule = store.fee_schedule();
    schedule.execution_fee = amount;
    install(store, schedule);
    Ok(())
}

/// Credits an accepted fee payment.
pub(crate) fn credit<S: RelayStorage>(store: &mut S, amount: U256) {
    let balance = store.balance();
    store.set_balance(balance.saturating_add(amount));
}

pub fn withdraw<S: RelayStorage>(
    store: &mut S,
    caller: Address,
    to: Address,
    amount: U256,
) -> Result<(), RelayError> {
    access::require_owner(store, caller)?;
    let balance = store.balance();
    if amount > balance {
        return Err(RelayError::InsufficientFunds {
            balance,
            requested: amount,
        });
    }

    // Debit before paying out; the recipient may call back in.
    store.set_balance(balance - amount);
    if store.pay_out(to, amount).is_err() {
        store.set_balance(balance);
        return Err(RelayError::TransferFailed);
    }
    store.emit(RelayEvent::Withdrawn { to, amount });
    Ok(())
}
