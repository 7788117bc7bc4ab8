//! Single-owner admin gate with one-time initialization.
//!
//! The relay is deployed behind a logic-swap proxy, so storage outlives the code and a
//! constructor would never run again. `initialize` takes its place and can succeed once.

use stylus_sdk::alloy_primitives::Address;

use crate::{
    errors::RelayError, events::RelayEvent, fees, storage::RelayStorage, types::FeeSchedule,
};

pub fn initialize<S: RelayStorage>(
    store: &mut S,
    owner: Address,
    schedule: FeeSchedule,
) -> Result<(), RelayError> {
    if store.is_initialized() {
        return Err(RelayError::AlreadyInitialized);
    }
    if owner == Address::ZERO {
        return Err(RelayError::InvalidOwner);
    }

    store.set_initialized();
    store.set_owner(owner);
    store.emit(RelayEvent::OwnershipTransferred {
        previous_owner: Address::ZERO,
        new_owner: owner,
    });
    fees::install(store, schedule);
    Ok(())
}

pub fn require_initialized<S: RelayStorage>(store: &S) -> Result<(), RelayError> {
    if !store.is_initialized() {
        return Err(RelayError::NotInitialized);
    }
    Ok(())
}

pub fn require_owner<S: RelayStorage>(store: &S, caller: Address) -> Result<(), RelayError> {
    require_initialized(store)?;
    if caller != store.owner() {
        return Err(RelayError::Unauthorized(caller));
    }
    Ok(())
}

pub fn require_not_paused<S: RelayStorage>(store: &S) -> Result<(), RelayError> {
    if store.is_paused() {
        return Err(RelayError::Paused);
    }
    Ok(())
}

pub fn transfer_ownership<S: RelayStorage>(
    store: &mut S,
    caller: Address,
    new_owner: Address,
) -> Result<(), RelayError> {
    require_owner(store, caller)?;
    if new_owner == Address::ZERO {
        return Err(RelayError::InvalidOwner);
    }
    store.set_owner(new_owner);
    store.emit(RelayEvent::OwnershipTransferred {
        previous_owner: caller,
        new_owner,
    });
    Ok(())
}

pub fn pause<S: RelayStorage>(store: &mut S, caller: Address) -> Result<(), RelayError> {
    require_owner(store, caller)?;
    store.set_paused(true);
    store.emit(RelayEvent::Paused { by: caller });
    Ok(())
}

pub fn unpause<S: RelayStorage>(store: &mut S, caller: Address) -> Result<(), RelayError> {
    require_owner(store, caller)?;
    store.set_paused(false);
    store.emit(RelayEvent::Unpaused { by: caller });
    Ok(())
}
