//! Storage abstraction the relay components run against.
//!
//! The Stylus entrypoint implements it over `sol_storage!` fields; tests use an in-memory map.

use stylus_sdk::alloy_primitives::{Address, U256};

use crate::{
    errors::InvokeError,
    events::RelayEvent,
    types::{invocation::Transactional, FeeSchedule, Proposal, ProposalStatus},
};

pub trait RelayStorage: Transactional {
    fn is_initialized(&self) -> bool;
    fn set_initialized(&mut self);

    fn owner(&self) -> Address;
    fn set_owner(&mut self, owner: Address);

    fn is_paused(&self) -> bool;
    fn set_paused(&mut self, paused: bool);

    fn fee_schedule(&self) -> FeeSchedule;
    fn set_fee_schedule(&mut self, fees: FeeSchedule);

    fn balance(&self) -> U256;
    fn set_balance(&mut self, balance: U256);

    /// Highest id handed out so far (0 when no proposal exists).
    fn proposal_count(&self) -> u64;
    fn set_proposal_count(&mut self, count: u64);

    fn proposal(&self, id: u64) -> Option<Proposal>;
    fn insert_proposal(&mut self, proposal: Proposal);
    fn set_proposal_status(&mut self, id: u64, status: ProposalStatus);

    /// Logical timestamp recorded as `created_at`.
    fn timestamp(&self) -> u64;

    fn emit(&mut self, event: RelayEvent);

    /// Moves `amount` of the held balance out to `to`.
    fn pay_out(&mut self, to: Address, amount: U256) -> Result<(), InvokeError>;
}
