//! Stylus entrypoint for the intent relay.
//!
//! Binds the proposal lifecycle to contract storage: `msg.sender` is the proposer / caller,
//! `msg.value` is the fee paid, intents run as plain calls and every state transition is
//! reported as a Solidity event. Returning an error from a public method reverts the whole
//! call, which is what makes the storage `Transactional` implementation a no-op.
//!
//! The contract is built without the SDK's `reentrant` feature, so a target that calls back
//! into the relay while intents run is rejected by the entrypoint itself.

use alloc::{string::String, vec, vec::Vec};

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256, U64, U8},
    call::RawCall,
    prelude::*,
    stylus_core::log,
};

use alloy_sol_types::sol;
use stylus_sdk::stylus_proc::SolidityError;

use crate::{
    access,
    errors::{DecodeError, InvokeError, RelayError},
    events::RelayEvent,
    fees,
    invocations::OnchainSurface,
    proposals,
    storage::RelayStorage,
    types::{
        codec::decode, invocation::Transactional, FeeSchedule, LinkedProposal, Proposal,
        ProposalStatus,
    },
};

sol! {
    event ProposalCreated(uint64 indexed id, address indexed proposer, string offchainUri, bytes32 linkedProposal);
    event ProposalExecuted(uint64 indexed id);
    event FeeUpdated(uint256 proposalFee, uint256 executionFee);
    event Withdrawn(address indexed to, uint256 amount);
    event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
    event Paused(address by);
    event Unpaused(address by);

    error AlreadyInitialized();
    error NotInitialized();
    error Unauthorized(address caller);
    error InvalidOwner();
    error EnforcedPause();
    error InsufficientFee(uint256 required, uint256 paid);
    error InvalidScript(uint8 reason, uint8 opcode);
    error ProposalNotFound(uint64 id);
    error AlreadyExecuted(uint64 id);
    error IntentFailed(uint256 index, bytes returnData);
    error InsufficientFunds(uint256 balance, uint256 requested);
    error TransferFailed();
    error IdsExhausted();
}

#[derive(SolidityError)]
pub enum RelayRevert {
    AlreadyInitialized(AlreadyInitialized),
    NotInitialized(NotInitialized),
    Unauthorized(Unauthorized),
    InvalidOwner(InvalidOwner),
    EnforcedPause(EnforcedPause),
    InsufficientFee(InsufficientFee),
    InvalidScript(InvalidScript),
    ProposalNotFound(ProposalNotFound),
    AlreadyExecuted(AlreadyExecuted),
    IntentFailed(IntentFailed),
    InsufficientFunds(InsufficientFunds),
    TransferFailed(TransferFailed),
    IdsExhausted(IdsExhausted),
}

impl From<RelayError> for RelayRevert {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::AlreadyInitialized => Self::AlreadyInitialized(AlreadyInitialized {}),
            RelayError::NotInitialized => Self::NotInitialized(NotInitialized {}),
            RelayError::Unauthorized(caller) => Self::Unauthorized(Unauthorized { caller }),
            RelayError::InvalidOwner => Self::InvalidOwner(InvalidOwner {}),
            RelayError::Paused => Self::EnforcedPause(EnforcedPause {}),
            RelayError::InsufficientFee { required, paid } => {
                Self::InsufficientFee(InsufficientFee { required, paid })
            }
            RelayError::InvalidScript(err) => {
                let (reason, opcode) = decode_error_code(err);
                Self::InvalidScript(InvalidScript { reason, opcode })
            }
            RelayError::NotFound(id) => Self::ProposalNotFound(ProposalNotFound { id }),
            RelayError::AlreadyExecuted(id) => Self::AlreadyExecuted(AlreadyExecuted { id }),
            RelayError::IntentFailed { index, cause } => {
                let return_data = match cause {
                    InvokeError::Reverted(data) => data,
                    InvokeError::NotInvocable | InvokeError::Rejected => Vec::new(),
                };
                Self::IntentFailed(IntentFailed {
                    index: U256::from(index),
                    returnData: return_data.into(),
                })
            }
            RelayError::InsufficientFunds { balance, requested } => {
                Self::InsufficientFunds(InsufficientFunds { balance, requested })
            }
            RelayError::TransferFailed => Self::TransferFailed(TransferFailed {}),
            RelayError::IdsExhausted => Self::IdsExhausted(IdsExhausted {}),
        }
    }
}

/// Stable `(reason, opcode)` pair for `InvalidScript`; `opcode` is only set for unknown opcodes.
fn decode_error_code(err: DecodeError) -> (u8, u8) {
    match err {
        DecodeError::Truncated => (1, 0),
        DecodeError::UnknownOpcode(byte) => (2, byte),
        DecodeError::TooLarge => (3, 0),
        DecodeError::TrailingBytes => (4, 0),
        DecodeError::StackUnderflow => (5, 0),
        DecodeError::ExpectedArray => (6, 0),
        DecodeError::InvalidMethod => (7, 0),
        DecodeError::UnbalancedStack => (8, 0),
        DecodeError::InvalidTarget => (9, 0),
    }
}

sol_storage! {
    /// One stored proposal. The decoded intents are not persisted; `script` is decoded again
    /// on every read.
    pub struct StoredProposal {
        address proposer;
        bytes script;
        string offchain_uri;
        bytes32 linked_proposal;
        /// `ProposalStatus` as `u8`; zero marks an unused id.
        uint8 status;
        uint64 created_at;
    }

    #[entrypoint]
    pub struct IntentRelay {
        bool initialized;
        address owner;
        bool paused;

        uint256 proposal_fee;
        uint256 execution_fee;
        /// Accepted fees not yet withdrawn.
        uint256 balance;

        /// Highest proposal id handed out.
        uint64 proposal_count;
        mapping(uint64 => StoredProposal) proposals;
    }
}

#[public]
impl IntentRelay {
    /// One-time setup; replaces a constructor behind an upgradeable proxy.
    pub fn initialize(
        &mut self,
        owner: Address,
        proposal_fee: U256,
        execution_fee: U256,
    ) -> Result<(), RelayRevert> {
        let schedule = FeeSchedule {
            proposal_fee,
            execution_fee,
        };
        Ok(access::initialize(self, owner, schedule)?)
    }

    /// Stores a fee-paid proposal and returns its id. `msg.value` is the fee.
    #[payable]
    pub fn create(
        &mut self,
        script: Bytes,
        offchain_uri: String,
        linked_proposal: FixedBytes<32>,
    ) -> Result<u64, RelayRevert> {
        let proposer = self.vm().msg_sender();
        let fee_paid = self.vm().msg_value();
        Ok(proposals::create(
            self,
            proposer,
            script.as_slice(),
            offchain_uri,
            linked_proposal,
            fee_paid,
        )?)
    }

    /// Runs every intent of a proposal in one transaction. `msg.value` is the fee.
    #[payable]
    pub fn execute(&mut self, id: u64) -> Result<(), RelayRevert> {
        let fee_paid = self.vm().msg_value();
        Ok(proposals::execute(self, &mut OnchainSurface, id, fee_paid)?)
    }

    /// `(proposalFee, executionFee)`.
    pub fn get_fees(&self) -> (U256, U256) {
        let schedule = fees::fees(self);
        (schedule.proposal_fee, schedule.execution_fee)
    }

    pub fn set_proposal_fee(&mut self, amount: U256) -> Result<(), RelayRevert> {
        let caller = self.vm().msg_sender();
        Ok(fees::set_proposal_fee(self, caller, amount)?)
    }

    pub fn set_execution_fee(&mut self, amount: U256) -> Result<(), RelayRevert> {
        let caller = self.vm().msg_sender();
        Ok(fees::set_execution_fee(self, caller, amount)?)
    }

    pub fn withdraw(&mut self, to: Address, amount: U256) -> Result<(), RelayRevert> {
        let caller = self.vm().msg_sender();
        Ok(fees::withdraw(self, caller, to, amount)?)
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), RelayRevert> {
        let caller = self.vm().msg_sender();
        Ok(access::transfer_ownership(self, caller, new_owner)?)
    }

    pub fn pause(&mut self) -> Result<(), RelayRevert> {
        let caller = self.vm().msg_sender();
        Ok(access::pause(self, caller)?)
    }

    pub fn unpause(&mut self) -> Result<(), RelayRevert> {
        let caller = self.vm().msg_sender();
        Ok(access::unpause(self, caller)?)
    }

    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn balance(&self) -> U256 {
        self.balance.get()
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposal_count.get().to::<u64>()
    }

    /// `(proposer, script, offchainUri, linkedProposal, status, createdAt)`.
    pub fn get_proposal(
        &self,
        id: u64,
    ) -> Result<(Address, Bytes, String, FixedBytes<32>, u8, u64), RelayRevert> {
        let proposal = proposals::get(self, id).ok_or(RelayError::NotFound(id))?;
        Ok((
            proposal.proposer,
            proposal.script.into(),
            proposal.offchain_uri,
            proposal.linked_proposal.to_word(),
            proposal.status as u8,
            proposal.created_at,
        ))
    }
}

impl Transactional for IntentRelay {
    type Checkpoint = ();

    fn checkpoint(&mut self) -> Self::Checkpoint {}

    fn rollback(&mut self, _checkpoint: Self::Checkpoint) {}
}

impl RelayStorage for IntentRelay {
    fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    fn set_initialized(&mut self) {
        self.initialized.set(true);
    }

    fn owner(&self) -> Address {
        self.owner.get()
    }

    fn set_owner(&mut self, owner: Address) {
        self.owner.set(owner);
    }

    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused.set(paused);
    }

    fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            proposal_fee: self.proposal_fee.get(),
            execution_fee: self.execution_fee.get(),
        }
    }

    fn set_fee_schedule(&mut self, fees: FeeSchedule) {
        self.proposal_fee.set(fees.proposal_fee);
        self.execution_fee.set(fees.execution_fee);
    }

    fn balance(&self) -> U256 {
        self.balance.get()
    }

    fn set_balance(&mut self, balance: U256) {
        self.balance.set(balance);
    }

    fn proposal_count(&self) -> u64 {
        self.proposal_count.get().to::<u64>()
    }

    fn set_proposal_count(&mut self, count: u64) {
        self.proposal_count.set(U64::from(count));
    }

    fn proposal(&self, id: u64) -> Option<Proposal> {
        let entry = self.proposals.getter(U64::from(id));
        let status = ProposalStatus::try_from(entry.status.get().to::<u8>()).ok()?;
        let script = entry.script.get_bytes();
        // Only scripts that decoded at creation are ever stored.
        let intents = decode(&script).ok()?;
        Some(Proposal {
            id,
            proposer: entry.proposer.get(),
            script,
            intents,
            offchain_uri: entry.offchain_uri.get_string(),
            linked_proposal: LinkedProposal::from_word(entry.linked_proposal.get()),
            status,
            created_at: entry.created_at.get().to::<u64>(),
        })
    }

    fn insert_proposal(&mut self, proposal: Proposal) {
        let mut entry = self.proposals.setter(U64::from(proposal.id));
        entry.proposer.set(proposal.proposer);
        entry.script.set_bytes(&proposal.script);
        entry.offchain_uri.set_str(&proposal.offchain_uri);
        entry.linked_proposal.set(proposal.linked_proposal.to_word());
        entry.status.set(U8::from(proposal.status as u8));
        entry.created_at.set(U64::from(proposal.created_at));
    }

    fn set_proposal_status(&mut self, id: u64, status: ProposalStatus) {
        let mut entry = self.proposals.setter(U64::from(id));
        entry.status.set(U8::from(status as u8));
    }

    fn timestamp(&self) -> u64 {
        self.vm().block_timestamp()
    }

    fn emit(&mut self, event: RelayEvent) {
        match event {
            RelayEvent::ProposalCreated {
                id,
                proposer,
                offchain_uri,
                linked_proposal,
            } => log(
                self.vm(),
                ProposalCreated {
                    id,
                    proposer,
                    offchainUri: offchain_uri,
                    linkedProposal: linked_proposal.to_word(),
                },
            ),
            RelayEvent::ProposalExecuted { id } => log(self.vm(), ProposalExecuted { id }),
            RelayEvent::FeeUpdated {
                proposal_fee,
                execution_fee,
            } => log(
                self.vm(),
                FeeUpdated {
                    proposalFee: proposal_fee,
                    executionFee: execution_fee,
                },
            ),
            RelayEvent::Withdrawn { to, amount } => log(self.vm(), Withdrawn { to, amount }),
            RelayEvent::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => log(
                self.vm(),
                OwnershipTransferred {
                    previousOwner: previous_owner,
                    newOwner: new_owner,
                },
            ),
            RelayEvent::Paused { by } => log(self.vm(), Paused { by }),
            RelayEvent::Unpaused { by } => log(self.vm(), Unpaused { by }),
        }
    }

    fn pay_out(&mut self, to: Address, amount: U256) -> Result<(), InvokeError> {
        unsafe { RawCall::new_with_value(amount).call(to, &[]) }
            .map(|_| ())
            .map_err(InvokeError::Reverted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{funding_script, EXECUTION_FEE, OWNER, PROPOSAL_FEE, PROPOSER},
        types::NONE_SENTINEL,
    };
    use alloy_sol_types::SolEvent;
    use stylus_sdk::testing::*;

    const NOW: u64 = 1_700_000_000;

    fn deployed() -> (TestVM, IntentRelay) {
        let vm = TestVM::default();
        vm.set_block_timestamp(NOW);
        let mut relay = IntentRelay::from(&vm);

        vm.set_sender(OWNER);
        assert!(relay
            .initialize(OWNER, U256::from(PROPOSAL_FEE), U256::from(EXECUTION_FEE))
            .is_ok());
        (vm, relay)
    }

    #[test]
    fn test_create_persists_proposal() {
        let (vm, mut relay) = deployed();
        let script = funding_script();
        let linked = FixedBytes::<32>::repeat_byte(0x11);

        vm.set_sender(PROPOSER);
        vm.set_value(U256::from(PROPOSAL_FEE));
        let created = relay.create(script.clone().into(), String::from("ipfs://p1"), linked);
        assert!(matches!(created, Ok(1)));

        assert_eq!(relay.proposal_count(), 1);
        assert_eq!(relay.balance(), U256::from(PROPOSAL_FEE));

        let Ok((proposer, stored_script, uri, linked_word, status, created_at)) =
            relay.get_proposal(1)
        else {
            panic!("proposal 1 not stored");
        };
        assert_eq!(proposer, PROPOSER);
        assert_eq!(stored_script.as_slice(), script.as_slice());
        assert_eq!(uri, "ipfs://p1");
        assert_eq!(linked_word, linked);
        assert_eq!(status, ProposalStatus::Proposed as u8);
        assert_eq!(created_at, NOW);

        // The stored script decodes back to the same intents.
        let proposal = RelayStorage::proposal(&relay, 1).unwrap();
        assert_eq!(proposal.intents, decode(&script).unwrap());
        assert_eq!(proposal.linked_proposal, LinkedProposal::Linked(linked));
    }

    #[test]
    fn test_unused_id_is_not_found() {
        let (_vm, relay) = deployed();
        assert!(RelayStorage::proposal(&relay, 2).is_none());
        assert!(matches!(
            relay.get_proposal(2),
            Err(RelayRevert::ProposalNotFound(ProposalNotFound { id: 2 }))
        ));
    }

    #[test]
    fn test_status_and_sentinel_round_trip_through_storage() {
        let (vm, mut relay) = deployed();
        vm.set_sender(PROPOSER);
        vm.set_value(U256::from(PROPOSAL_FEE));
        assert!(relay
            .create(funding_script().into(), String::new(), NONE_SENTINEL)
            .is_ok());

        let proposal = RelayStorage::proposal(&relay, 1).unwrap();
        assert_eq!(proposal.linked_proposal, LinkedProposal::None);

        for status in [ProposalStatus::Executing, ProposalStatus::Executed] {
            relay.set_proposal_status(1, status);
            assert_eq!(RelayStorage::proposal(&relay, 1).map(|p| p.status), Some(status));
        }
    }

    #[test]
    fn test_create_without_fee_reverts() {
        let (vm, mut relay) = deployed();
        vm.set_sender(PROPOSER);
        vm.set_value(U256::from(PROPOSAL_FEE - 1));
        let created = relay.create(funding_script().into(), String::new(), NONE_SENTINEL);
        assert!(matches!(created, Err(RelayRevert::InsufficientFee(_))));
        assert_eq!(relay.proposal_count(), 0);
        assert_eq!(relay.balance(), U256::ZERO);
    }

    #[test]
    fn test_transitions_are_logged() {
        let (vm, mut relay) = deployed();
        vm.set_sender(PROPOSER);
        vm.set_value(U256::from(PROPOSAL_FEE));
        assert!(relay
            .create(funding_script().into(), String::new(), NONE_SENTINEL)
            .is_ok());

        let topics: Vec<_> = vm
            .get_emitted_logs()
            .iter()
            .map(|(topics, _data)| topics[0])
            .collect();
        assert_eq!(
            topics,
            vec![
                OwnershipTransferred::SIGNATURE_HASH,
                FeeUpdated::SIGNATURE_HASH,
                ProposalCreated::SIGNATURE_HASH,
            ]
        );
    }

    #[test]
    fn test_owner_accessors() {
        let (vm, mut relay) = deployed();
        assert_eq!(relay.owner(), OWNER);
        assert_eq!(relay.get_fees(), (U256::from(PROPOSAL_FEE), U256::from(EXECUTION_FEE)));

        vm.set_sender(PROPOSER);
        assert!(matches!(
            relay.pause(),
            Err(RelayRevert::Unauthorized(Unauthorized { caller })) if caller == PROPOSER
        ));
        vm.set_sender(OWNER);
        assert!(relay.pause().is_ok());
        assert!(relay.is_paused());
    }

    #[test]
    fn test_relay_error_maps_to_solidity_error() {
        let revert = RelayRevert::from(RelayError::InvalidScript(DecodeError::UnknownOpcode(0xff)));
        assert!(matches!(
            revert,
            RelayRevert::InvalidScript(InvalidScript {
                reason: 2,
                opcode: 0xff
            })
        ));

        let revert = RelayRevert::from(RelayError::IntentFailed {
            index: 3,
            cause: InvokeError::Reverted(vec![0xde, 0xad]),
        });
        match revert {
            RelayRevert::IntentFailed(err) => {
                assert_eq!(err.index, U256::from(3u64));
                assert_eq!(err.returnData.to_vec(), vec![0xde, 0xad]);
            }
            _ => panic!("unexpected revert"),
        }

        assert!(matches!(
            RelayRevert::from(RelayError::Paused),
            RelayRevert::EnforcedPause(_)
        ));
    }

    #[test]
    fn test_decode_error_codes_are_distinct() {
        let codes = [
            DecodeError::Truncated,
            DecodeError::UnknownOpcode(0),
            DecodeError::TooLarge,
            DecodeError::TrailingBytes,
            DecodeError::StackUnderflow,
            DecodeError::ExpectedArray,
            DecodeError::InvalidMethod,
            DecodeError::UnbalancedStack,
            DecodeError::InvalidTarget,
        ]
        .map(|err| decode_error_code(err).0);
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
