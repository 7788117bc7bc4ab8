//! In-memory host and mock invocation surfaces for unit tests.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use stylus_sdk::alloy_primitives::{Address, U256};

use crate::{
    access,
    errors::{InvokeError, RelayError},
    events::RelayEvent,
    proposals,
    storage::RelayStorage,
    types::{
        codec::encode,
        invocation::{InvocationSurface, Transactional},
        opcodes::{Intent, Value},
        FeeSchedule, Proposal, ProposalStatus, NONE_SENTINEL,
    },
};

pub const OWNER: Address = Address::repeat_byte(0x01);
pub const PROPOSER: Address = Address::repeat_byte(0x02);
pub const STRANGER: Address = Address::repeat_byte(0x03);
pub const TREASURY: Address = Address::repeat_byte(0xa1);
pub const BRIDGE: Address = Address::repeat_byte(0xb2);

pub const PROPOSAL_FEE: u64 = 100;
pub const EXECUTION_FEE: u64 = 40;

/// `RelayStorage` kept in plain maps; a checkpoint is a full clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    pub initialized: bool,
    pub owner: Address,
    pub paused: bool,
    pub fees: FeeSchedule,
    pub balance: U256,
    pub proposal_count: u64,
    pub proposals: BTreeMap<u64, Proposal>,
    pub now: u64,
    pub events: Vec<RelayEvent>,
    pub payouts: Vec<(Address, U256)>,
    pub refuse_payouts: bool,
}

impl MemoryStorage {
    /// Storage initialized with `OWNER` and the test fee schedule.
    pub fn initialized() -> Self {
        let mut storage = MemoryStorage {
            now: 1_700_000_000,
            ..Default::default()
        };
        let fees = FeeSchedule {
            proposal_fee: U256::from(PROPOSAL_FEE),
            execution_fee: U256::from(EXECUTION_FEE),
        };
        access::initialize(&mut storage, OWNER, fees).unwrap();
        storage.events.clear();
        storage
    }

    pub fn status(&self, id: u64) -> Option<ProposalStatus> {
        self.proposals.get(&id).map(|p| p.status)
    }
}

impl Transactional for MemoryStorage {
    type Checkpoint = MemoryStorage;

    fn checkpoint(&mut self) -> Self::Checkpoint {
        self.clone()
    }

    fn rollback(&mut self, checkpoint: Self::Checkpoint) {
        *self = checkpoint;
    }
}

impl RelayStorage for MemoryStorage {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn set_initialized(&mut self) {
        self.initialized = true;
    }

    fn owner(&self) -> Address {
        self.owner
    }

    fn set_owner(&mut self, owner: Address) {
        self.owner = owner;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn fee_schedule(&self) -> FeeSchedule {
        self.fees
    }

    fn set_fee_schedule(&mut self, fees: FeeSchedule) {
        self.fees = fees;
    }

    fn balance(&self) -> U256 {
        self.balance
    }

    fn set_balance(&mut self, balance: U256) {
        self.balance = balance;
    }

    fn proposal_count(&self) -> u64 {
        self.proposal_count
    }

    fn set_proposal_count(&mut self, count: u64) {
        self.proposal_count = count;
    }

    fn proposal(&self, id: u64) -> Option<Proposal> {
        self.proposals.get(&id).cloned()
    }

    fn insert_proposal(&mut self, proposal: Proposal) {
        self.proposals.insert(proposal.id, proposal);
    }

    fn set_proposal_status(&mut self, id: u64, status: ProposalStatus) {
        if let Some(proposal) = self.proposals.get_mut(&id) {
            proposal.status = status;
        }
    }

    fn timestamp(&self) -> u64 {
        self.now
    }

    fn emit(&mut self, event: RelayEvent) {
        self.events.push(event);
    }

    fn pay_out(&mut self, to: Address, amount: U256) -> Result<(), InvokeError> {
        if self.refuse_payouts {
            return Err(InvokeError::Rejected);
        }
        self.payouts.push((to, amount));
        Ok(())
    }
}

/// Records every successful invocation as an observable effect.
///
/// Methods named `revert...` fail with `InvokeError::Reverted`.
#[derive(Clone, Debug, Default)]
pub struct LedgerSurface {
    pub effects: Vec<(Address, String, Vec<Value>)>,
}

impl LedgerSurface {
    pub fn methods(&self) -> Vec<&str> {
        self.effects.iter().map(|(_, method, _)| method.as_str()).collect()
    }
}

impl<C> InvocationSurface<C> for LedgerSurface {
    fn invoke(
        &mut self,
        _ctx: &mut C,
        target: Address,
        method: &str,
        args: &[Value],
    ) -> Result<Vec<u8>, InvokeError> {
        if method.starts_with("revert") {
            return Err(InvokeError::Reverted(b"boom".to_vec()));
        }
        self.effects.push((target, String::from(method), args.to_vec()));
        Ok(Vec::new())
    }
}

impl Transactional for LedgerSurface {
    type Checkpoint = usize;

    fn checkpoint(&mut self) -> Self::Checkpoint {
        self.effects.len()
    }

    fn rollback(&mut self, checkpoint: Self::Checkpoint) {
        self.effects.truncate(checkpoint);
    }
}

/// What a `reenter` intent calls back into.
#[derive(Clone, Debug)]
pub enum Reentry {
    Execute { id: u64, fee: U256 },
    Create { script: Vec<u8>, fee: U256 },
}

/// Surface whose `reenter` method calls back into the relay mid-flight.
///
/// With `propagate` set, a failed nested call makes the intent itself fail.
#[derive(Clone, Debug)]
pub struct ReentrantSurface {
    pub ledger: LedgerSurface,
    pub reentry: Reentry,
    pub propagate: bool,
    pub nested_results: Vec<Result<u64, RelayError>>,
}

impl ReentrantSurface {
    pub fn new(reentry: Reentry, propagate: bool) -> Self {
        Self {
            ledger: LedgerSurface::default(),
            reentry,
            propagate,
            nested_results: Vec::new(),
        }
    }
}

impl InvocationSurface<MemoryStorage> for ReentrantSurface {
    fn invoke(
        &mut self,
        ctx: &mut MemoryStorage,
        target: Address,
        method: &str,
        args: &[Value],
    ) -> Result<Vec<u8>, InvokeError> {
        if method != "reenter" {
            return self.ledger.invoke(ctx, target, method, args);
        }
        let result = match self.reentry.clone() {
            Reentry::Execute { id, fee } => proposals::execute(ctx, self, id, fee).map(|_| id),
            Reentry::Create { script, fee } => proposals::create(
                ctx,
                target,
                &script,
                String::from("nested"),
                NONE_SENTINEL,
                fee,
            ),
        };
        self.nested_results.push(result.clone());
        match result {
            Err(_) if self.propagate => Err(InvokeError::Reverted(b"nested call failed".to_vec())),
            _ => Ok(Vec::new()),
        }
    }
}

impl Transactional for ReentrantSurface {
    type Checkpoint = usize;

    fn checkpoint(&mut self) -> Self::Checkpoint {
        self.ledger.checkpoint()
    }

    fn rollback(&mut self, checkpoint: Self::Checkpoint) {
        self.ledger.rollback(checkpoint);
    }
}

pub fn script_of(intents: &[Intent]) -> Vec<u8> {
    encode(intents).unwrap()
}

/// Two plain invocations, the shape of a typical funding proposal.
pub fn funding_script() -> Vec<u8> {
    script_of(&[
        Intent::invoke(TREASURY, "releaseTokens(address,uint256)", vec![Value::Bytes(vec![0x2a])]),
        Intent::invoke(BRIDGE, "bridge(address,address,uint256)", vec![]),
    ])
}
