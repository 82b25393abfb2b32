use crate as pallet_bookkeeper;
use crate::{
  ActionExecutor, AssertionOracle, AssertionTerms, CollateralOps, ContractInspect, Finder,
  TransactionsOf, Whitelists,
};
use frame::prelude::*;
use polkadot_sdk::{
  frame_support::{
    PalletId, construct_runtime,
    storage::unhashed,
    traits::{ConstU32, ConstU64, Get, UnixTime},
  },
  frame_system::EnsureRoot,
  sp_core::H256,
  sp_runtime::{
    BuildStorage,
    traits::{BlakeTwo256, Hash as HashT, IdentityLookup},
  },
};
use primitives::{
  CallKind, Identifier, Payload, ServiceKey, Transaction, pallet_ids::BOOKKEEPER_PALLET_ID,
  params::ASSERT_TRUTH_IDENTIFIER,
};

use alloc::{
  collections::{BTreeMap, BTreeSet},
  vec,
};
use core::cell::RefCell;

type Block = polkadot_sdk::frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;
pub type Balance = u128;
pub type AssetId = u32;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const CHARLIE: AccountId = 3;
/// Plain account used as a value-transfer target.
pub const ADDR4: AccountId = 4;
pub const PEER: AccountId = 50;

pub const ORACLE: AccountId = 100;
pub const NEW_ORACLE: AccountId = 101;
pub const COLLATERAL_WHITELIST: AccountId = 102;
pub const IDENTIFIER_WHITELIST: AccountId = 103;
pub const TARGET_CONTRACT: AccountId = 200;
pub const ESCALATION_MANAGER: AccountId = 201;

pub const COLLATERAL: AssetId = 7;
pub const OTHER_COLLATERAL: AssetId = 8;
pub const UNLISTED_COLLATERAL: AssetId = 9;

pub const BOND: Balance = 1_000;
pub const INITIAL_COLLATERAL: Balance = 100_000;
pub const LIVENESS: u64 = 7_200;
pub const SEGMENT: u32 = 1;
pub const RULES: &[u8] = b"Execute only transactions approved by the signers";
pub const GENESIS_TIME_SECS: u64 = 1_700_000_000;

construct_runtime!(
  pub enum Test {
    System: polkadot_sdk::frame_system,
    Timestamp: polkadot_sdk::pallet_timestamp,
    Bookkeeper: pallet_bookkeeper,
  }
);

impl polkadot_sdk::frame_system::Config for Test {
  type BaseCallFilter = polkadot_sdk::frame_support::traits::Everything;
  type BlockWeights = ();
  type BlockLength = ();
  type DbWeight = ();
  type RuntimeOrigin = RuntimeOrigin;
  type RuntimeCall = RuntimeCall;
  type Nonce = u64;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Block = Block;
  type RuntimeEvent = RuntimeEvent;
  type BlockHashCount = ConstU64<250>;
  type Version = ();
  type PalletInfo = PalletInfo;
  type AccountData = ();
  type OnNewAccount = ();
  type OnKilledAccount = ();
  type SystemWeightInfo = ();
  type SS58Prefix = ();
  type OnSetCode = ();
  type MaxConsumers = ConstU32<16>;
  type RuntimeTask = ();
  type ExtensionsWeightInfo = ();
  type SingleBlockMigrations = ();
  type MultiBlockMigrator = ();
  type PreInherents = ();
  type PostInherents = ();
  type PostTransactions = ();
}

impl polkadot_sdk::pallet_timestamp::Config for Test {
  type Moment = u64;
  type OnTimestampSet = ();
  type MinimumPeriod = ConstU64<1>;
  type WeightInfo = ();
}

pub struct BookkeeperPalletId;
impl Get<PalletId> for BookkeeperPalletId {
  fn get() -> PalletId {
    PalletId(*BOOKKEEPER_PALLET_ID)
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct MockAssertion {
  pub oracle: AccountId,
  pub asserter: AccountId,
  pub claim: Vec<u8>,
  pub escalation_manager: Option<AccountId>,
  pub identifier: Identifier,
  pub asserted_at: u64,
  pub liveness: u64,
  pub bond: Balance,
  pub disputed: bool,
  pub settled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedAction {
  pub to: AccountId,
  pub value: Balance,
  pub data: Vec<u8>,
  pub operation: CallKind,
}

/// Call a collaborator makes back into the pallet while the vault is talking to it.
#[derive(Clone, Debug)]
pub enum Reentry {
  Sync,
  Execute(TransactionsOf<Test>),
  Propose(TransactionsOf<Test>),
  DeleteOnUpgrade(H256),
}

// Ledger and assertions live in storage so a rolled back call also rolls
// back whatever the collaborators did on its behalf.
const BALANCE_PREFIX: &[u8] = b"mock:balance";
const ALLOWANCE_PREFIX: &[u8] = b"mock:allowance";
const ASSERTION_PREFIX: &[u8] = b"mock:assertion";

thread_local! {
  static CONTRACTS: RefCell<BTreeSet<AccountId>> = RefCell::new(BTreeSet::new());
  static SERVICES: RefCell<BTreeMap<ServiceKey, AccountId>> = RefCell::new(BTreeMap::new());
  static WHITELISTED_COLLATERAL: RefCell<BTreeSet<AssetId>> = RefCell::new(BTreeSet::new());
  static SUPPORTED_IDENTIFIERS: RefCell<BTreeSet<Identifier>> = RefCell::new(BTreeSet::new());
  static MINIMUM_BOND: RefCell<Balance> = RefCell::new(0);
  static REJECT_ASSERTIONS: RefCell<bool> = RefCell::new(false);
  static ASSERT_REENTRY: RefCell<Option<Reentry>> = RefCell::new(None);
  static ASSERTION_NONCE: RefCell<u64> = RefCell::new(0);
  static EXECUTED: RefCell<Vec<ExecutedAction>> = RefCell::new(Vec::new());
  static FAILING_TARGETS: RefCell<BTreeSet<AccountId>> = RefCell::new(BTreeSet::new());
  static REENTRY: RefCell<Option<Reentry>> = RefCell::new(None);
  static REENTRY_RESULT: RefCell<Option<DispatchResult>> = RefCell::new(None);
}

pub fn reset_mock_collaborators() {
  CONTRACTS.with(|c| {
    let mut contracts = c.borrow_mut();
    contracts.clear();
    contracts.extend([
      ORACLE,
      NEW_ORACLE,
      COLLATERAL_WHITELIST,
      IDENTIFIER_WHITELIST,
      TARGET_CONTRACT,
      ESCALATION_MANAGER,
    ]);
  });
  SERVICES.with(|s| {
    let mut services = s.borrow_mut();
    services.clear();
    services.insert(ServiceKey::OptimisticOracleV3, ORACLE);
    services.insert(ServiceKey::CollateralWhitelist, COLLATERAL_WHITELIST);
    services.insert(ServiceKey::IdentifierWhitelist, IDENTIFIER_WHITELIST);
  });
  WHITELISTED_COLLATERAL.with(|w| {
    let mut listed = w.borrow_mut();
    listed.clear();
    listed.extend([COLLATERAL, OTHER_COLLATERAL]);
  });
  SUPPORTED_IDENTIFIERS.with(|s| {
    let mut supported = s.borrow_mut();
    supported.clear();
    supported.insert(ASSERT_TRUTH_IDENTIFIER);
  });
  MINIMUM_BOND.with(|m| *m.borrow_mut() = 0);
  REJECT_ASSERTIONS.with(|r| *r.borrow_mut() = false);
  ASSERT_REENTRY.with(|r| *r.borrow_mut() = None);
  ASSERTION_NONCE.with(|n| *n.borrow_mut() = 0);
  EXECUTED.with(|e| e.borrow_mut().clear());
  FAILING_TARGETS.with(|f| f.borrow_mut().clear());
  REENTRY.with(|r| *r.borrow_mut() = None);
  REENTRY_RESULT.with(|r| *r.borrow_mut() = None);
}

pub fn set_balance(who: AccountId, asset: AssetId, amount: Balance) {
  unhashed::put(&(BALANCE_PREFIX, who, asset).encode(), &amount);
}

pub fn balance_of(who: AccountId, asset: AssetId) -> Balance {
  unhashed::get_or_default(&(BALANCE_PREFIX, who, asset).encode())
}

fn set_allowance(owner: AccountId, spender: AccountId, asset: AssetId, amount: Balance) {
  unhashed::put(&(ALLOWANCE_PREFIX, owner, spender, asset).encode(), &amount);
}

pub fn allowance(owner: AccountId, spender: AccountId, asset: AssetId) -> Balance {
  unhashed::get_or_default(&(ALLOWANCE_PREFIX, owner, spender, asset).encode())
}

fn store_assertion(assertion_id: H256, record: &MockAssertion) {
  unhashed::put(&(ASSERTION_PREFIX, assertion_id).encode(), record);
}

pub fn set_minimum_bond(amount: Balance) {
  MINIMUM_BOND.with(|m| *m.borrow_mut() = amount);
}

pub fn publish_service(key: ServiceKey, endpoint: AccountId) {
  SERVICES.with(|s| {
    s.borrow_mut().insert(key, endpoint);
  });
}

pub fn unpublish_service(key: ServiceKey) {
  SERVICES.with(|s| {
    s.borrow_mut().remove(&key);
  });
}

pub fn support_identifier(identifier: Identifier) {
  SUPPORTED_IDENTIFIERS.with(|s| {
    s.borrow_mut().insert(identifier);
  });
}

pub fn fail_target(target: AccountId) {
  FAILING_TARGETS.with(|f| {
    f.borrow_mut().insert(target);
  });
}

pub fn recover_target(target: AccountId) {
  FAILING_TARGETS.with(|f| {
    f.borrow_mut().remove(&target);
  });
}

pub fn reenter_on_execute(action: Reentry) {
  REENTRY.with(|r| *r.borrow_mut() = Some(action));
}

pub fn reenter_on_assert(action: Reentry) {
  ASSERT_REENTRY.with(|r| *r.borrow_mut() = Some(action));
}

/// Oracle takes the bond, then refuses the assertion.
pub fn reject_assertions(reject: bool) {
  REJECT_ASSERTIONS.with(|r| *r.borrow_mut() = reject);
}

fn reenter(action: Reentry) {
  let result = match action {
    Reentry::Sync => Bookkeeper::sync(RuntimeOrigin::signed(ALICE)),
    Reentry::Execute(transactions) => {
      Bookkeeper::execute_proposal(RuntimeOrigin::signed(ALICE), transactions)
    }
    Reentry::Propose(transactions) => Bookkeeper::propose_transactions(
      RuntimeOrigin::signed(BOB),
      transactions,
      BoundedVec::truncate_from(b"reentrant".to_vec()),
    ),
    Reentry::DeleteOnUpgrade(proposal_hash) => {
      Bookkeeper::delete_proposal_on_upgrade(RuntimeOrigin::signed(BOB), proposal_hash)
    }
  };
  REENTRY_RESULT.with(|r| *r.borrow_mut() = Some(result));
}

pub fn reentry_result() -> Option<DispatchResult> {
  REENTRY_RESULT.with(|r| r.borrow().clone())
}

pub fn executed_actions() -> Vec<ExecutedAction> {
  EXECUTED.with(|e| e.borrow().clone())
}

pub fn assertion(assertion_id: H256) -> Option<MockAssertion> {
  unhashed::get(&(ASSERTION_PREFIX, assertion_id).encode())
}

pub fn now_secs() -> u64 {
  <Timestamp as UnixTime>::now().as_secs()
}

pub fn advance_time(secs: u64) {
  let now = polkadot_sdk::pallet_timestamp::Now::<Test>::get();
  Timestamp::set_timestamp(now + secs * 1_000);
}

/// Oracle marks the assertion disputed and notifies its callback recipient.
pub fn dispute(assertion_id: H256) -> DispatchResult {
  let mut record = assertion(assertion_id).expect("disputing an unknown assertion");
  record.disputed = true;
  store_assertion(assertion_id, &record);
  Bookkeeper::assertion_disputed_callback(RuntimeOrigin::signed(record.oracle), assertion_id)
}

fn move_balance(
  from: AccountId,
  to: AccountId,
  asset: AssetId,
  amount: Balance,
) -> Result<(), DispatchError> {
  let from_balance = balance_of(from, asset);
  if from_balance < amount {
    return Err(DispatchError::Other("InsufficientBalance"));
  }
  set_balance(from, asset, from_balance - amount);
  set_balance(to, asset, balance_of(to, asset) + amount);
  Ok(())
}

pub struct MockCollateral;
impl CollateralOps<AccountId, AssetId, Balance> for MockCollateral {
  fn transfer(
    from: &AccountId,
    to: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), DispatchError> {
    move_balance(*from, *to, asset, amount)
  }

  fn approve(
    owner: &AccountId,
    spender: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), DispatchError> {
    set_allowance(*owner, *spender, asset, amount);
    Ok(())
  }
}

pub struct MockOracle;
impl AssertionOracle<AccountId, AssetId, Balance, H256> for MockOracle {
  fn assert_truth(
    oracle: &AccountId,
    claim: &[u8],
    terms: AssertionTerms<AccountId, AssetId, Balance>,
  ) -> Result<H256, DispatchError> {
    // Pull the bond through the allowance, as a token-based oracle would.
    let payer = terms.callback_recipient;
    let approved = allowance(payer, *oracle, terms.collateral);
    if approved < terms.bond {
      return Err(DispatchError::Other("InsufficientAllowance"));
    }
    set_allowance(payer, *oracle, terms.collateral, approved - terms.bond);
    move_balance(payer, *oracle, terms.collateral, terms.bond)?;

    if let Some(action) = ASSERT_REENTRY.with(|r| r.borrow_mut().take()) {
      reenter(action);
    }
    if REJECT_ASSERTIONS.with(|r| *r.borrow()) {
      return Err(DispatchError::Other("AssertionRejected"));
    }

    let nonce = ASSERTION_NONCE.with(|n| {
      let mut nonce = n.borrow_mut();
      *nonce += 1;
      *nonce
    });
    let assertion_id = BlakeTwo256::hash_of(&(*oracle, nonce));
    let record = MockAssertion {
      oracle: *oracle,
      asserter: terms.asserter,
      claim: claim.to_vec(),
      escalation_manager: terms.escalation_manager,
      identifier: terms.identifier,
      asserted_at: now_secs(),
      liveness: terms.liveness,
      bond: terms.bond,
      disputed: false,
      settled: false,
    };
    store_assertion(assertion_id, &record);
    Ok(assertion_id)
  }

  fn assertion_asserter(oracle: &AccountId, assertion_id: &H256) -> Option<AccountId> {
    assertion(*assertion_id)
      .filter(|record| record.oracle == *oracle)
      .map(|record| record.asserter)
  }

  fn minimum_bond(_oracle: &AccountId, _collateral: AssetId) -> Balance {
    MINIMUM_BOND.with(|m| *m.borrow())
  }

  fn settle_and_get_assertion_result(
    oracle: &AccountId,
    assertion_id: &H256,
  ) -> Result<bool, DispatchError> {
    let mut record = assertion(*assertion_id)
      .filter(|record| record.oracle == *oracle)
      .ok_or(DispatchError::Other("AssertionNotFound"))?;
    if record.disputed {
      return Err(DispatchError::Other("AssertionNotResolved"));
    }
    if now_secs() < record.asserted_at + record.liveness {
      return Err(DispatchError::Other("AssertionNotExpired"));
    }
    if !record.settled {
      record.settled = true;
      store_assertion(*assertion_id, &record);
      move_balance(*oracle, record.asserter, COLLATERAL, record.bond)?;
    }
    Ok(true)
  }
}

pub struct MockFinder;
impl Finder<AccountId> for MockFinder {
  fn implementation_address(key: ServiceKey) -> Option<AccountId> {
    SERVICES.with(|s| s.borrow().get(&key).copied())
  }
}

pub struct MockWhitelists;
impl Whitelists<AccountId, AssetId> for MockWhitelists {
  fn is_on_whitelist(whitelist: &AccountId, collateral: AssetId) -> bool {
    *whitelist == COLLATERAL_WHITELIST
      && WHITELISTED_COLLATERAL.with(|w| w.borrow().contains(&collateral))
  }

  fn is_identifier_supported(whitelist: &AccountId, identifier: &Identifier) -> bool {
    *whitelist == IDENTIFIER_WHITELIST
      && SUPPORTED_IDENTIFIERS.with(|s| s.borrow().contains(identifier))
  }
}

pub struct MockContracts;
impl ContractInspect<AccountId> for MockContracts {
  fn is_contract(who: &AccountId) -> bool {
    CONTRACTS.with(|c| c.borrow().contains(who))
  }
}

pub struct MockExecutor;
impl ActionExecutor<AccountId, Balance> for MockExecutor {
  fn execute(
    _vault: &AccountId,
    to: &AccountId,
    value: Balance,
    data: &[u8],
    operation: CallKind,
  ) -> bool {
    if let Some(action) = REENTRY.with(|r| r.borrow_mut().take()) {
      reenter(action);
    }
    if FAILING_TARGETS.with(|f| f.borrow().contains(to)) {
      return false;
    }
    EXECUTED.with(|e| {
      e.borrow_mut().push(ExecutedAction {
        to: *to,
        value,
        data: data.to_vec(),
        operation,
      });
    });
    true
  }
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;
#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<AccountId, AssetId, Balance> for MockBenchmarkHelper {
  fn collateral() -> AssetId {
    COLLATERAL
  }

  fn fund(who: &AccountId, asset: AssetId, amount: Balance) {
    set_balance(*who, asset, amount);
  }

  fn contract() -> AccountId {
    TARGET_CONTRACT
  }

  fn elapse_liveness() {
    advance_time(LIVENESS + 1);
  }

  fn rotate_oracle() {
    let next = if Bookkeeper::cached_oracle() == Some(NEW_ORACLE) {
      ORACLE
    } else {
      NEW_ORACLE
    };
    publish_service(ServiceKey::OptimisticOracleV3, next);
  }
}

impl pallet_bookkeeper::Config for Test {
  type AssetId = AssetId;
  type Balance = Balance;
  type OwnerOrigin = EnsureRoot<AccountId>;
  type Oracle = MockOracle;
  type Finder = MockFinder;
  type Whitelists = MockWhitelists;
  type Collateral = MockCollateral;
  type Contracts = MockContracts;
  type Executor = MockExecutor;
  type UnixTime = Timestamp;
  type PalletId = BookkeeperPalletId;
  type MaxTransactions = ConstU32<16>;
  type MaxRulesLength = ConstU32<256>;
  type MaxExplanationLength = ConstU32<256>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

pub fn tx(to: AccountId, value: Balance, data: &[u8]) -> Transaction<AccountId, Balance> {
  Transaction {
    to,
    operation: CallKind::Call,
    value,
    data: Payload::truncate_from(data.to_vec()),
  }
}

pub fn txs(list: Vec<Transaction<AccountId, Balance>>) -> TransactionsOf<Test> {
  list.try_into().expect("too many transactions")
}

pub fn default_genesis() -> pallet_bookkeeper::GenesisConfig<Test> {
  pallet_bookkeeper::GenesisConfig::<Test> {
    collateral: Some(COLLATERAL),
    bond: BOND,
    rules: RULES.to_vec(),
    identifier: ASSERT_TRUTH_IDENTIFIER,
    liveness: LIVENESS,
    escalation_manager: None,
    bookkeepers: vec![(PEER, SEGMENT)],
  }
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  test_ext_with(default_genesis())
}

pub fn test_ext_with(
  genesis: pallet_bookkeeper::GenesisConfig<Test>,
) -> polkadot_sdk::sp_io::TestExternalities {
  reset_mock_collaborators();

  let mut t = polkadot_sdk::frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  genesis.assimilate_storage(&mut t).unwrap();

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| {
    System::set_block_number(1);
    Timestamp::set_timestamp(GENESIS_TIME_SECS * 1_000);
    set_balance(ALICE, COLLATERAL, INITIAL_COLLATERAL);
    set_balance(BOB, COLLATERAL, INITIAL_COLLATERAL);
  });
  ext
}
