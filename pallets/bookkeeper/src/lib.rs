//! Optimistic Bookkeeper Pallet
//!
//! Custodial vault that executes a batch of actions only after an optimistic
//! oracle assertion about that exact batch survived its challenge window.
//!
//! Lifecycle of a proposal, keyed by the hash of its transaction list:
//!
//! - `propose_transactions` escrows the bond, asserts a claim at the cached
//!   oracle endpoint and records `proposal_hash <-> assertion_id`.
//! - `assertion_disputed_callback` from the cached oracle drops the entry.
//! - `delete_proposal_on_upgrade` drops an entry whose assertion the cached
//!   oracle no longer knows (endpoint rotated).
//! - `execute_proposal` consumes the entry, settles the assertion and replays
//!   every action through the executor, all or nothing.
//!
//! Only the hash is stored, so executing requires resubmitting the identical
//! transaction list.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub use adapters::{
  ActionExecutor, AssertionOracle, AssertionTerms, CollateralOps, ContractInspect, Finder,
  Whitelists,
};

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "runtime::bookkeeper";

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId, AssetId, Balance> {
  /// Whitelisted collateral, with oracle and whitelists published by the finder.
  fn collateral() -> AssetId;
  fn fund(who: &AccountId, asset: AssetId, amount: Balance);
  /// An account `ContractInspect` reports as a contract.
  fn contract() -> AccountId;
  /// Moves time past every pending challenge window.
  fn elapse_liveness();
  /// Makes the finder publish a fresh oracle endpoint.
  fn rotate_oracle();
}

#[frame::pallet]
pub mod pallet {
  use super::{
    ActionExecutor, AssertionOracle, AssertionTerms, CollateralOps, ContractInspect, Finder,
    LOG_TARGET, WeightInfo, Whitelists,
  };
  use alloc::vec::Vec;
  use frame::prelude::*;
  use polkadot_sdk::{
    frame_support::{
      PalletId,
      storage::with_storage_layer,
      traits::{EnsureOrigin, UnixTime},
    },
    sp_runtime::traits::{AccountIdConversion, Hash as HashT},
  };
  use primitives::{
    Identifier, ServiceKey, Transaction, construct_claim, is_zero_account,
    params::MAX_LIVENESS_SECS,
  };

  #[derive(Decode, Encode, TypeInfo, MaxEncodedLen)]
  #[scale_info(skip_type_params(RulesLimit))]
  pub struct VaultSettings<AccountId, AssetId, Balance, RulesLimit: Get<u32>> {
    pub collateral: AssetId,
    pub bond: Balance,
    pub rules: BoundedVec<u8, RulesLimit>,
    pub identifier: Identifier,
    /// Challenge window in seconds
    pub liveness: u64,
    pub escalation_manager: Option<AccountId>,
  }

  impl<AccountId: Clone, AssetId: Clone, Balance: Clone, RulesLimit: Get<u32>> Clone
    for VaultSettings<AccountId, AssetId, Balance, RulesLimit>
  {
    fn clone(&self) -> Self {
      Self {
        collateral: self.collateral.clone(),
        bond: self.bond.clone(),
        rules: self.rules.clone(),
        identifier: self.identifier,
        liveness: self.liveness,
        escalation_manager: self.escalation_manager.clone(),
      }
    }
  }

  impl<
    AccountId: core::fmt::Debug,
    AssetId: core::fmt::Debug,
    Balance: core::fmt::Debug,
    RulesLimit: Get<u32>,
  > core::fmt::Debug for VaultSettings<AccountId, AssetId, Balance, RulesLimit>
  {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
      f.debug_struct("VaultSettings")
        .field("collateral", &self.collateral)
        .field("bond", &self.bond)
        .field("rules", &self.rules)
        .field("identifier", &self.identifier)
        .field("liveness", &self.liveness)
        .field("escalation_manager", &self.escalation_manager)
        .finish()
    }
  }

  impl<AccountId: PartialEq, AssetId: PartialEq, Balance: PartialEq, RulesLimit: Get<u32>>
    PartialEq for VaultSettings<AccountId, AssetId, Balance, RulesLimit>
  {
    fn eq(&self, other: &Self) -> bool {
      self.collateral == other.collateral
        && self.bond == other.bond
        && self.rules == other.rules
        && self.identifier == other.identifier
        && self.liveness == other.liveness
        && self.escalation_manager == other.escalation_manager
    }
  }

  impl<AccountId: Eq, AssetId: Eq, Balance: Eq, RulesLimit: Get<u32>> Eq
    for VaultSettings<AccountId, AssetId, Balance, RulesLimit>
  {
  }

  /// Why a ledger entry was removed without execution.
  #[derive(
    Clone,
    Copy,
    Debug,
    Decode,
    DecodeWithMemTracking,
    Encode,
    Eq,
    PartialEq,
    TypeInfo,
    MaxEncodedLen,
  )]
  pub enum DeletionReason {
    Disputed,
    OracleUpgraded,
  }

  #[pallet::config]
  pub trait Config: frame_system::Config {
    type AssetId: Parameter + Member + Copy + MaybeSerializeDeserialize + MaxEncodedLen;

    type Balance: Parameter
      + Member
      + AtLeast32BitUnsigned
      + Default
      + Copy
      + MaybeSerializeDeserialize
      + MaxEncodedLen;

    /// Owner of the vault configuration and the bookkeeper registry
    type OwnerOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    type Oracle: AssertionOracle<Self::AccountId, Self::AssetId, Self::Balance, Self::Hash>;
    type Finder: Finder<Self::AccountId>;
    type Whitelists: Whitelists<Self::AccountId, Self::AssetId>;
    type Collateral: CollateralOps<Self::AccountId, Self::AssetId, Self::Balance>;
    type Contracts: ContractInspect<Self::AccountId>;
    type Executor: ActionExecutor<Self::AccountId, Self::Balance>;

    type UnixTime: UnixTime;

    /// Vault custody account is derived from this ID
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    #[pallet::constant]
    type MaxTransactions: Get<u32>;
    #[pallet::constant]
    type MaxRulesLength: Get<u32>;
    #[pallet::constant]
    type MaxExplanationLength: Get<u32>;

    type WeightInfo: WeightInfo;

    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId, Self::AssetId, Self::Balance>;
  }

  pub type BalanceOf<T> = <T as Config>::Balance;
  pub type RulesOf<T> = BoundedVec<u8, <T as Config>::MaxRulesLength>;
  pub type ExplanationOf<T> = BoundedVec<u8, <T as Config>::MaxExplanationLength>;

  pub type TransactionOf<T> =
    Transaction<<T as frame_system::Config>::AccountId, <T as Config>::Balance>;
  pub type TransactionsOf<T> = BoundedVec<TransactionOf<T>, <T as Config>::MaxTransactions>;

  pub type VaultSettingsOf<T> = VaultSettings<
    <T as frame_system::Config>::AccountId,
    <T as Config>::AssetId,
    <T as Config>::Balance,
    <T as Config>::MaxRulesLength,
  >;

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  #[pallet::storage]
  pub type Settings<T: Config> = StorageValue<_, VaultSettingsOf<T>, OptionQuery>;

  /// Oracle endpoint as of the last `sync`.
  #[pallet::storage]
  pub type CachedOracle<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// proposal_hash -> assertion_id
  #[pallet::storage]
  pub type AssertionIds<T: Config> = StorageMap<_, Blake2_128Concat, T::Hash, T::Hash, OptionQuery>;

  /// assertion_id -> proposal_hash
  #[pallet::storage]
  pub type ProposalHashes<T: Config> =
    StorageMap<_, Blake2_128Concat, T::Hash, T::Hash, OptionQuery>;

  /// Trusted peer bookkeepers per network segment.
  #[pallet::storage]
  pub type Bookkeepers<T: Config> =
    StorageDoubleMap<_, Blake2_128Concat, T::AccountId, Twox64Concat, u32, bool, ValueQuery>;

  #[pallet::storage]
  pub type Locked<T> = StorageValue<_, bool, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    CollateralAndBondSet {
      collateral: T::AssetId,
      bond: BalanceOf<T>,
    },
    IdentifierSet {
      identifier: Identifier,
    },
    RulesSet {
      rules: RulesOf<T>,
    },
    LivenessSet {
      liveness: u64,
    },
    EscalationManagerSet {
      escalation_manager: Option<T::AccountId>,
    },
    OptimisticOracleChanged {
      oracle: T::AccountId,
    },
    TransactionsProposed {
      proposer: T::AccountId,
      proposal_hash: T::Hash,
      assertion_id: T::Hash,
      transactions: TransactionsOf<T>,
      explanation: ExplanationOf<T>,
      rules: RulesOf<T>,
      challenge_window_ends: u64,
    },
    ProposalDeleted {
      proposal_hash: T::Hash,
      assertion_id: T::Hash,
      reason: DeletionReason,
    },
    TransactionExecuted {
      proposal_hash: T::Hash,
      assertion_id: T::Hash,
      index: u32,
    },
    ProposalExecuted {
      proposal_hash: T::Hash,
      assertion_id: T::Hash,
    },
    BookkeeperUpdated {
      bookkeeper: T::AccountId,
      segment: u32,
      approved: bool,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Vault settings were never initialised.
    NotConfigured,
    /// The finder does not publish the required service.
    ServiceUnavailable,
    UnsupportedCollateral,
    UnsupportedIdentifier,
    EmptyRules,
    ZeroLiveness,
    LivenessTooLarge,
    NotAContract,
    EmptyProposal,
    /// A transaction targets the null account.
    InvalidTarget,
    PayloadToNonContract,
    /// An identical proposal is already active.
    DuplicateProposal,
    ProposalNotFound,
    InvalidAssertion,
    /// The cached oracle still recognises the assertion.
    OracleUpgradeNotDetected,
    ExecutionFailed,
    Reentrant,
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    #[cfg(feature = "try-runtime")]
    fn try_state(_n: BlockNumberFor<T>) -> Result<(), polkadot_sdk::sp_runtime::TryRuntimeError> {
      Self::do_try_state()
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Replace collateral and bond together. The collateral must be on the
    /// collateral whitelist published by the finder.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::set_collateral_and_bond())]
    pub fn set_collateral_and_bond(
      origin: OriginFor<T>,
      collateral: T::AssetId,
      bond: BalanceOf<T>,
    ) -> DispatchResult {
      T::OwnerOrigin::ensure_origin(origin)?;
      let whitelist = Self::service(ServiceKey::CollateralWhitelist)?;
      ensure!(
        T::Whitelists::is_on_whitelist(&whitelist, collateral),
        Error::<T>::UnsupportedCollateral
      );
      Self::mutate_settings(|settings| {
        settings.collateral = collateral;
        settings.bond = bond;
      })?;
      Self::deposit_event(Event::CollateralAndBondSet { collateral, bond });
      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_identifier())]
    pub fn set_identifier(origin: OriginFor<T>, identifier: Identifier) -> DispatchResult {
      T::OwnerOrigin::ensure_origin(origin)?;
      let whitelist = Self::service(ServiceKey::IdentifierWhitelist)?;
      ensure!(
        T::Whitelists::is_identifier_supported(&whitelist, &identifier),
        Error::<T>::UnsupportedIdentifier
      );
      Self::mutate_settings(|settings| settings.identifier = identifier)?;
      Self::deposit_event(Event::IdentifierSet { identifier });
      Ok(())
    }

    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_rules())]
    pub fn set_rules(origin: OriginFor<T>, rules: RulesOf<T>) -> DispatchResult {
      T::OwnerOrigin::ensure_origin(origin)?;
      ensure!(!rules.is_empty(), Error::<T>::EmptyRules);
      Self::mutate_settings(|settings| settings.rules = rules.clone())?;
      Self::deposit_event(Event::RulesSet { rules });
      Ok(())
    }

    /// Challenge window for new proposals, in seconds. Proposals already
    /// asserted keep the liveness they were asserted with.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_liveness())]
    pub fn set_liveness(origin: OriginFor<T>, liveness: u64) -> DispatchResult {
      T::OwnerOrigin::ensure_origin(origin)?;
      Self::validate_liveness(liveness)?;
      Self::mutate_settings(|settings| settings.liveness = liveness)?;
      Self::deposit_event(Event::LivenessSet { liveness });
      Ok(())
    }

    /// `None` disables the escalation manager.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_escalation_manager())]
    pub fn set_escalation_manager(
      origin: OriginFor<T>,
      escalation_manager: Option<T::AccountId>,
    ) -> DispatchResult {
      T::OwnerOrigin::ensure_origin(origin)?;
      if let Some(ref manager) = escalation_manager {
        ensure!(T::Contracts::is_contract(manager), Error::<T>::NotAContract);
      }
      Self::mutate_settings(|settings| settings.escalation_manager = escalation_manager.clone())?;
      Self::deposit_event(Event::EscalationManagerSet { escalation_manager });
      Ok(())
    }

    /// Refresh the cached oracle endpoint from the finder.
    ///
    /// Proposals asserted at a previous endpoint cannot settle after a
    /// rotation; `delete_proposal_on_upgrade` clears them.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::sync())]
    pub fn sync(origin: OriginFor<T>) -> DispatchResult {
      ensure_signed(origin)?;
      Self::non_reentrant(Self::do_sync)
    }

    /// Propose a batch of actions for optimistic approval.
    ///
    /// Pulls the proposal bond from the caller into the vault, approves the
    /// oracle for it and asserts a claim binding the proposal hash, the
    /// explanation and the current rules.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::propose_transactions(transactions.len() as u32))]
    pub fn propose_transactions(
      origin: OriginFor<T>,
      transactions: TransactionsOf<T>,
      explanation: ExplanationOf<T>,
    ) -> DispatchResult {
      let proposer = ensure_signed(origin)?;
      Self::non_reentrant(|| Self::do_propose(proposer, transactions, explanation))
    }

    /// Drop a proposal whose assertion the cached oracle no longer recognises.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::delete_proposal_on_upgrade())]
    pub fn delete_proposal_on_upgrade(
      origin: OriginFor<T>,
      proposal_hash: T::Hash,
    ) -> DispatchResult {
      ensure_signed(origin)?;
      Self::non_reentrant(|| Self::do_delete_on_upgrade(proposal_hash))
    }

    /// Dispute notification.
    ///
    /// From the cached oracle this removes the disputed proposal. From any
    /// other caller it is treated as `delete_proposal_on_upgrade` for the
    /// proposal bound to `assertion_id`, with the same preconditions.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::assertion_disputed_callback())]
    pub fn assertion_disputed_callback(
      origin: OriginFor<T>,
      assertion_id: T::Hash,
    ) -> DispatchResult {
      let caller = ensure_signed(origin)?;
      let proposal_hash = ProposalHashes::<T>::get(assertion_id);
      if CachedOracle::<T>::get().as_ref() == Some(&caller) {
        let proposal_hash = proposal_hash.ok_or(Error::<T>::InvalidAssertion)?;
        Self::remove_entry(proposal_hash, assertion_id);
        log::debug!(
          target: LOG_TARGET,
          "proposal {:?} disputed (assertion {:?})",
          proposal_hash,
          assertion_id,
        );
        Self::deposit_event(Event::ProposalDeleted {
          proposal_hash,
          assertion_id,
          reason: DeletionReason::Disputed,
        });
        Ok(())
      } else {
        let proposal_hash = proposal_hash.ok_or(Error::<T>::ProposalNotFound)?;
        Self::non_reentrant(|| Self::do_delete_on_upgrade(proposal_hash))
      }
    }

    /// Resolution notification. Intentionally inert.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::assertion_resolved_callback())]
    pub fn assertion_resolved_callback(
      origin: OriginFor<T>,
      _assertion_id: T::Hash,
      _truthful: bool,
    ) -> DispatchResult {
      ensure_signed(origin)?;
      Ok(())
    }

    /// Execute an approved proposal by resubmitting its exact transaction list.
    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::execute_proposal(transactions.len() as u32))]
    pub fn execute_proposal(origin: OriginFor<T>, transactions: TransactionsOf<T>) -> DispatchResult {
      ensure_signed(origin)?;
      Self::non_reentrant(|| Self::do_execute(transactions))
    }

    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::update_bookkeeper())]
    pub fn update_bookkeeper(
      origin: OriginFor<T>,
      bookkeeper: T::AccountId,
      segment: u32,
      approved: bool,
    ) -> DispatchResult {
      T::OwnerOrigin::ensure_origin(origin)?;
      if approved {
        Bookkeepers::<T>::insert(&bookkeeper, segment, true);
      } else {
        Bookkeepers::<T>::remove(&bookkeeper, segment);
      }
      Self::deposit_event(Event::BookkeeperUpdated {
        bookkeeper,
        segment,
        approved,
      });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Account holding escrowed bonds and acting as the oracle callback recipient.
    pub fn vault_account() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Content address of a transaction list.
    pub fn proposal_hash(transactions: &[TransactionOf<T>]) -> T::Hash {
      T::Hashing::hash_of(&transactions)
    }

    /// Bond a proposal must post: the configured bond, floored by the oracle minimum.
    pub fn proposal_bond() -> Result<BalanceOf<T>, DispatchError> {
      let settings = Self::settings()?;
      let oracle = Self::oracle()?;
      Ok(Self::effective_bond(&settings, &oracle))
    }

    pub fn settings() -> Result<VaultSettingsOf<T>, DispatchError> {
      Settings::<T>::get().ok_or_else(|| Error::<T>::NotConfigured.into())
    }

    pub fn cached_oracle() -> Option<T::AccountId> {
      CachedOracle::<T>::get()
    }

    pub fn assertion_of(proposal_hash: T::Hash) -> Option<T::Hash> {
      AssertionIds::<T>::get(proposal_hash)
    }

    pub fn proposal_of(assertion_id: T::Hash) -> Option<T::Hash> {
      ProposalHashes::<T>::get(assertion_id)
    }

    pub fn is_bookkeeper(bookkeeper: &T::AccountId, segment: u32) -> bool {
      Bookkeepers::<T>::get(bookkeeper, segment)
    }

    /// Runs `f` under the pallet-wide reentrancy lock in its own storage layer.
    ///
    /// The lock is released on every exit path.
    fn non_reentrant<R>(f: impl FnOnce() -> Result<R, DispatchError>) -> Result<R, DispatchError> {
      ensure!(!Locked::<T>::get(), Error::<T>::Reentrant);
      Locked::<T>::put(true);
      let result = with_storage_layer(f);
      Locked::<T>::kill();
      result
    }

    fn do_sync() -> DispatchResult {
      let oracle = Self::service(ServiceKey::OptimisticOracleV3)?;
      if CachedOracle::<T>::get().as_ref() != Some(&oracle) {
        CachedOracle::<T>::put(&oracle);
        log::info!(target: LOG_TARGET, "oracle endpoint changed to {:?}", oracle);
        Self::deposit_event(Event::OptimisticOracleChanged { oracle });
      }
      Ok(())
    }

    fn do_propose(
      proposer: T::AccountId,
      transactions: TransactionsOf<T>,
      explanation: ExplanationOf<T>,
    ) -> DispatchResult {
      ensure!(!transactions.is_empty(), Error::<T>::EmptyProposal);
      for transaction in transactions.iter() {
        Self::validate_transaction(transaction)?;
      }
      let settings = Self::settings()?;
      let oracle = Self::oracle()?;
      let proposal_hash = Self::proposal_hash(&transactions);
      ensure!(
        !AssertionIds::<T>::contains_key(proposal_hash),
        Error::<T>::DuplicateProposal
      );

      let bond = Self::effective_bond(&settings, &oracle);
      let vault = Self::vault_account();
      T::Collateral::transfer(&proposer, &vault, settings.collateral, bond)?;
      T::Collateral::approve(&vault, &oracle, settings.collateral, bond)?;

      let claim = construct_claim(proposal_hash.as_ref(), &explanation, &settings.rules);
      let assertion_id = T::Oracle::assert_truth(
        &oracle,
        &claim,
        AssertionTerms {
          asserter: proposer.clone(),
          callback_recipient: vault,
          escalation_manager: settings.escalation_manager.clone(),
          liveness: settings.liveness,
          collateral: settings.collateral,
          bond,
          identifier: settings.identifier,
          domain: None,
        },
      )?;
      AssertionIds::<T>::insert(proposal_hash, assertion_id);
      ProposalHashes::<T>::insert(assertion_id, proposal_hash);

      let challenge_window_ends = T::UnixTime::now()
        .as_secs()
        .saturating_add(settings.liveness);
      log::debug!(
        target: LOG_TARGET,
        "proposal {:?} asserted as {:?}, challenge window ends at {}",
        proposal_hash,
        assertion_id,
        challenge_window_ends,
      );
      Self::deposit_event(Event::TransactionsProposed {
        proposer,
        proposal_hash,
        assertion_id,
        transactions,
        explanation,
        rules: settings.rules,
        challenge_window_ends,
      });
      Ok(())
    }

    fn do_delete_on_upgrade(proposal_hash: T::Hash) -> DispatchResult {
      let assertion_id =
        AssertionIds::<T>::get(proposal_hash).ok_or(Error::<T>::ProposalNotFound)?;
      let oracle = Self::oracle()?;
      ensure!(
        T::Oracle::assertion_asserter(&oracle, &assertion_id).is_none(),
        Error::<T>::OracleUpgradeNotDetected
      );
      Self::remove_entry(proposal_hash, assertion_id);
      log::info!(
        target: LOG_TARGET,
        "proposal {:?} deleted after oracle upgrade",
        proposal_hash,
      );
      Self::deposit_event(Event::ProposalDeleted {
        proposal_hash,
        assertion_id,
        reason: DeletionReason::OracleUpgraded,
      });
      Ok(())
    }

    fn do_execute(transactions: TransactionsOf<T>) -> DispatchResult {
      let proposal_hash = Self::proposal_hash(&transactions);
      let assertion_id =
        AssertionIds::<T>::get(proposal_hash).ok_or(Error::<T>::ProposalNotFound)?;
      // Entry is consumed before any action runs.
      Self::remove_entry(proposal_hash, assertion_id);

      let oracle = Self::oracle()?;
      // Disputed assertions have no entry left, so a settlement reaching this
      // point resolved truthfully.
      T::Oracle::settle_and_get_assertion_result(&oracle, &assertion_id)?;

      let vault = Self::vault_account();
      for (index, transaction) in transactions.iter().enumerate() {
        let executed = T::Executor::execute(
          &vault,
          &transaction.to,
          transaction.value,
          &transaction.data,
          transaction.operation,
        );
        if !executed {
          log::warn!(
            target: LOG_TARGET,
            "proposal {:?}: transaction {} failed, rolling back",
            proposal_hash,
            index,
          );
          return Err(Error::<T>::ExecutionFailed.into());
        }
        Self::deposit_event(Event::TransactionExecuted {
          proposal_hash,
          assertion_id,
          index: index as u32,
        });
      }
      Self::deposit_event(Event::ProposalExecuted {
        proposal_hash,
        assertion_id,
      });
      Ok(())
    }

    fn remove_entry(proposal_hash: T::Hash, assertion_id: T::Hash) {
      AssertionIds::<T>::remove(proposal_hash);
      ProposalHashes::<T>::remove(assertion_id);
    }

    fn validate_transaction(transaction: &TransactionOf<T>) -> DispatchResult {
      ensure!(!is_zero_account(&transaction.to), Error::<T>::InvalidTarget);
      if transaction.has_payload() {
        ensure!(
          T::Contracts::is_contract(&transaction.to),
          Error::<T>::PayloadToNonContract
        );
      }
      Ok(())
    }

    fn validate_liveness(liveness: u64) -> DispatchResult {
      ensure!(liveness > 0, Error::<T>::ZeroLiveness);
      ensure!(liveness < MAX_LIVENESS_SECS, Error::<T>::LivenessTooLarge);
      Ok(())
    }

    fn effective_bond(settings: &VaultSettingsOf<T>, oracle: &T::AccountId) -> BalanceOf<T> {
      let floor = T::Oracle::minimum_bond(oracle, settings.collateral);
      settings.bond.max(floor)
    }

    fn oracle() -> Result<T::AccountId, DispatchError> {
      CachedOracle::<T>::get().ok_or_else(|| Error::<T>::ServiceUnavailable.into())
    }

    fn service(key: ServiceKey) -> Result<T::AccountId, Error<T>> {
      T::Finder::implementation_address(key).ok_or(Error::<T>::ServiceUnavailable)
    }

    fn mutate_settings(f: impl FnOnce(&mut VaultSettingsOf<T>)) -> DispatchResult {
      Settings::<T>::try_mutate(|maybe| -> DispatchResult {
        let settings = maybe.as_mut().ok_or(Error::<T>::NotConfigured)?;
        f(settings);
        Ok(())
      })
    }

    /// The two ledger maps form a bijection and the lock is free between calls.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), DispatchError> {
      for (proposal_hash, assertion_id) in AssertionIds::<T>::iter() {
        ensure!(
          ProposalHashes::<T>::get(assertion_id) == Some(proposal_hash),
          "assertion id does not map back to its proposal"
        );
      }
      for (assertion_id, proposal_hash) in ProposalHashes::<T>::iter() {
        ensure!(
          AssertionIds::<T>::get(proposal_hash) == Some(assertion_id),
          "proposal hash does not map back to its assertion"
        );
      }
      ensure!(!Locked::<T>::get(), "reentrancy lock left held");
      Ok(())
    }
  }

  #[pallet::genesis_config]
  pub struct GenesisConfig<T: Config> {
    /// `None` leaves the vault unconfigured.
    pub collateral: Option<T::AssetId>,
    pub bond: BalanceOf<T>,
    pub rules: Vec<u8>,
    pub identifier: Identifier,
    pub liveness: u64,
    pub escalation_manager: Option<T::AccountId>,
    pub bookkeepers: Vec<(T::AccountId, u32)>,
  }

  impl<T: Config> Default for GenesisConfig<T> {
    fn default() -> Self {
      Self {
        collateral: None,
        bond: Default::default(),
        rules: Vec::new(),
        identifier: primitives::params::ASSERT_TRUTH_IDENTIFIER,
        liveness: primitives::params::DEFAULT_LIVENESS_SECS,
        escalation_manager: None,
        bookkeepers: Vec::new(),
      }
    }
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      // Vault holds collateral without any native balance
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::vault_account());
      if let Some(oracle) = T::Finder::implementation_address(ServiceKey::OptimisticOracleV3) {
        CachedOracle::<T>::put(oracle);
      }
      if let Some(collateral) = self.collateral {
        assert!(!self.rules.is_empty(), "Bookkeeper rules must not be empty");
        assert!(
          self.liveness > 0 && self.liveness < MAX_LIVENESS_SECS,
          "Bookkeeper liveness out of range"
        );
        let collateral_whitelist = T::Finder::implementation_address(ServiceKey::CollateralWhitelist)
          .expect("Collateral whitelist must be published before genesis");
        assert!(
          T::Whitelists::is_on_whitelist(&collateral_whitelist, collateral),
          "Bookkeeper collateral not whitelisted"
        );
        let identifier_whitelist = T::Finder::implementation_address(ServiceKey::IdentifierWhitelist)
          .expect("Identifier whitelist must be published before genesis");
        assert!(
          T::Whitelists::is_identifier_supported(&identifier_whitelist, &self.identifier),
          "Bookkeeper identifier not supported"
        );
        if let Some(manager) = self.escalation_manager.as_ref() {
          assert!(
            T::Contracts::is_contract(manager),
            "Bookkeeper escalation manager is not a contract"
          );
        }
        let rules: RulesOf<T> = self
          .rules
          .clone()
          .try_into()
          .expect("Bookkeeper rules exceed max length");
        Settings::<T>::put(VaultSettings {
          collateral,
          bond: self.bond,
          rules,
          identifier: self.identifier,
          liveness: self.liveness,
          escalation_manager: self.escalation_manager.clone(),
        });
      }
      for (bookkeeper, segment) in self.bookkeepers.iter() {
        Bookkeepers::<T>::insert(bookkeeper, segment, true);
      }
    }
  }
}
