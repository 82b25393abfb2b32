//! Account Control Pallet
//!
//! Authorization control plane for accounts driven by automation.
//!
//! Every account is implicitly its own controller and may delegate control to
//! further controllers. A controller can:
//! - add controllers, set the recoverer and the account's rules text,
//! - switch the account to manual mode (automation stands down) and back.
//!
//! The recoverer (guardian) can freeze the account in an emergency. A frozen
//! account cannot return to automatic mode; only `ForceOrigin` lifts a freeze.
//!
//! Tie-breaks between parties:
//! - controllers cannot evict each other; only the account removes controllers,
//! - the recoverer freezes but cannot unfreeze,
//! - `go_manual` is idempotent and keeps the first timestamp.
//!
//! Other pallets consult the plane through [`primitives::AccountModeInspect`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "runtime::account-control";

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, WeightInfo};
  use frame::prelude::*;
  use polkadot_sdk::frame_support::traits::{EnsureOrigin, UnixTime};
  use primitives::AccountModeInspect;

  #[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen)]
  pub struct AccountState<AccountId> {
    pub recoverer: Option<AccountId>,
    /// Unix seconds at which manual mode was entered; `None` is automatic mode
    pub manual_mode_since: Option<u64>,
    pub frozen: bool,
  }

  impl<AccountId> Default for AccountState<AccountId> {
    fn default() -> Self {
      Self {
        recoverer: None,
        manual_mode_since: None,
        frozen: false,
      }
    }
  }

  impl<AccountId> AccountState<AccountId> {
    pub fn is_manual(&self) -> bool {
      self.manual_mode_since.is_some()
    }
  }

  #[pallet::config]
  pub trait Config: frame_system::Config {
    type UnixTime: UnixTime;

    /// Governance origin allowed to lift a freeze
    type ForceOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    #[pallet::constant]
    type MaxRulesLength: Get<u32>;

    type WeightInfo: WeightInfo;
  }

  pub type RulesOf<T> = BoundedVec<u8, <T as Config>::MaxRulesLength>;
  pub type AccountStateOf<T> = AccountState<<T as frame_system::Config>::AccountId>;

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Delegated controllers: (account, controller) -> ()
  #[pallet::storage]
  pub type Controllers<T: Config> = StorageDoubleMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    Blake2_128Concat,
    T::AccountId,
    (),
    OptionQuery,
  >;

  #[pallet::storage]
  pub type AccountRules<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, RulesOf<T>, OptionQuery>;

  #[pallet::storage]
  pub type AccountStates<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, AccountStateOf<T>, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    ControllerSet {
      account: T::AccountId,
      controller: T::AccountId,
      by: T::AccountId,
    },
    ControllerRemoved {
      account: T::AccountId,
      controller: T::AccountId,
    },
    RecovererSet {
      account: T::AccountId,
      recoverer: T::AccountId,
    },
    AccountRulesSet {
      account: T::AccountId,
      rules: RulesOf<T>,
    },
    ManualModeEntered {
      account: T::AccountId,
      since: u64,
    },
    AutomaticModeEntered {
      account: T::AccountId,
    },
    AccountFrozen {
      account: T::AccountId,
      recoverer: T::AccountId,
    },
    AccountUnfrozen {
      account: T::AccountId,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Caller is neither the account nor one of its controllers.
    NotController,
    /// Caller is not the account's recoverer.
    NotAGuardian,
    /// Only the account itself may do this.
    NotSelf,
    /// The account is always its own controller.
    CannotRemoveSelf,
    ControllerNotFound,
    EmptyRules,
    NotInManualMode,
    AccountFrozen,
    NotFrozen,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::set_controller())]
    pub fn set_controller(
      origin: OriginFor<T>,
      account: T::AccountId,
      controller: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_controller(&account, &who)?;
      Controllers::<T>::insert(&account, &controller, ());
      Self::deposit_event(Event::ControllerSet {
        account,
        controller,
        by: who,
      });
      Ok(())
    }

    /// Only the account itself removes controllers.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::remove_controller())]
    pub fn remove_controller(
      origin: OriginFor<T>,
      account: T::AccountId,
      controller: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(who == account, Error::<T>::NotSelf);
      ensure!(controller != account, Error::<T>::CannotRemoveSelf);
      ensure!(
        Controllers::<T>::contains_key(&account, &controller),
        Error::<T>::ControllerNotFound
      );
      Controllers::<T>::remove(&account, &controller);
      Self::deposit_event(Event::ControllerRemoved {
        account,
        controller,
      });
      Ok(())
    }

    /// Set or replace the guardian allowed to freeze the account.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_recoverer())]
    pub fn set_recoverer(
      origin: OriginFor<T>,
      account: T::AccountId,
      recoverer: T::AccountId,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_controller(&account, &who)?;
      AccountStates::<T>::mutate(&account, |state| state.recoverer = Some(recoverer.clone()));
      Self::deposit_event(Event::RecovererSet { account, recoverer });
      Ok(())
    }

    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_account_rules())]
    pub fn set_account_rules(
      origin: OriginFor<T>,
      account: T::AccountId,
      rules: RulesOf<T>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_controller(&account, &who)?;
      ensure!(!rules.is_empty(), Error::<T>::EmptyRules);
      AccountRules::<T>::insert(&account, &rules);
      Self::deposit_event(Event::AccountRulesSet { account, rules });
      Ok(())
    }

    /// Hand the account over to manual operation. Repeating keeps the
    /// original timestamp.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::go_manual())]
    pub fn go_manual(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_controller(&account, &who)?;
      let entered = AccountStates::<T>::mutate(&account, |state| {
        if state.is_manual() {
          return None;
        }
        let since = T::UnixTime::now().as_secs();
        state.manual_mode_since = Some(since);
        Some(since)
      });
      if let Some(since) = entered {
        log::debug!(target: LOG_TARGET, "{:?} entered manual mode at {}", account, since);
        Self::deposit_event(Event::ManualModeEntered { account, since });
      }
      Ok(())
    }

    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::go_automatic())]
    pub fn go_automatic(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::ensure_controller(&account, &who)?;
      AccountStates::<T>::try_mutate(&account, |state| -> DispatchResult {
        ensure!(!state.frozen, Error::<T>::AccountFrozen);
        ensure!(state.is_manual(), Error::<T>::NotInManualMode);
        state.manual_mode_since = None;
        Ok(())
      })?;
      Self::deposit_event(Event::AutomaticModeEntered { account });
      Ok(())
    }

    /// Emergency stop, callable by the account's recoverer only.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::freeze())]
    pub fn freeze(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let state = AccountStates::<T>::get(&account);
      ensure!(
        state.recoverer.as_ref() == Some(&who),
        Error::<T>::NotAGuardian
      );
      if state.frozen {
        return Ok(());
      }
      AccountStates::<T>::mutate(&account, |state| state.frozen = true);
      log::warn!(target: LOG_TARGET, "{:?} frozen by recoverer {:?}", account, who);
      Self::deposit_event(Event::AccountFrozen {
        account,
        recoverer: who,
      });
      Ok(())
    }

    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::unfreeze())]
    pub fn unfreeze(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
      T::ForceOrigin::ensure_origin(origin)?;
      AccountStates::<T>::try_mutate(&account, |state| -> DispatchResult {
        ensure!(state.frozen, Error::<T>::NotFrozen);
        state.frozen = false;
        Ok(())
      })?;
      log::info!(target: LOG_TARGET, "{:?} unfrozen", account);
      Self::deposit_event(Event::AccountUnfrozen { account });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn account_state(account: &T::AccountId) -> AccountStateOf<T> {
      AccountStates::<T>::get(account)
    }

    pub fn account_rules(account: &T::AccountId) -> Option<RulesOf<T>> {
      AccountRules::<T>::get(account)
    }

    fn ensure_controller(account: &T::AccountId, who: &T::AccountId) -> DispatchResult {
      ensure!(
        <Self as AccountModeInspect<T::AccountId>>::is_controller(account, who),
        Error::<T>::NotController
      );
      Ok(())
    }
  }

  impl<T: Config> AccountModeInspect<T::AccountId> for Pallet<T> {
    fn is_controller(account: &T::AccountId, who: &T::AccountId) -> bool {
      account == who || Controllers::<T>::contains_key(account, who)
    }

    fn recoverer(account: &T::AccountId) -> Option<T::AccountId> {
      AccountStates::<T>::get(account).recoverer
    }

    fn is_manual(account: &T::AccountId) -> bool {
      AccountStates::<T>::get(account).is_manual()
    }

    fn is_frozen(account: &T::AccountId) -> bool {
      AccountStates::<T>::get(account).frozen
    }
  }
}
