#![cfg(feature = "runtime-benchmarks")]

extern crate alloc;

use crate::*;
use alloc::vec;
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;

#[benchmarks]
mod benches {
  use super::*;

  fn guarded<T: Config>(owner: &T::AccountId) -> T::AccountId {
    let guardian: T::AccountId = account("guardian", 0, 0);
    AccountStates::<T>::mutate(owner, |state| state.recoverer = Some(guardian.clone()));
    guardian
  }

  #[benchmark]
  fn set_controller() {
    let owner: T::AccountId = whitelisted_caller();
    let controller: T::AccountId = account("controller", 0, 0);

    #[extrinsic_call]
    set_controller(RawOrigin::Signed(owner.clone()), owner.clone(), controller.clone());

    assert!(Controllers::<T>::contains_key(&owner, &controller));
  }

  #[benchmark]
  fn remove_controller() {
    let owner: T::AccountId = whitelisted_caller();
    let controller: T::AccountId = account("controller", 0, 0);
    Controllers::<T>::insert(&owner, &controller, ());

    #[extrinsic_call]
    remove_controller(RawOrigin::Signed(owner.clone()), owner.clone(), controller.clone());

    assert!(!Controllers::<T>::contains_key(&owner, &controller));
  }

  #[benchmark]
  fn set_recoverer() {
    let owner: T::AccountId = whitelisted_caller();
    let controller: T::AccountId = account("controller", 0, 0);
    let recoverer: T::AccountId = account("guardian", 0, 0);
    Controllers::<T>::insert(&owner, &controller, ());

    #[extrinsic_call]
    set_recoverer(RawOrigin::Signed(controller), owner.clone(), recoverer.clone());

    assert_eq!(AccountStates::<T>::get(&owner).recoverer, Some(recoverer));
  }

  #[benchmark]
  fn set_account_rules() {
    let owner: T::AccountId = whitelisted_caller();
    let rules: RulesOf<T> =
      BoundedVec::truncate_from(vec![b'r'; T::MaxRulesLength::get() as usize]);

    #[extrinsic_call]
    set_account_rules(RawOrigin::Signed(owner.clone()), owner.clone(), rules.clone());

    assert_eq!(AccountRules::<T>::get(&owner), Some(rules));
  }

  #[benchmark]
  fn go_manual() {
    let owner: T::AccountId = whitelisted_caller();
    let controller: T::AccountId = account("controller", 0, 0);
    Controllers::<T>::insert(&owner, &controller, ());

    #[extrinsic_call]
    go_manual(RawOrigin::Signed(controller), owner.clone());

    assert!(AccountStates::<T>::get(&owner).is_manual());
  }

  #[benchmark]
  fn go_automatic() {
    let owner: T::AccountId = whitelisted_caller();
    AccountStates::<T>::mutate(&owner, |state| state.manual_mode_since = Some(1));

    #[extrinsic_call]
    go_automatic(RawOrigin::Signed(owner.clone()), owner.clone());

    assert!(!AccountStates::<T>::get(&owner).is_manual());
  }

  #[benchmark]
  fn freeze() {
    let owner: T::AccountId = whitelisted_caller();
    let guardian = guarded::<T>(&owner);

    #[extrinsic_call]
    freeze(RawOrigin::Signed(guardian), owner.clone());

    assert!(AccountStates::<T>::get(&owner).frozen);
  }

  #[benchmark]
  fn unfreeze() {
    let owner: T::AccountId = whitelisted_caller();
    guarded::<T>(&owner);
    AccountStates::<T>::mutate(&owner, |state| state.frozen = true);

    #[extrinsic_call]
    unfreeze(RawOrigin::Root, owner.clone());

    assert!(!AccountStates::<T>::get(&owner).frozen);
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
