#![cfg(feature = "runtime-benchmarks")]

extern crate alloc;

use crate::*;
use alloc::{vec, vec::Vec};
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{
  CallKind, Payload, Transaction,
  params::{ASSERT_TRUTH_IDENTIFIER, DEFAULT_LIVENESS_SECS},
};

#[benchmarks]
mod benches {
  use super::*;

  /// Genesis may leave the vault unconfigured; benchmarks need settings and a cached oracle.
  fn ensure_configured<T: Config>() {
    if Settings::<T>::get().is_none() {
      Settings::<T>::put(VaultSettings {
        collateral: T::BenchmarkHelper::collateral(),
        bond: 1_000u32.into(),
        rules: BoundedVec::truncate_from(b"benchmark rules".to_vec()),
        identifier: ASSERT_TRUTH_IDENTIFIER,
        liveness: DEFAULT_LIVENESS_SECS,
        escalation_manager: None,
      });
    }
    let caller: T::AccountId = account("syncer", 0, 0);
    Pallet::<T>::sync(RawOrigin::Signed(caller).into()).expect("oracle must be published");
  }

  fn make_transactions<T: Config>(t: u32) -> TransactionsOf<T> {
    let contract = T::BenchmarkHelper::contract();
    let transactions: Vec<TransactionOf<T>> = (0..t)
      .map(|i| Transaction {
        to: contract.clone(),
        operation: CallKind::Call,
        value: i.into(),
        data: Payload::truncate_from(vec![0xab; 68]),
      })
      .collect();
    BoundedVec::truncate_from(transactions)
  }

  fn funded_proposer<T: Config>() -> T::AccountId {
    let proposer: T::AccountId = whitelisted_caller();
    let bond = Pallet::<T>::proposal_bond().expect("vault configured");
    let collateral = Pallet::<T>::settings().expect("vault configured").collateral;
    T::BenchmarkHelper::fund(&proposer, collateral, bond.saturating_mul(10u32.into()));
    proposer
  }

  fn proposed<T: Config>(t: u32) -> (TransactionsOf<T>, T::Hash, T::Hash) {
    ensure_configured::<T>();
    let proposer = funded_proposer::<T>();
    let transactions = make_transactions::<T>(t);
    Pallet::<T>::propose_transactions(
      RawOrigin::Signed(proposer).into(),
      transactions.clone(),
      BoundedVec::truncate_from(b"benchmark".to_vec()),
    )
    .expect("proposal accepted");
    let proposal_hash = Pallet::<T>::proposal_hash(&transactions);
    let assertion_id = AssertionIds::<T>::get(proposal_hash).expect("proposal recorded");
    (transactions, proposal_hash, assertion_id)
  }

  #[benchmark]
  fn set_collateral_and_bond() {
    ensure_configured::<T>();
    let collateral = T::BenchmarkHelper::collateral();
    let bond: BalanceOf<T> = 5_000u32.into();

    #[extrinsic_call]
    set_collateral_and_bond(RawOrigin::Root, collateral, bond);

    assert_eq!(Settings::<T>::get().map(|s| s.bond), Some(bond));
  }

  #[benchmark]
  fn set_identifier() {
    ensure_configured::<T>();

    #[extrinsic_call]
    set_identifier(RawOrigin::Root, ASSERT_TRUTH_IDENTIFIER);
  }

  #[benchmark]
  fn set_rules() {
    ensure_configured::<T>();
    let rules: RulesOf<T> =
      BoundedVec::truncate_from(vec![b'r'; T::MaxRulesLength::get() as usize]);

    #[extrinsic_call]
    set_rules(RawOrigin::Root, rules.clone());

    assert_eq!(Settings::<T>::get().map(|s| s.rules), Some(rules));
  }

  #[benchmark]
  fn set_liveness() {
    ensure_configured::<T>();

    #[extrinsic_call]
    set_liveness(RawOrigin::Root, 100);

    assert_eq!(Settings::<T>::get().map(|s| s.liveness), Some(100));
  }

  #[benchmark]
  fn set_escalation_manager() {
    ensure_configured::<T>();
    let manager = T::BenchmarkHelper::contract();

    #[extrinsic_call]
    set_escalation_manager(RawOrigin::Root, Some(manager.clone()));

    assert_eq!(
      Settings::<T>::get().and_then(|s| s.escalation_manager),
      Some(manager)
    );
  }

  #[benchmark]
  fn sync() {
    ensure_configured::<T>();
    T::BenchmarkHelper::rotate_oracle();
    let before = CachedOracle::<T>::get();
    let caller: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    sync(RawOrigin::Signed(caller));

    assert_ne!(CachedOracle::<T>::get(), before);
  }

  #[benchmark]
  fn propose_transactions(t: Linear<1, { T::MaxTransactions::get() }>) {
    ensure_configured::<T>();
    let proposer = funded_proposer::<T>();
    let transactions = make_transactions::<T>(t);
    let explanation: ExplanationOf<T> =
      BoundedVec::truncate_from(vec![b'e'; T::MaxExplanationLength::get() as usize]);
    let proposal_hash = Pallet::<T>::proposal_hash(&transactions);

    #[extrinsic_call]
    propose_transactions(RawOrigin::Signed(proposer), transactions, explanation);

    assert!(AssertionIds::<T>::contains_key(proposal_hash));
  }

  #[benchmark]
  fn delete_proposal_on_upgrade() {
    let (_, proposal_hash, _) = proposed::<T>(1);
    T::BenchmarkHelper::rotate_oracle();
    let caller: T::AccountId = whitelisted_caller();
    Pallet::<T>::sync(RawOrigin::Signed(caller.clone()).into()).expect("oracle rotated");

    #[extrinsic_call]
    delete_proposal_on_upgrade(RawOrigin::Signed(caller), proposal_hash);

    assert!(!AssertionIds::<T>::contains_key(proposal_hash));
  }

  #[benchmark]
  fn assertion_disputed_callback() {
    let (_, proposal_hash, assertion_id) = proposed::<T>(1);
    let oracle = CachedOracle::<T>::get().expect("oracle cached");

    #[extrinsic_call]
    assertion_disputed_callback(RawOrigin::Signed(oracle), assertion_id);

    assert!(!AssertionIds::<T>::contains_key(proposal_hash));
  }

  #[benchmark]
  fn assertion_resolved_callback() {
    let caller: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    assertion_resolved_callback(RawOrigin::Signed(caller), T::Hash::default(), true);
  }

  #[benchmark]
  fn execute_proposal(t: Linear<1, { T::MaxTransactions::get() }>) {
    let (transactions, proposal_hash, _) = proposed::<T>(t);
    T::BenchmarkHelper::elapse_liveness();
    let caller: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    execute_proposal(RawOrigin::Signed(caller), transactions);

    assert!(!AssertionIds::<T>::contains_key(proposal_hash));
  }

  #[benchmark]
  fn update_bookkeeper() {
    let peer: T::AccountId = account("peer", 0, 0);

    #[extrinsic_call]
    update_bookkeeper(RawOrigin::Root, peer.clone(), 1, true);

    assert!(Bookkeepers::<T>::get(&peer, 1));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
