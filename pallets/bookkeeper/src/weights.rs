#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn set_collateral_and_bond() -> Weight;
  fn set_identifier() -> Weight;
  fn set_rules() -> Weight;
  fn set_liveness() -> Weight;
  fn set_escalation_manager() -> Weight;
  fn sync() -> Weight;
  fn propose_transactions(t: u32) -> Weight;
  fn delete_proposal_on_upgrade() -> Weight;
  fn assertion_disputed_callback() -> Weight;
  fn assertion_resolved_callback() -> Weight;
  fn execute_proposal(t: u32) -> Weight;
  fn update_bookkeeper() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
  fn set_collateral_and_bond() -> Weight {
    Weight::from_parts(18_000_000, 1500)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_identifier() -> Weight {
    Weight::from_parts(16_000_000, 1500)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_rules() -> Weight {
    Weight::from_parts(14_000_000, 2600)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_liveness() -> Weight {
    Weight::from_parts(10_000_000, 900)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_escalation_manager() -> Weight {
    Weight::from_parts(12_000_000, 900)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn sync() -> Weight {
    Weight::from_parts(12_000_000, 900)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(2))
  }

  fn propose_transactions(t: u32) -> Weight {
    Weight::from_parts(
      60_000_000u64.saturating_add(u64::from(t).saturating_mul(1_500_000)),
      4000u64.saturating_add(u64::from(t).saturating_mul(128)),
    )
    .saturating_add(T::DbWeight::get().reads(5))
    .saturating_add(T::DbWeight::get().writes(5))
  }

  fn delete_proposal_on_upgrade() -> Weight {
    Weight::from_parts(25_000_000, 1800)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(3))
  }

  fn assertion_disputed_callback() -> Weight {
    Weight::from_parts(25_000_000, 1800)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(3))
  }

  fn assertion_resolved_callback() -> Weight {
    Weight::from_parts(2_000_000, 0)
  }

  fn execute_proposal(t: u32) -> Weight {
    Weight::from_parts(
      40_000_000u64.saturating_add(u64::from(t).saturating_mul(20_000_000)),
      3000u64.saturating_add(u64::from(t).saturating_mul(512)),
    )
    .saturating_add(T::DbWeight::get().reads(4))
    .saturating_add(T::DbWeight::get().writes(4))
  }

  fn update_bookkeeper() -> Weight {
    Weight::from_parts(10_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn set_collateral_and_bond() -> Weight { Weight::from_parts(18_000_000, 1500) }
  fn set_identifier() -> Weight { Weight::from_parts(16_000_000, 1500) }
  fn set_rules() -> Weight { Weight::from_parts(14_000_000, 2600) }
  fn set_liveness() -> Weight { Weight::from_parts(10_000_000, 900) }
  fn set_escalation_manager() -> Weight { Weight::from_parts(12_000_000, 900) }
  fn sync() -> Weight { Weight::from_parts(12_000_000, 900) }
  fn propose_transactions(t: u32) -> Weight {
    Weight::from_parts(60_000_000u64.saturating_add(u64::from(t).saturating_mul(1_500_000)), 4000)
  }
  fn delete_proposal_on_upgrade() -> Weight { Weight::from_parts(25_000_000, 1800) }
  fn assertion_disputed_callback() -> Weight { Weight::from_parts(25_000_000, 1800) }
  fn assertion_resolved_callback() -> Weight { Weight::from_parts(2_000_000, 0) }
  fn execute_proposal(t: u32) -> Weight {
    Weight::from_parts(40_000_000u64.saturating_add(u64::from(t).saturating_mul(20_000_000)), 3000)
  }
  fn update_bookkeeper() -> Weight { Weight::from_parts(10_000_000, 600) }
}
