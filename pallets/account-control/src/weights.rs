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
  fn set_controller() -> Weight;
  fn remove_controller() -> Weight;
  fn set_recoverer() -> Weight;
  fn set_account_rules() -> Weight;
  fn go_manual() -> Weight;
  fn go_automatic() -> Weight;
  fn freeze() -> Weight;
  fn unfreeze() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
  fn set_controller() -> Weight {
    Weight::from_parts(14_000_000, 3500)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn remove_controller() -> Weight {
    Weight::from_parts(13_000_000, 3500)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_recoverer() -> Weight {
    Weight::from_parts(15_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_account_rules() -> Weight {
    Weight::from_parts(15_000_000, 3700)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn go_manual() -> Weight {
    Weight::from_parts(16_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn go_automatic() -> Weight {
    Weight::from_parts(15_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(2))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn freeze() -> Weight {
    Weight::from_parts(14_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn unfreeze() -> Weight {
    Weight::from_parts(12_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(1))
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn set_controller() -> Weight { Weight::from_parts(14_000_000, 3500) }
  fn remove_controller() -> Weight { Weight::from_parts(13_000_000, 3500) }
  fn set_recoverer() -> Weight { Weight::from_parts(15_000_000, 3600) }
  fn set_account_rules() -> Weight { Weight::from_parts(15_000_000, 3700) }
  fn go_manual() -> Weight { Weight::from_parts(16_000_000, 3600) }
  fn go_automatic() -> Weight { Weight::from_parts(15_000_000, 3600) }
  fn freeze() -> Weight { Weight::from_parts(14_000_000, 3600) }
  fn unfreeze() -> Weight { Weight::from_parts(12_000_000, 3600) }
}
