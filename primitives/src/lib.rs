#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod claim;
pub mod control;
pub mod ecosystem;
pub mod transaction;

pub use claim::*;
pub use control::*;
pub use ecosystem::*;
pub use transaction::*;
