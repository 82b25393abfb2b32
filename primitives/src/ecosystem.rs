//! Ecosystem Constants for the Optimistic Bookkeeper
//!
//! This module centralizes system-level constants shared by the bookkeeper and
//! account-control pallets: pallet IDs, oracle identifiers, liveness bounds and
//! the service keys used to resolve collaborator endpoints.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Price identifier understood by the assertion oracle (a right zero-padded `bytes32`).
pub type Identifier = [u8; 32];

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// The bookkeeper vault holds proposal bonds in custody under the account
/// derived from this ID via `PalletId::into_account_truncating()`.
pub mod pallet_ids {
  /// Optimistic bookkeeper vault pallet ID
  pub const BOOKKEEPER_PALLET_ID: &[u8; 8] = b"py/bkpr0";
}

/// Protocol parameters shared by the bookkeeper pallets.
pub mod params {
  use super::Identifier;

  pub const SECONDS_PER_WEEK: u64 = 7 * 24 * 60 * 60;

  /// Exclusive upper bound for an assertion liveness window (5200 weeks).
  ///
  /// Liveness values at or above this bound are rejected so that
  /// `request_time + liveness` can never overflow the oracle's timestamps.
  pub const MAX_LIVENESS_SECS: u64 = 5200 * SECONDS_PER_WEEK;

  /// Default challenge window (2 hours).
  pub const DEFAULT_LIVENESS_SECS: u64 = 2 * 60 * 60;

  /// Identifier the oracle uses for plain truth assertions.
  pub const ASSERT_TRUTH_IDENTIFIER: Identifier = super::padded_identifier(b"ASSERT_TRUTH");
}

/// Right-pads an ASCII name with zeroes into an [`Identifier`].
///
/// Names longer than 32 bytes are truncated.
pub const fn padded_identifier(name: &[u8]) -> Identifier {
  let mut out = [0u8; 32];
  let mut i = 0;
  while i < name.len() && i < 32 {
    out[i] = name[i];
    i += 1;
  }
  out
}

/// Stable keys under which the finder publishes collaborator endpoints.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum ServiceKey {
  /// Current assertion oracle endpoint
  OptimisticOracleV3,
  /// Registry of tokens accepted as bond collateral
  CollateralWhitelist,
  /// Registry of identifiers the oracle can resolve
  IdentifierWhitelist,
}
