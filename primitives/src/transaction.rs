use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::sp_runtime::{BoundedVec, traits::ConstU32};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Upper bound for the payload carried by a single action (16 KiB).
pub const MAX_PAYLOAD_LEN: u32 = 16 * 1024;

/// Opaque call data forwarded to the target of an action.
pub type Payload = BoundedVec<u8, ConstU32<MAX_PAYLOAD_LEN>>;

/// How the executor dispatches an action against its target.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum CallKind {
  #[default]
  Call,
  DelegateCall,
}

/// A single action of a proposal.
///
/// The SCALE encoding of an ordered list of these is what the proposal hash
/// commits to, so field order here is part of the content address.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct Transaction<AccountId, Balance> {
  pub to: AccountId,
  pub operation: CallKind,
  pub value: Balance,
  pub data: Payload,
}

impl<AccountId, Balance> Transaction<AccountId, Balance> {
  pub fn has_payload(&self) -> bool {
    !self.data.is_empty()
  }
}

/// True when every byte of the encoded account is zero (the "null address").
pub fn is_zero_account<AccountId: Encode>(who: &AccountId) -> bool {
  who.using_encoded(|bytes| bytes.iter().all(|b| *b == 0))
}
