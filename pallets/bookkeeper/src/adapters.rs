//! Adapter traits for the bookkeeper pallet
//!
//! Every collaborator the vault talks to is abstracted behind a trait so the
//! pallet stays generic over the runtime: the assertion oracle, the finder that
//! publishes endpoint addresses, the whitelist registries, the collateral
//! token, contract introspection and the low-level action executor.
//!
//! Oracle and whitelist calls take the endpoint account explicitly. The
//! endpoint is resolved through [`Finder`] and cached by the pallet, so a
//! rotation becomes visible only after `sync`.

use frame::prelude::*;
use primitives::{CallKind, Identifier, ServiceKey};

/// Terms attached to an assertion besides the claim itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssertionTerms<AccountId, AssetId, Balance> {
  /// Account recorded as asserter of the claim
  pub asserter: AccountId,
  /// Account whose dispute/resolve callbacks the oracle invokes
  pub callback_recipient: AccountId,
  pub escalation_manager: Option<AccountId>,
  /// Challenge window in seconds
  pub liveness: u64,
  pub collateral: AssetId,
  pub bond: Balance,
  pub identifier: Identifier,
  pub domain: Option<[u8; 32]>,
}

/// Optimistic assertion oracle.
pub trait AssertionOracle<AccountId, AssetId, Balance, AssertionId> {
  /// Asserts `claim` and returns the new assertion id.
  ///
  /// The bond is pulled from `terms.callback_recipient` via a prior approval.
  fn assert_truth(
    oracle: &AccountId,
    claim: &[u8],
    terms: AssertionTerms<AccountId, AssetId, Balance>,
  ) -> Result<AssertionId, DispatchError>;

  /// Asserter of record, `None` when the oracle does not know the assertion.
  fn assertion_asserter(oracle: &AccountId, assertion_id: &AssertionId) -> Option<AccountId>;

  fn minimum_bond(oracle: &AccountId, collateral: AssetId) -> Balance;

  /// Settles the assertion if its liveness has elapsed and returns the result.
  ///
  /// Fails when the assertion is not settleable yet.
  fn settle_and_get_assertion_result(
    oracle: &AccountId,
    assertion_id: &AssertionId,
  ) -> Result<bool, DispatchError>;
}

/// Registry that maps stable service keys to current endpoint accounts.
pub trait Finder<AccountId> {
  fn implementation_address(key: ServiceKey) -> Option<AccountId>;
}

/// Collateral and identifier whitelist registries.
pub trait Whitelists<AccountId, AssetId> {
  fn is_on_whitelist(whitelist: &AccountId, collateral: AssetId) -> bool;

  fn is_identifier_supported(whitelist: &AccountId, identifier: &Identifier) -> bool;
}

/// Collateral token operations needed to escrow proposal bonds.
pub trait CollateralOps<AccountId, AssetId, Balance> {
  fn transfer(
    from: &AccountId,
    to: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), DispatchError>;

  /// Sets the allowance `spender` may pull from `owner`.
  fn approve(
    owner: &AccountId,
    spender: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), DispatchError>;
}

/// Code introspection for target and escalation manager validation.
pub trait ContractInspect<AccountId> {
  fn is_contract(who: &AccountId) -> bool;
}

/// Low-level primitive that performs one action on behalf of the vault.
pub trait ActionExecutor<AccountId, Balance> {
  /// Returns `false` when the action failed.
  fn execute(
    vault: &AccountId,
    to: &AccountId,
    value: Balance,
    data: &[u8],
    operation: CallKind,
  ) -> bool;
}

/// No contracts: every account is a plain account.
impl<AccountId> ContractInspect<AccountId> for () {
  fn is_contract(_: &AccountId) -> bool {
    false
  }
}

/// No finder configured: nothing resolves.
impl<AccountId> Finder<AccountId> for () {
  fn implementation_address(_: ServiceKey) -> Option<AccountId> {
    None
  }
}

/// No executor configured: every action fails.
impl<AccountId, Balance> ActionExecutor<AccountId, Balance> for () {
  fn execute(_: &AccountId, _: &AccountId, _: Balance, _: &[u8], _: CallKind) -> bool {
    false
  }
}
