/// Read access to the account authorization control plane.
///
/// Automation consults this before acting on an account's behalf: an account
/// in manual mode or frozen must not be driven automatically.
pub trait AccountModeInspect<AccountId> {
  /// `who` may manage `account` (the account itself always qualifies).
  fn is_controller(account: &AccountId, who: &AccountId) -> bool;

  fn recoverer(account: &AccountId) -> Option<AccountId>;

  fn is_manual(account: &AccountId) -> bool;

  fn is_frozen(account: &AccountId) -> bool;

  fn may_automate(account: &AccountId) -> bool {
    !Self::is_manual(account) && !Self::is_frozen(account)
  }
}

/// No control plane configured: only the account controls itself.
impl<AccountId: PartialEq> AccountModeInspect<AccountId> for () {
  fn is_controller(account: &AccountId, who: &AccountId) -> bool {
    account == who
  }

  fn recoverer(_: &AccountId) -> Option<AccountId> {
    None
  }

  fn is_manual(_: &AccountId) -> bool {
    false
  }

  fn is_frozen(_: &AccountId) -> bool {
    false
  }
}
