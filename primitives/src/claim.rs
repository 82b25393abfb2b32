//! Claim wire format submitted to the assertion oracle.
//!
//! The claim is an ancillary-data style key/value string:
//!
//! `proposalHash:<hex>,explanation:<bytes>,rules:"<bytes>"`
//!
//! The hash is lowercase hex without a `0x` prefix. Explanation and rules are
//! copied verbatim. Oracle deployments compare claims byte for byte, so this
//! layout is fixed.

use alloc::vec::Vec;

pub const PROPOSAL_HASH_KEY: &[u8] = b"proposalHash";
pub const EXPLANATION_KEY: &[u8] = b"explanation";
pub const RULES_KEY: &[u8] = b"rules";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Builds the claim bound to a proposal.
pub fn construct_claim(proposal_hash: &[u8], explanation: &[u8], rules: &[u8]) -> Vec<u8> {
  let mut claim = Vec::with_capacity(
    PROPOSAL_HASH_KEY.len()
      + proposal_hash.len() * 2
      + EXPLANATION_KEY.len()
      + explanation.len()
      + RULES_KEY.len()
      + rules.len()
      + 8,
  );
  claim.extend_from_slice(PROPOSAL_HASH_KEY);
  claim.push(b':');
  for byte in proposal_hash {
    claim.push(HEX[(byte >> 4) as usize]);
    claim.push(HEX[(byte & 0x0f) as usize]);
  }
  claim.push(b',');
  claim.extend_from_slice(EXPLANATION_KEY);
  claim.push(b':');
  claim.extend_from_slice(explanation);
  claim.push(b',');
  claim.extend_from_slice(RULES_KEY);
  claim.extend_from_slice(b":\"");
  claim.extend_from_slice(rules);
  claim.push(b'"');
  claim
}
