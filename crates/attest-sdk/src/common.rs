//! CLI-independent configuration types.

use attest_membership::{Group, PoseidonHasher};
use pasta_curves::pallas;

/// The group type every command operates on.
pub type PoseidonGroup = Group<PoseidonHasher>;

/// Group parameters shared by every command.
///
/// Producers and verifiers must agree on all three values, otherwise the
/// rebuilt roots differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupConfig {
    /// Group identifier embedded in every proof.
    pub group_id: u64,
    /// Tree depth.
    pub depth: u8,
    /// Empty-leaf value.
    pub zero_value: pallas::Base,
}

/// How a proof's member is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSelector {
    /// The first leaf equal to this value.
    Member(pallas::Base),
    /// The leaf at this index.
    Index(usize),
}
