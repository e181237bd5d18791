//! Serialized schema/data contracts.

/// Group snapshot and member list schema types.
pub mod group;
/// Membership proof schema types.
pub mod proof;
