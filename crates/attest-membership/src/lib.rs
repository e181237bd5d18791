//! Incremental membership Merkle tree utilities.
//!
//! A [`MembershipTree`] keeps an append-only list of field-element leaves and
//! refreshes only the path from each new leaf to the root. A [`Group`] binds a
//! tree to an identifier so proofs produced for one group configuration are
//! rejected by another.

mod error;
mod group;
mod hasher;
mod proof;
mod tree;

pub use error::MembershipError;
pub use group::Group;
pub use hasher::{MerkleHasher, PoseidonHasher};
pub use proof::{MembershipProof, MerkleProof, PathSide};
pub use tree::{MAX_TREE_DEPTH, MembershipTree};
