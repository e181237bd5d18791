//! Membership tree errors.

use attest_core::base::FieldElementError;
use thiserror::Error;

/// Errors that can occur when building or querying a membership tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The requested depth is outside `1..=32`.
    #[error("Tree depth must be between 1 and 32, got {0}")]
    InvalidDepth(u8),

    /// The tree already holds `2^depth` leaves.
    #[error("Tree is full: capacity of {capacity} leaves reached")]
    TreeFull {
        /// Maximum number of leaves for the tree depth.
        capacity: u64,
    },

    /// No leaf exists at the requested index.
    #[error("Leaf index {index} is out of range for a tree of {size} leaves")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of leaves currently in the tree.
        size: usize,
    },

    /// A proof document has mismatched path lengths.
    #[error("Proof path has {elements} elements but {indices} indices")]
    InvalidPathLength {
        /// Number of path elements.
        elements: usize,
        /// Number of path indices.
        indices: usize,
    },

    /// A proof document field is not a valid field element or path index.
    #[error("Invalid proof field: {0}")]
    FieldElement(#[from] FieldElementError),
}
