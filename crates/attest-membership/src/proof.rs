//! Membership proof types and their JSON document form.

use attest_core::base::{FieldElementError, format_field_element, parse_field_element};
use attest_core::schema::proof::MembershipProofDocument;
use ff::PrimeField;

use crate::MerkleHasher;
use crate::error::MembershipError;

/// Which side of its parent a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSide {
    /// The node is a left child (index `0`).
    Left,
    /// The node is a right child (index `1`).
    Right,
}

impl PathSide {
    /// Side of the node at `index` within its level.
    #[must_use]
    pub const fn of_index(index: usize) -> Self {
        if index.is_multiple_of(2) {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// The opposite side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl From<PathSide> for u8 {
    fn from(side: PathSide) -> Self {
        match side {
            PathSide::Left => 0,
            PathSide::Right => 1,
        }
    }
}

impl TryFrom<u8> for PathSide {
    type Error = FieldElementError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Right),
            other => Err(FieldElementError::InvalidPathIndex(other)),
        }
    }
}

/// Authentication path for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof<F> {
    /// Root the path leads to.
    pub root: F,
    /// The proven leaf.
    pub leaf: F,
    /// Sibling digests, leaf level first.
    pub path_elements: Vec<F>,
    /// Side of the current node at each level, leaf level first.
    pub path_indices: Vec<PathSide>,
}

impl<F: PrimeField> MerkleProof<F> {
    /// Fold the leaf through the path and return the resulting root.
    ///
    /// Pairs `path_elements` with `path_indices`; any surplus entries in the
    /// longer of the two are ignored, so callers should check lengths first.
    pub fn compute_root<H>(&self, hasher: &H) -> F
    where
        H: MerkleHasher<Field = F> + ?Sized,
    {
        self.path_elements
            .iter()
            .zip(&self.path_indices)
            .fold(self.leaf, |candidate, (sibling, side)| match side {
                PathSide::Left => hasher.hash(&candidate, sibling),
                PathSide::Right => hasher.hash(sibling, &candidate),
            })
    }
}

/// A tree proof bound to the group configuration that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipProof<F> {
    /// Identifier of the producing group.
    pub group_id: u64,
    /// Depth of the producing group's tree.
    pub depth: u8,
    /// Group size when the proof was produced.
    pub size: u64,
    /// The authentication path.
    pub proof: MerkleProof<F>,
}

impl<F: PrimeField> MembershipProof<F> {
    /// Convert into the JSON document form.
    #[must_use]
    pub fn to_document(&self) -> MembershipProofDocument {
        MembershipProofDocument {
            group_id: self.group_id,
            depth: self.depth,
            size: self.size,
            root: format_field_element(&self.proof.root),
            leaf: format_field_element(&self.proof.leaf),
            path_elements: self
                .proof
                .path_elements
                .iter()
                .map(format_field_element)
                .collect(),
            path_indices: self
                .proof
                .path_indices
                .iter()
                .copied()
                .map(u8::from)
                .collect(),
        }
    }

    /// Parse a JSON document into a typed proof.
    ///
    /// # Errors
    /// Returns an error if any field element is malformed or out of the field,
    /// a path index is not 0 or 1, or the two path vectors differ in length.
    pub fn from_document(document: &MembershipProofDocument) -> Result<Self, MembershipError> {
        if document.path_elements.len() != document.path_indices.len() {
            return Err(MembershipError::InvalidPathLength {
                elements: document.path_elements.len(),
                indices: document.path_indices.len(),
            });
        }

        let path_elements = document
            .path_elements
            .iter()
            .map(|element| parse_field_element(element))
            .collect::<Result<Vec<F>, _>>()?;
        let path_indices = document
            .path_indices
            .iter()
            .copied()
            .map(PathSide::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            group_id: document.group_id,
            depth: document.depth,
            size: document.size,
            proof: MerkleProof {
                root: parse_field_element(&document.root)?,
                leaf: parse_field_element(&document.leaf)?,
                path_elements,
                path_indices,
            },
        })
    }
}
