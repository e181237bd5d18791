//! Groups: a membership tree bound to an identifier and depth.

use crate::error::MembershipError;
use crate::hasher::MerkleHasher;
use crate::proof::MembershipProof;
use crate::tree::MembershipTree;

/// A set of members whose proofs carry the group configuration.
///
/// Proofs generated by one group are only accepted by a group with the same
/// identifier, depth and size.
#[derive(Debug, Clone)]
pub struct Group<H: MerkleHasher> {
    id: u64,
    tree: MembershipTree<H>,
}

impl<H: MerkleHasher> Group<H> {
    /// Create an empty group.
    ///
    /// # Errors
    /// Returns [`MembershipError::InvalidDepth`] unless `1 <= depth <= 32`.
    pub fn new(id: u64, depth: u8, hasher: H) -> Result<Self, MembershipError> {
        Ok(Self {
            id,
            tree: MembershipTree::new(hasher, depth)?,
        })
    }

    /// Wrap an existing tree.
    #[must_use]
    pub const fn from_tree(id: u64, tree: MembershipTree<H>) -> Self {
        Self { id, tree }
    }

    /// Add a member. Returns its index.
    ///
    /// # Errors
    /// Returns [`MembershipError::TreeFull`] once the group holds `2^depth`
    /// members.
    pub fn add_member(&mut self, member: H::Field) -> Result<usize, MembershipError> {
        self.tree.insert(member)
    }

    /// Add members in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns [`MembershipError::TreeFull`] once capacity is reached.
    pub fn add_members<I>(&mut self, members: I) -> Result<(), MembershipError>
    where
        I: IntoIterator<Item = H::Field>,
    {
        self.tree.extend(members)
    }

    /// Authentication path for the member at `index`, tagged with this
    /// group's id, depth and size.
    ///
    /// # Errors
    /// Returns [`MembershipError::IndexOutOfRange`] if no member exists at
    /// `index`.
    pub fn generate_merkle_proof(
        &self,
        index: usize,
    ) -> Result<MembershipProof<H::Field>, MembershipError> {
        let proof = self.tree.generate_proof(index)?;
        Ok(MembershipProof {
            group_id: self.id,
            depth: self.depth(),
            size: self.size(),
            proof,
        })
    }

    /// Verify a proof against this group.
    ///
    /// Metadata mismatches are rejected before any hashing happens. The path
    /// is checked against the root carried by the proof, so callers that
    /// reconcile against this group must also compare that root with
    /// [`Self::root`].
    #[must_use]
    pub fn verify_proof(&self, proof: &MembershipProof<H::Field>) -> bool {
        if proof.group_id != self.id || proof.depth != self.depth() || proof.size != self.size() {
            return false;
        }
        self.tree.verify_proof(&proof.proof)
    }

    /// Index of the first occurrence of `member`.
    ///
    /// Linear scan.
    #[must_use]
    pub fn index_of(&self, member: &H::Field) -> Option<usize> {
        self.tree.leaves().iter().position(|leaf| leaf == member)
    }

    /// Whether `member` belongs to the group.
    #[must_use]
    pub fn contains(&self, member: &H::Field) -> bool {
        self.index_of(member).is_some()
    }

    /// Group identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Tree depth.
    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.tree.depth()
    }

    /// Number of members.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.tree.len()).unwrap_or(u64::MAX)
    }

    /// Current root.
    #[must_use]
    pub const fn root(&self) -> H::Field {
        self.tree.root()
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[H::Field] {
        self.tree.leaves()
    }

    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &MembershipTree<H> {
        &self.tree
    }
}
