//! Incremental membership Merkle tree.
//!
//! Leaves are appended left to right. Each level keeps a densely packed vector
//! of the digests known so far; positions past the end of a level stand for
//! the empty-subtree digest of that level. Inserting a leaf recomputes only the
//! `depth` ancestors on its path to the root.

#![allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    reason = "Level and position math is bounded by the depth check in the constructor and the capacity check in insert"
)]

use ff::Field as _;

use crate::error::MembershipError;
use crate::hasher::MerkleHasher;
use crate::proof::{MerkleProof, PathSide};

/// Largest supported tree depth.
pub const MAX_TREE_DEPTH: u8 = 32;

/// Append-only Merkle tree of field elements with a fixed depth.
#[derive(Debug, Clone)]
pub struct MembershipTree<H: MerkleHasher> {
    hasher: H,
    depth: u8,
    zero_value: H::Field,
    /// `[0]` is the zero value, `[i]` is `H([i-1], [i-1])`. Length is `depth`.
    empty_subtree_digests: Vec<H::Field>,
    /// `layers[0]` holds the leaves, `layers[depth]` holds the root once any
    /// leaf exists.
    layers: Vec<Vec<H::Field>>,
    root: H::Field,
}

impl<H: MerkleHasher> MembershipTree<H> {
    /// Create an empty tree whose empty leaves are the field zero.
    ///
    /// # Errors
    /// Returns [`MembershipError::InvalidDepth`] unless `1 <= depth <= 32`.
    pub fn new(hasher: H, depth: u8) -> Result<Self, MembershipError> {
        Self::with_zero_value(hasher, depth, H::Field::ZERO)
    }

    /// Create an empty tree with a custom empty-leaf value.
    ///
    /// # Errors
    /// Returns [`MembershipError::InvalidDepth`] unless `1 <= depth <= 32`.
    pub fn with_zero_value(
        hasher: H,
        depth: u8,
        zero_value: H::Field,
    ) -> Result<Self, MembershipError> {
        if !(1..=MAX_TREE_DEPTH).contains(&depth) {
            return Err(MembershipError::InvalidDepth(depth));
        }

        let levels = usize::from(depth);
        let mut empty_subtree_digests = Vec::with_capacity(levels);
        let mut digest = zero_value;
        empty_subtree_digests.push(digest);
        for _ in 1..levels {
            digest = hasher.hash(&digest, &digest);
            empty_subtree_digests.push(digest);
        }

        let root = empty_subtree_digests[levels - 1];
        Ok(Self {
            hasher,
            depth,
            zero_value,
            empty_subtree_digests,
            layers: vec![Vec::new(); levels + 1],
            root,
        })
    }

    /// Create a tree and insert `leaves` in order.
    ///
    /// # Errors
    /// Returns an error if the depth is invalid or the leaves exceed capacity.
    pub fn from_leaves<I>(
        hasher: H,
        depth: u8,
        zero_value: H::Field,
        leaves: I,
    ) -> Result<Self, MembershipError>
    where
        I: IntoIterator<Item = H::Field>,
    {
        let mut tree = Self::with_zero_value(hasher, depth, zero_value)?;
        tree.extend(leaves)?;
        Ok(tree)
    }

    /// Append a leaf and refresh its ancestors. Returns the leaf index.
    ///
    /// # Errors
    /// Returns [`MembershipError::TreeFull`] if the tree already holds
    /// `2^depth` leaves. The tree is unchanged on error.
    pub fn insert(&mut self, leaf: H::Field) -> Result<usize, MembershipError> {
        if self.is_full() {
            return Err(MembershipError::TreeFull {
                capacity: self.capacity(),
            });
        }

        let index = self.len();
        self.layers[0].push(leaf);

        let mut current = index;
        for level in 1..=usize::from(self.depth) {
            let position = current / 2;
            let children = &self.layers[level - 1];
            let left = children[2 * position];
            let right = children
                .get(2 * position + 1)
                .copied()
                .unwrap_or(self.empty_subtree_digests[level - 1]);
            let node = self.hasher.hash(&left, &right);

            let parents = &mut self.layers[level];
            if let Some(slot) = parents.get_mut(position) {
                *slot = node;
            } else {
                parents.push(node);
            }
            current = position;
        }

        self.root = self.layers[usize::from(self.depth)][0];
        Ok(index)
    }

    /// Insert every leaf in order, stopping at the first failure.
    ///
    /// Leaves inserted before the failure stay in the tree.
    ///
    /// # Errors
    /// Returns [`MembershipError::TreeFull`] once capacity is reached.
    pub fn extend<I>(&mut self, leaves: I) -> Result<(), MembershipError>
    where
        I: IntoIterator<Item = H::Field>,
    {
        for leaf in leaves {
            self.insert(leaf)?;
        }
        Ok(())
    }

    /// Produce the authentication path for the leaf at `index`.
    ///
    /// # Errors
    /// Returns [`MembershipError::IndexOutOfRange`] if no leaf exists at `index`.
    pub fn generate_proof(&self, index: usize) -> Result<MerkleProof<H::Field>, MembershipError> {
        let leaf = *self
            .leaves()
            .get(index)
            .ok_or(MembershipError::IndexOutOfRange {
                index,
                size: self.len(),
            })?;

        let levels = usize::from(self.depth);
        let mut path_elements = Vec::with_capacity(levels);
        let mut path_indices = Vec::with_capacity(levels);
        let mut current = index;
        for level in 0..levels {
            let sibling = self.layers[level]
                .get(current ^ 1)
                .copied()
                .unwrap_or(self.empty_subtree_digests[level]);
            path_elements.push(sibling);
            path_indices.push(PathSide::of_index(current));
            current /= 2;
        }

        Ok(MerkleProof {
            root: self.root,
            leaf,
            path_elements,
            path_indices,
        })
    }

    /// Check that `proof` leads from its leaf to its root.
    ///
    /// Only the hasher and depth of this tree are used, so proofs produced by
    /// any tree of the same depth and hash function are accepted. A path whose
    /// length differs from the depth is rejected.
    #[must_use]
    pub fn verify_proof(&self, proof: &MerkleProof<H::Field>) -> bool {
        let levels = usize::from(self.depth);
        if proof.path_elements.len() != levels || proof.path_indices.len() != levels {
            return false;
        }
        proof.compute_root(&self.hasher) == proof.root
    }

    /// Recompute the root from the leaves alone, rebuilding every level.
    ///
    /// This is the slow reference algorithm; it always agrees with
    /// [`Self::root`].
    #[must_use]
    pub fn rebuild_root(&self) -> H::Field {
        let mut layer = self.leaves().to_vec();
        for empty in &self.empty_subtree_digests {
            layer = layer
                .chunks(2)
                .filter_map(|pair| {
                    let left = pair.first()?;
                    let right = pair.get(1).unwrap_or(empty);
                    Some(self.hasher.hash(left, right))
                })
                .collect();
        }
        layer.first().copied().unwrap_or_else(|| self.empty_root())
    }

    /// Current root.
    #[must_use]
    pub const fn root(&self) -> H::Field {
        self.root
    }

    /// Root reported while the tree has no leaves.
    #[must_use]
    pub fn empty_root(&self) -> H::Field {
        self.empty_subtree_digests[usize::from(self.depth) - 1]
    }

    /// Tree depth.
    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Empty-leaf value.
    #[must_use]
    pub const fn zero_value(&self) -> H::Field {
        self.zero_value
    }

    /// Empty-subtree digest for `level`, if `level < depth`.
    #[must_use]
    pub fn empty_subtree_digest(&self, level: usize) -> Option<H::Field> {
        self.empty_subtree_digests.get(level).copied()
    }

    /// All empty-subtree digests, leaf level first.
    #[must_use]
    pub fn empty_subtree_digests(&self) -> &[H::Field] {
        &self.empty_subtree_digests
    }

    /// Leaves in insertion order.
    #[must_use]
    pub fn leaves(&self) -> &[H::Field] {
        &self.layers[0]
    }

    /// Number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    /// Whether the tree has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Maximum number of leaves, `2^depth`.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        1_u64 << self.depth
    }

    /// Whether another insert would fail.
    #[must_use]
    pub fn is_full(&self) -> bool {
        u64::try_from(self.len()).map_or(true, |len| len >= self.capacity())
    }

    /// The hasher combining nodes of this tree.
    #[must_use]
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use ff::Field as _;
    use pasta_curves::pallas;

    use super::*;
    use crate::PoseidonHasher;

    fn fe(value: u64) -> pallas::Base {
        pallas::Base::from(value)
    }

    /// Linear hash so expected roots can be computed by hand:
    /// `H(l, r) = 3l + 5r + 1`. Counts invocations.
    #[derive(Debug, Default)]
    struct CountingHasher {
        calls: Cell<usize>,
    }

    impl MerkleHasher for CountingHasher {
        type Field = pallas::Base;

        fn hash(&self, left: &pallas::Base, right: &pallas::Base) -> pallas::Base {
            self.calls.set(self.calls.get() + 1);
            fe(3) * left + fe(5) * right + pallas::Base::ONE
        }
    }

    #[test]
    fn rejects_invalid_depth() {
        assert_eq!(
            MembershipTree::new(PoseidonHasher, 0).map(|tree| tree.depth()),
            Err(MembershipError::InvalidDepth(0))
        );
        assert_eq!(
            MembershipTree::new(PoseidonHasher, 33).map(|tree| tree.depth()),
            Err(MembershipError::InvalidDepth(33))
        );
        assert!(MembershipTree::new(PoseidonHasher, 1).is_ok());
        assert!(MembershipTree::new(PoseidonHasher, 32).is_ok());
    }

    #[test]
    fn empty_subtree_digests_chain() {
        let hasher = PoseidonHasher;
        let tree = MembershipTree::with_zero_value(hasher, 4, fe(9)).expect("valid depth");

        let digests = tree.empty_subtree_digests();
        assert_eq!(digests.len(), 4);
        assert_eq!(digests[0], fe(9));
        for level in 1..4 {
            assert_eq!(
                digests[level],
                hasher.hash(&digests[level - 1], &digests[level - 1])
            );
        }
        assert_eq!(tree.empty_subtree_digest(4), None);
    }

    #[test]
    fn empty_tree_root_is_top_empty_digest() {
        let tree = MembershipTree::new(PoseidonHasher, 5).expect("valid depth");
        assert!(tree.is_empty());
        assert_eq!(Some(tree.root()), tree.empty_subtree_digest(4));
        assert_eq!(tree.rebuild_root(), tree.root());
    }

    #[test]
    fn root_matches_hand_computation() {
        let hasher = CountingHasher::default();
        let mut tree = MembershipTree::new(&hasher, 2).expect("valid depth");
        let one = |l: pallas::Base, r: pallas::Base| fe(3) * l + fe(5) * r + pallas::Base::ONE;

        // Level-1 empty digest: H(0, 0) = 1.
        assert_eq!(tree.empty_subtree_digest(1), Some(fe(1)));

        tree.insert(fe(1)).expect("room for leaf");
        let expected = one(one(fe(1), fe(0)), fe(1));
        assert_eq!(tree.root(), expected);

        tree.insert(fe(2)).expect("room for leaf");
        tree.insert(fe(3)).expect("room for leaf");
        let expected = one(one(fe(1), fe(2)), one(fe(3), fe(0)));
        assert_eq!(tree.root(), expected);
    }

    #[test]
    fn insert_only_touches_the_leaf_path() {
        let hasher = CountingHasher::default();
        let mut tree = MembershipTree::new(&hasher, 10).expect("valid depth");
        let after_setup = hasher.calls.get();

        for value in 0..20 {
            tree.insert(fe(value)).expect("room for leaf");
        }
        assert_eq!(hasher.calls.get() - after_setup, 20 * 10);
    }

    #[test]
    fn incremental_root_matches_rebuild_after_each_insert() {
        let mut tree = MembershipTree::new(PoseidonHasher, 4).expect("valid depth");
        for value in 1..=16 {
            tree.insert(fe(value * 7)).expect("room for leaf");
            assert_eq!(tree.root(), tree.rebuild_root());
        }
    }

    #[test]
    fn capacity_boundary() {
        let mut tree = MembershipTree::new(PoseidonHasher, 3).expect("valid depth");
        assert_eq!(tree.capacity(), 8);
        for value in 0..8 {
            assert_eq!(tree.insert(fe(value)), Ok(usize::try_from(value).expect("small")));
        }
        assert!(tree.is_full());

        let root = tree.root();
        assert_eq!(
            tree.insert(fe(99)),
            Err(MembershipError::TreeFull { capacity: 8 })
        );
        assert_eq!(tree.len(), 8);
        assert_eq!(tree.root(), root);
    }

    #[test]
    fn extend_stops_at_capacity() {
        let mut tree = MembershipTree::new(PoseidonHasher, 1).expect("valid depth");
        let result = tree.extend([fe(1), fe(2), fe(3)]);
        assert_eq!(result, Err(MembershipError::TreeFull { capacity: 2 }));
        assert_eq!(tree.leaves(), &[fe(1), fe(2)]);
    }

    #[test]
    fn proofs_round_trip_for_every_index() {
        let tree =
            MembershipTree::from_leaves(PoseidonHasher, 4, pallas::Base::ZERO, (1..=11).map(fe))
                .expect("leaves fit");
        for index in 0..tree.len() {
            let proof = tree.generate_proof(index).expect("leaf exists");
            assert_eq!(proof.path_elements.len(), 4);
            assert_eq!(proof.leaf, tree.leaves()[index]);
            assert!(tree.verify_proof(&proof), "proof for index {index}");
        }
    }

    #[test]
    fn proof_out_of_range() {
        let mut tree = MembershipTree::new(PoseidonHasher, 4).expect("valid depth");
        assert_eq!(
            tree.generate_proof(0),
            Err(MembershipError::IndexOutOfRange { index: 0, size: 0 })
        );
        tree.insert(fe(1)).expect("room for leaf");
        assert_eq!(
            tree.generate_proof(1),
            Err(MembershipError::IndexOutOfRange { index: 1, size: 1 })
        );
    }

    #[test]
    fn tampered_proofs_fail() {
        let tree =
            MembershipTree::from_leaves(PoseidonHasher, 4, pallas::Base::ZERO, (1..=6).map(fe))
                .expect("leaves fit");
        let proof = tree.generate_proof(5).expect("leaf exists");
        assert!(tree.verify_proof(&proof));

        let mut bad = proof.clone();
        bad.leaf = fe(1000);
        assert!(!tree.verify_proof(&bad));

        let mut bad = proof.clone();
        bad.root = fe(1000);
        assert!(!tree.verify_proof(&bad));

        for level in 0..4 {
            let mut bad = proof.clone();
            bad.path_elements[level] += pallas::Base::ONE;
            assert!(!tree.verify_proof(&bad), "element {level}");

            let mut bad = proof.clone();
            bad.path_indices[level] = bad.path_indices[level].flipped();
            assert!(!tree.verify_proof(&bad), "index {level}");
        }

        let mut short = proof;
        short.path_elements.pop();
        short.path_indices.pop();
        assert!(!tree.verify_proof(&short));
    }

    #[test]
    fn independent_trees_agree() {
        let leaves: Vec<_> = [5_u64, 8, 13, 21, 34].into_iter().map(fe).collect();
        let hasher = PoseidonHasher;
        let a = MembershipTree::from_leaves(&hasher, 20, pallas::Base::ZERO, leaves.clone())
            .expect("leaves fit");
        let b = MembershipTree::from_leaves(hasher, 20, pallas::Base::ZERO, leaves)
            .expect("leaves fit");
        assert_eq!(a.root(), b.root());

        let proof = a.generate_proof(3).expect("leaf exists");
        assert!(b.verify_proof(&proof));
    }

    #[test]
    fn zero_value_changes_roots() {
        let a = MembershipTree::from_leaves(PoseidonHasher, 3, pallas::Base::ZERO, [fe(1)])
            .expect("leaves fit");
        let b = MembershipTree::from_leaves(PoseidonHasher, 3, fe(42), [fe(1)])
            .expect("leaves fit");
        assert_ne!(a.root(), b.root());
        assert_eq!(b.zero_value(), fe(42));
    }
}
