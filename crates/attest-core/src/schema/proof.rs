use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// JSON form of a group membership proof.
///
/// Field elements are canonical decimal strings and path indices are `0`
/// (current node is a left child) or `1` (right child). Keys are camelCase so
/// the document can be handed to JavaScript provers unchanged.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MembershipProofDocument {
    /// Identifier of the group that produced the proof.
    pub group_id: u64,
    /// Depth of the group's tree.
    pub depth: u8,
    /// Number of members in the group when the proof was produced.
    pub size: u64,
    /// Tree root the proof commits to.
    pub root: String,
    /// The member (leaf) being proven.
    pub leaf: String,
    /// Sibling digests from the leaf level up to just below the root.
    pub path_elements: Vec<String>,
    /// Side of the current node at each level.
    pub path_indices: Vec<u8>,
}
