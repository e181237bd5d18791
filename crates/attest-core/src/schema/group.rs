use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordered list of member commitments, as decimal or `0x`-hex strings.
///
/// Order is significant: it defines each member's leaf index.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct MemberList(pub Vec<String>);

impl MemberList {
    /// Number of members in the list.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the raw member strings in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a MemberList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<String> for MemberList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Snapshot of a group rebuilt from a member list.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    /// Group identifier.
    pub group_id: u64,
    /// Tree depth.
    pub depth: u8,
    /// Number of members.
    pub size: u64,
    /// Tree root as a decimal string.
    pub root: String,
    /// Members in canonical decimal form, in insertion order.
    pub members: MemberList,
}
