//! Loading member lists and rebuilding groups from them.

use std::path::Path;

use attest_core::base::parse_field_element;
use attest_core::schema::group::MemberList;
use attest_membership::{Group, MembershipTree, PoseidonHasher};
use eyre::Context as _;
use pasta_curves::pallas;
use tracing::{debug, info, instrument};

use crate::common::{GroupConfig, PoseidonGroup};

/// Read a JSON member list and parse every entry as a field element.
///
/// # Errors
/// Returns an error if the file cannot be read, is not a JSON array of
/// strings, or holds an entry that is not a field element.
#[instrument(skip_all, fields(file = %path.display()))]
pub async fn load_members(path: &Path) -> eyre::Result<Vec<pallas::Base>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read member list {}", path.display()))?;
    let list: MemberList = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse member list {}", path.display()))?;

    let members = list
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let member = parse_field_element(raw)
                .with_context(|| format!("Invalid member at index {index}: {raw:?}"))?;
            debug!(index, member = %raw, "Parsed member");
            Ok(member)
        })
        .collect::<eyre::Result<Vec<_>>>()?;

    info!(count = members.len(), "Loaded members");
    Ok(members)
}

/// Insert `members` in order into a fresh group.
///
/// # Errors
/// Returns an error if the depth is invalid or the members exceed the
/// group's capacity.
pub async fn build_group(
    config: GroupConfig,
    members: Vec<pallas::Base>,
) -> eyre::Result<PoseidonGroup> {
    let group = tokio::task::spawn_blocking(move || -> eyre::Result<PoseidonGroup> {
        let tree = MembershipTree::from_leaves(
            PoseidonHasher,
            config.depth,
            config.zero_value,
            members,
        )?;
        Ok(Group::from_tree(config.group_id, tree))
    })
    .await??;

    info!(
        group_id = group.id(),
        depth = group.depth(),
        size = group.size(),
        "Built group"
    );
    Ok(group)
}

/// Load a member list and rebuild its group.
///
/// # Errors
/// See [`load_members`] and [`build_group`].
pub async fn load_group(config: GroupConfig, path: &Path) -> eyre::Result<PoseidonGroup> {
    let members = load_members(path).await?;
    build_group(config, members).await
}

#[cfg(test)]
pub mod test_support {
    use std::path::{Path, PathBuf};

    use ff::Field as _;
    use pasta_curves::pallas;

    use crate::common::GroupConfig;

    pub const CONFIG: GroupConfig = GroupConfig {
        group_id: 1,
        depth: 8,
        zero_value: pallas::Base::ZERO,
    };

    pub fn write_member_file(dir: &Path, members: &[&str]) -> PathBuf {
        let path = dir.join("members.json");
        let json = serde_json::to_string(members).expect("members serialize");
        std::fs::write(&path, json).expect("member file written");
        path
    }
}
