use std::path::PathBuf;

use attest_core::base::format_field_element;
use attest_core::schema::group::GroupSnapshot;
use eyre::{Context as _, ensure};
use tracing::{info, instrument};

use super::members::load_group;
use crate::common::{GroupConfig, PoseidonGroup};

/// Rebuild a group from a member list and export its snapshot.
///
/// The incrementally maintained root is audited against a full rebuild
/// before anything is written.
///
/// # Errors
/// Returns an error if the member list cannot be loaded, the audit fails, or
/// the snapshot cannot be written.
#[instrument(skip_all, fields(group_id = config.group_id, depth = config.depth))]
pub async fn build_group_snapshot(
    config: GroupConfig,
    members_file: PathBuf,
    snapshot_out: PathBuf,
) -> eyre::Result<()> {
    let group = load_group(config, &members_file).await?;

    let root = group.root();
    let rebuilt = group.tree().rebuild_root();
    ensure!(
        root == rebuilt,
        "Incremental root {} disagrees with rebuilt root {}",
        format_field_element(&root),
        format_field_element(&rebuilt)
    );

    let snapshot = snapshot_of(&group);
    let json = serde_json::to_string_pretty(&snapshot)?;
    tokio::fs::write(&snapshot_out, json)
        .await
        .with_context(|| format!("Failed to write snapshot {}", snapshot_out.display()))?;

    info!(
        root = %snapshot.root,
        size = snapshot.size,
        file = ?snapshot_out,
        "Exported group snapshot"
    );
    Ok(())
}

fn snapshot_of(group: &PoseidonGroup) -> GroupSnapshot {
    GroupSnapshot {
        group_id: group.id(),
        depth: group.depth(),
        size: group.size(),
        root: format_field_element(&group.root()),
        members: group.members().iter().map(format_field_element).collect(),
    }
}
