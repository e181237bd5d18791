use std::path::PathBuf;

use attest_core::base::format_field_element;
use eyre::bail;
use pasta_curves::pallas;
use tracing::{info, instrument, warn};

use super::members::load_group;
use crate::common::GroupConfig;

/// Rebuild a group and compare its root with an externally observed one,
/// such as a root published on chain.
///
/// # Errors
/// Returns an error if the member list cannot be loaded or the roots differ.
#[instrument(skip_all, fields(group_id = config.group_id))]
pub async fn reconcile_roots(
    config: GroupConfig,
    members_file: PathBuf,
    expected_root: pallas::Base,
) -> eyre::Result<()> {
    let group = load_group(config, &members_file).await?;
    let local = format_field_element(&group.root());

    if group.root() != expected_root {
        let expected = format_field_element(&expected_root);
        warn!(local = %local, expected = %expected, "Root mismatch");
        bail!("Rebuilt root {local} does not match expected root {expected}");
    }

    info!(root = %local, size = group.size(), "Root reconciled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::commands::members::test_support::{CONFIG, write_member_file};

    #[tokio::test]
    async fn matching_root_reconciles() {
        let dir = tempdir().expect("temp dir");
        let members = write_member_file(dir.path(), &["1", "2", "3"]);
        let expected = load_group(CONFIG, &members)
            .await
            .expect("group builds")
            .root();

        reconcile_roots(CONFIG, members, expected)
            .await
            .expect("roots agree");
    }

    #[tokio::test]
    async fn reordered_members_do_not_reconcile() {
        let dir = tempdir().expect("temp dir");
        let members = write_member_file(dir.path(), &["1", "2", "3"]);
        let expected = load_group(CONFIG, &members)
            .await
            .expect("group builds")
            .root();

        let reordered = write_member_file(dir.path(), &["2", "1", "3"]);
        let err = reconcile_roots(CONFIG, reordered, expected)
            .await
            .expect_err("roots differ");
        assert!(err.to_string().contains("does not match"));
    }
}
