//! Group subcommands.

use std::path::PathBuf;

use pasta_curves::pallas;

use super::constants::{ATTEST_EXPECTED_ROOT, ATTEST_SNAPSHOT_OUT, DEFAULT_SNAPSHOT_FILE};
use super::{GroupArgs, parse_field};

/// Arguments for `group build`.
#[derive(Debug, clap::Args)]
pub struct GroupBuildArgs {
    /// Group and member list.
    #[command(flatten)]
    pub group: GroupArgs,
    /// Snapshot output file.
    #[arg(long, env = ATTEST_SNAPSHOT_OUT, default_value = DEFAULT_SNAPSHOT_FILE)]
    pub snapshot_out: PathBuf,
}

/// Arguments for `group reconcile`.
#[derive(Debug, clap::Args)]
pub struct GroupReconcileArgs {
    /// Group and member list.
    #[command(flatten)]
    pub group: GroupArgs,
    /// Root observed elsewhere (for example on chain), decimal or `0x` hex.
    #[arg(long, env = ATTEST_EXPECTED_ROOT, value_parser = parse_field)]
    pub expected_root: pallas::Base,
}

/// Group command group.
#[derive(Debug, clap::Subcommand)]
pub enum GroupCommands {
    /// Rebuild a group from its member list and export a snapshot.
    Build {
        #[command(flatten)]
        args: GroupBuildArgs,
    },
    /// Rebuild a group and check its root against an expected root.
    Reconcile {
        #[command(flatten)]
        args: GroupReconcileArgs,
    },
}
