//! Command-line interface for the `attest` CLI application.

pub mod constants;
mod group;
mod proof;

use std::path::PathBuf;

use attest_core::base::parse_field_element;
use attest_membership::MAX_TREE_DEPTH;
use attest_sdk::common::GroupConfig;
use clap::Parser;
use eyre::{Result, ensure, eyre};
use pasta_curves::pallas;

use self::constants::{
    ATTEST_DEPTH, ATTEST_GROUP_ID, ATTEST_MEMBERS_FILE, ATTEST_ZERO_VALUE, DEFAULT_DEPTH,
    DEFAULT_GROUP_ID, DEFAULT_ZERO_VALUE,
};
pub use self::group::GroupCommands;
pub use self::proof::ProofCommands;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(name = "attest")]
#[command(about = "Group membership trees and proofs")]
pub struct Cli {
    /// CLI top-level command group.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Group construction and root reconciliation.
    Group {
        /// Group subcommands.
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Membership proof generation and verification.
    Proof {
        /// Proof subcommands.
        #[command(subcommand)]
        command: ProofCommands,
    },
    /// Print the JSON schemas of the documents the CLI reads and writes.
    Schema,
}

/// Arguments identifying a group and its member list.
#[derive(Debug, clap::Args)]
pub struct GroupArgs {
    /// JSON array of member commitments, in insertion order.
    #[arg(long, env = ATTEST_MEMBERS_FILE)]
    pub members: PathBuf,
    /// Group identifier embedded in every proof.
    #[arg(long, env = ATTEST_GROUP_ID, default_value = DEFAULT_GROUP_ID)]
    pub group_id: u64,
    /// Tree depth (1 to 32).
    #[arg(
        long,
        env = ATTEST_DEPTH,
        default_value = DEFAULT_DEPTH,
        value_parser = parse_depth
    )]
    pub depth: u8,
    /// Empty-leaf value, decimal or `0x`-prefixed hex.
    #[arg(
        long,
        env = ATTEST_ZERO_VALUE,
        default_value = DEFAULT_ZERO_VALUE,
        value_parser = parse_field
    )]
    pub zero_value: pallas::Base,
}

impl From<&GroupArgs> for GroupConfig {
    fn from(args: &GroupArgs) -> Self {
        Self {
            group_id: args.group_id,
            depth: args.depth,
            zero_value: args.zero_value,
        }
    }
}

/// Parse a tree depth in `1..=MAX_TREE_DEPTH`.
pub fn parse_depth(s: &str) -> Result<u8> {
    let depth: u8 = s
        .trim()
        .parse()
        .map_err(|e| eyre!("Invalid depth: {s}. {e}"))?;
    ensure!(
        (1..=MAX_TREE_DEPTH).contains(&depth),
        "Depth must be between 1 and {MAX_TREE_DEPTH}, got {depth}"
    );
    Ok(depth)
}

/// Parse a decimal or `0x` hex field element.
pub fn parse_field(s: &str) -> Result<pallas::Base> {
    parse_field_element(s).map_err(|e| eyre!("Invalid field element {s:?}: {e}"))
}
