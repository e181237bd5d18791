//! Proof subcommands.

use std::path::PathBuf;

use attest_sdk::common::MemberSelector;
use eyre::eyre;
use pasta_curves::pallas;

use super::constants::{
    ATTEST_INDEX, ATTEST_MEMBER, ATTEST_PROOF_IN, ATTEST_PROOF_OUT, DEFAULT_PROOF_FILE,
};
use super::{GroupArgs, parse_field};

/// Member to prove: either its value or its leaf index.
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct SelectorArgs {
    /// Member commitment, decimal or `0x` hex. The first matching leaf is used.
    #[arg(long, env = ATTEST_MEMBER, value_parser = parse_field)]
    pub member: Option<pallas::Base>,
    /// Leaf index of the member.
    #[arg(long, env = ATTEST_INDEX)]
    pub index: Option<usize>,
}

impl TryFrom<SelectorArgs> for MemberSelector {
    type Error = eyre::Report;

    fn try_from(args: SelectorArgs) -> Result<Self, Self::Error> {
        match (args.member, args.index) {
            (Some(member), None) => Ok(Self::Member(member)),
            (None, Some(index)) => Ok(Self::Index(index)),
            (Some(_), Some(_)) => Err(eyre!("Only one of --member or --index may be given")),
            (None, None) => Err(eyre!("One of --member or --index is required")),
        }
    }
}

/// Arguments for `proof generate`.
#[derive(Debug, clap::Args)]
pub struct ProofGenerateArgs {
    /// Group and member list.
    #[command(flatten)]
    pub group: GroupArgs,
    /// Member selection.
    #[command(flatten)]
    pub selector: SelectorArgs,
    /// Proof output file.
    #[arg(long, env = ATTEST_PROOF_OUT, default_value = DEFAULT_PROOF_FILE)]
    pub proof_out: PathBuf,
}

/// Arguments for `proof verify`.
#[derive(Debug, clap::Args)]
pub struct ProofVerifyArgs {
    /// Group and member list.
    #[command(flatten)]
    pub group: GroupArgs,
    /// Proof input file.
    #[arg(long, env = ATTEST_PROOF_IN, default_value = DEFAULT_PROOF_FILE)]
    pub proof_in: PathBuf,
}

/// Proof command group.
#[derive(Debug, clap::Subcommand)]
pub enum ProofCommands {
    /// Generate a membership proof for one member.
    Generate {
        #[command(flatten)]
        args: ProofGenerateArgs,
    },
    /// Verify a membership proof against a rebuilt group.
    Verify {
        #[command(flatten)]
        args: ProofVerifyArgs,
    },
}
