//! Attest CLI Application

mod cli;

use attest_sdk::commands::{
    build_group_snapshot, generate_membership_proof, print_schemas, reconcile_roots,
    verify_membership_proof,
};
use attest_sdk::common::MemberSelector;
use clap::Parser as _;
use cli::{Cli, Commands, GroupCommands, ProofCommands};

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Group { command } => match command {
            GroupCommands::Build { args } => {
                build_group_snapshot((&args.group).into(), args.group.members, args.snapshot_out)
                    .await
            }
            GroupCommands::Reconcile { args } => {
                reconcile_roots(
                    (&args.group).into(),
                    args.group.members,
                    args.expected_root,
                )
                .await
            }
        },
        Commands::Proof { command } => match command {
            ProofCommands::Generate { args } => match MemberSelector::try_from(args.selector) {
                Ok(selector) => {
                    generate_membership_proof(
                        (&args.group).into(),
                        args.group.members,
                        selector,
                        args.proof_out,
                    )
                    .await
                }
                Err(e) => Err(e),
            },
            ProofCommands::Verify { args } => {
                verify_membership_proof((&args.group).into(), args.group.members, args.proof_in)
                    .await
            }
        },
        Commands::Schema => print_schemas(),
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
