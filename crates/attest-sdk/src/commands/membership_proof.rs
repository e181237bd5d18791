use std::path::PathBuf;

use attest_core::base::format_field_element;
use attest_core::schema::proof::MembershipProofDocument;
use attest_membership::MembershipProof;
use eyre::{Context as _, ContextCompat as _, ensure};
use pasta_curves::pallas;
use tracing::{info, instrument, warn};

use super::members::load_group;
use crate::common::{GroupConfig, MemberSelector, PoseidonGroup};

/// Generate a membership proof for one member and write it as JSON.
///
/// # Errors
/// Returns an error if the member list cannot be loaded, the selected member
/// does not exist, or the proof cannot be written.
#[instrument(skip_all, fields(group_id = config.group_id, selector = ?selector))]
pub async fn generate_membership_proof(
    config: GroupConfig,
    members_file: PathBuf,
    selector: MemberSelector,
    proof_out: PathBuf,
) -> eyre::Result<()> {
    let group = load_group(config, &members_file).await?;

    let index = match selector {
        MemberSelector::Index(index) => index,
        MemberSelector::Member(member) => group.index_of(&member).with_context(|| {
            format!(
                "{} is not a member of group {}",
                format_field_element(&member),
                group.id()
            )
        })?,
    };

    let document = group.generate_merkle_proof(index)?.to_document();
    let json = serde_json::to_string_pretty(&document)?;
    tokio::fs::write(&proof_out, json)
        .await
        .with_context(|| format!("Failed to write proof {}", proof_out.display()))?;

    info!(
        index,
        leaf = %document.leaf,
        root = %document.root,
        file = ?proof_out,
        "Exported membership proof"
    );
    Ok(())
}

/// Verify a membership proof against a group rebuilt from a member list.
///
/// The proof must lead to the rebuilt group's root; a path that is merely
/// consistent with the root written in the proof is rejected.
///
/// # Errors
/// Returns an error if either file cannot be read or parsed, or the proof does
/// not verify.
#[instrument(skip_all, fields(group_id = config.group_id, proof = %proof_in.display()))]
pub async fn verify_membership_proof(
    config: GroupConfig,
    members_file: PathBuf,
    proof_in: PathBuf,
) -> eyre::Result<()> {
    let contents = tokio::fs::read_to_string(&proof_in)
        .await
        .with_context(|| format!("Failed to read proof {}", proof_in.display()))?;
    let document: MembershipProofDocument = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse proof {}", proof_in.display()))?;
    let proof = MembershipProof::<pallas::Base>::from_document(&document)
        .context("Malformed membership proof")?;

    let group = load_group(config, &members_file).await?;
    report_mismatches(&group, &proof);

    ensure!(
        proof.proof.root == group.root(),
        "Proof root {} differs from rebuilt root {}",
        document.root,
        format_field_element(&group.root())
    );
    ensure!(
        group.verify_proof(&proof),
        "Membership proof is not valid for group {}",
        group.id()
    );

    info!(leaf = %document.leaf, root = %document.root, "Membership proof verified");
    Ok(())
}

fn report_mismatches(group: &PoseidonGroup, proof: &MembershipProof<pallas::Base>) {
    if proof.group_id != group.id() {
        warn!(
            expected = group.id(),
            actual = proof.group_id,
            "Proof was produced by another group"
        );
    }
    if proof.depth != group.depth() {
        warn!(
            expected = group.depth(),
            actual = proof.depth,
            "Proof depth differs"
        );
    }
    if proof.size != group.size() {
        warn!(
            expected = group.size(),
            actual = proof.size,
            "Proof was produced for a different group size"
        );
    }
}
