//! Application command implementations.
//!
//! This module contains the core logic for each CLI subcommand.

mod group_snapshot;
mod members;
mod membership_proof;
mod reconcile;

use attest_core::schema::group::{GroupSnapshot, MemberList};
use attest_core::schema::proof::MembershipProofDocument;
pub use group_snapshot::build_group_snapshot;
pub use members::{build_group, load_group, load_members};
pub use membership_proof::{generate_membership_proof, verify_membership_proof};
pub use reconcile::reconcile_roots;

/// Generates and prints the JSON schemas of the documents the CLI reads and
/// writes.
///
/// # Errors
/// Returns an error if serialization to JSON fails.
#[allow(clippy::print_stdout, reason = "Prints schema to stdout")]
pub fn print_schemas() -> eyre::Result<()> {
    let schemas = [
        (
            "Membership Proof",
            schemars::schema_for!(MembershipProofDocument),
        ),
        ("Member List", schemars::schema_for!(MemberList)),
        ("Group Snapshot", schemars::schema_for!(GroupSnapshot)),
    ];
    for (name, schema) in schemas {
        let schema_str = serde_json::to_string_pretty(&schema)?;
        println!("{name} JSON Schema:\n{schema_str}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_print() {
        assert!(print_schemas().is_ok());
    }

    #[test]
    fn proof_schema_uses_document_keys() {
        let schema = serde_json::to_string(&schemars::schema_for!(MembershipProofDocument))
            .expect("schema serializes");
        for key in ["groupId", "pathElements", "pathIndices"] {
            assert!(schema.contains(key), "schema is missing {key}");
        }
    }
}
