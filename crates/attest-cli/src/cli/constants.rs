//! Shared constants for CLI.

// -------------------------
// Environment variables
// -------------------------

// Group
pub const ATTEST_MEMBERS_FILE: &str = "ATTEST_MEMBERS_FILE";
pub const ATTEST_GROUP_ID: &str = "ATTEST_GROUP_ID";
pub const ATTEST_DEPTH: &str = "ATTEST_DEPTH";
pub const ATTEST_ZERO_VALUE: &str = "ATTEST_ZERO_VALUE";
pub const ATTEST_SNAPSHOT_OUT: &str = "ATTEST_SNAPSHOT_OUT";
pub const ATTEST_EXPECTED_ROOT: &str = "ATTEST_EXPECTED_ROOT";

// Proof
pub const ATTEST_MEMBER: &str = "ATTEST_MEMBER";
pub const ATTEST_INDEX: &str = "ATTEST_INDEX";
pub const ATTEST_PROOF_OUT: &str = "ATTEST_PROOF_OUT";
pub const ATTEST_PROOF_IN: &str = "ATTEST_PROOF_IN";

// -------------------------
// Default values
// -------------------------

// File paths
pub const DEFAULT_SNAPSHOT_FILE: &str = "group-snapshot.json";
pub const DEFAULT_PROOF_FILE: &str = "membership-proof.json";

// Parsed values
pub const DEFAULT_GROUP_ID: &str = "1";
pub const DEFAULT_DEPTH: &str = "20";
pub const DEFAULT_ZERO_VALUE: &str = "0";
