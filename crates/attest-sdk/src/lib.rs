//! Attest SDK: file-based group and proof workflows.

pub mod commands;
pub mod common;
