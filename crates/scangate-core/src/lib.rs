//! Core types for the scangate client.
//!
//! This crate holds everything that does not touch the network:
//! - Scan kinds and their endpoint paths (ScanKind)
//! - The normalized scan result (ScanResult)
//! - The block/allow policy gate (ScanPolicy, ValidityPolicy)

mod kind;
mod policy;
mod result;

pub use kind::ScanKind;
pub use policy::{
    should_block, should_block_output, should_block_prompt, GateDecision, ScanPolicy,
    ValidityPolicy,
};
pub use result::ScanResult;
