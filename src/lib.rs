pub mod cli;
pub mod config;

// Re-export the scanning types for convenience
pub use scangate_client::{ClientConfig, ScanClient, TransportCause, TransportError};
pub use scangate_core::{GateDecision, ScanKind, ScanPolicy, ScanResult, ValidityPolicy};
