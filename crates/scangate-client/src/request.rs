//! Request bodies for the scan endpoints.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ScanPromptRequest<'a> {
    pub prompt: &'a str,
    pub scanners: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanOutputRequest<'a> {
    pub prompt: &'a str,
    pub output: &'a str,
    pub scanners: &'a [String],
}
