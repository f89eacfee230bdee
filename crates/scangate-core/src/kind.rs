//! Scan kinds exposed by the scanning service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a model exchange is being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Prompt,
    Output,
}

impl ScanKind {
    /// Path of the service endpoint, appended to the configured base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ScanKind::Prompt => "/scan/prompt",
            ScanKind::Output => "/scan/output",
        }
    }

    /// Capitalized label used in gate reasons and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            ScanKind::Prompt => "Prompt",
            ScanKind::Output => "Output",
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(ScanKind::Prompt.endpoint(), "/scan/prompt");
        assert_eq!(ScanKind::Output.endpoint(), "/scan/output");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(ScanKind::Output.to_string(), "Output");
    }
}
