use serde::Serialize;
use std::fmt;

/// A single problem found while building the route tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Declared path of the offending node, e.g. `/settings/contact`
    pub location: String,
    /// Short machine-readable kind, e.g. `DuplicatePath`
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

pub fn print_issues(issues: &[ValidationIssue]) {
    eprintln!(
        "\n❌ Route declaration validation failed. {} issue(s) found:\n",
        issues.len()
    );
    for issue in issues {
        eprintln!("{issue}");
    }
    eprintln!("\nPlease fix the route declaration before starting the console.\n");
}
