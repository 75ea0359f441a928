use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do when the target directory, its contents, or its parent cannot
/// be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Answer with a 500 response describing the failure class.
    #[default]
    Respond,
    /// Hand the request to the next handler in the chain.
    Delegate,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Respond => write!(f, "respond"),
            Self::Delegate => write!(f, "delegate"),
        }
    }
}
