use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// URL prefix under which the served root is mounted.
///
/// Always starts with `/` and carries no trailing slash, except for the root
/// mount `/` itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BasePath(String);

#[derive(Debug, Error)]
pub enum BasePathError {
    #[error("Base path must start with '/'")]
    MustStartWithSlash,

    #[error("Base path cannot have trailing slash (except for '/')")]
    TrailingSlash,

    #[error("Base path contains invalid characters")]
    InvalidCharacters,
}

impl BasePath {
    pub fn new(path: impl Into<String>) -> Result<Self, BasePathError> {
        let path = path.into();

        if !path.starts_with('/') {
            return Err(BasePathError::MustStartWithSlash);
        }

        if path.len() > 1 && path.ends_with('/') {
            return Err(BasePathError::TrailingSlash);
        }

        let valid_chars = |c: char| c.is_ascii_alphanumeric() || "-_.~/".contains(c);
        if !path.chars().all(valid_chars) {
            return Err(BasePathError::InvalidCharacters);
        }

        Ok(Self(path))
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this prefix owns a request path: the path starts with the
    /// prefix, followed by either end of string or '/'.
    pub fn matches(&self, request_path: &str) -> bool {
        if self.is_root() {
            true
        } else {
            request_path.starts_with(&self.0)
                && (request_path.len() == self.0.len()
                    || request_path.as_bytes().get(self.0.len()) == Some(&b'/'))
        }
    }

    /// Remainder of `request_path` below this prefix, always rooted at `/`.
    ///
    /// Returns `None` when the path is not under the prefix.
    pub fn strip(&self, request_path: &str) -> Option<String> {
        if !self.matches(request_path) {
            return None;
        }
        if self.is_root() {
            return Some(request_path.to_string());
        }

        let rest = &request_path[self.0.len()..];
        if rest.is_empty() {
            Some("/".to_string())
        } else {
            Some(rest.to_string())
        }
    }

    /// Re-mount an absolute path produced below this prefix.
    pub fn prefix(&self, path: &str) -> String {
        if self.is_root() {
            path.to_string()
        } else {
            format!("{}{path}", self.0)
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl TryFrom<String> for BasePath {
    type Error = BasePathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BasePath> for String {
    fn from(value: BasePath) -> Self {
        value.0
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
