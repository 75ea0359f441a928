//! On-disk TOML representation of the listing configuration.
//!
//! Every field is optional so a file only needs to name what it changes.
//! Command-line flags are folded in through the same type with
//! [`ConfigFile::merge`] before the whole thing is validated into a
//! [`ListingConfig`](super::ListingConfig).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{BasePath, ErrorPolicy};

/// `cache` accepts a number of seconds, a humantime duration such as `"1h"`,
/// or a literal `Cache-Control` value such as `"no-cache"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheSetting {
    Seconds(u64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub root: Option<PathBuf>,
    pub base_path: Option<BasePath>,
    pub show_dotfiles: Option<bool>,
    pub hide_permissions: Option<bool>,
    pub human_readable: Option<bool>,
    pub si: Option<bool>,
    pub weak_etags: Option<bool>,
    pub cache: Option<CacheSetting>,
    pub error_policy: Option<ErrorPolicy>,
    pub auto_index: Option<bool>,
}

impl ConfigFile {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            root: other.root.or(self.root),
            base_path: other.base_path.or(self.base_path),
            show_dotfiles: other.show_dotfiles.or(self.show_dotfiles),
            hide_permissions: other.hide_permissions.or(self.hide_permissions),
            human_readable: other.human_readable.or(self.human_readable),
            si: other.si.or(self.si),
            weak_etags: other.weak_etags.or(self.weak_etags),
            cache: other.cache.or(self.cache),
            error_policy: other.error_policy.or(self.error_policy),
            auto_index: other.auto_index.or(self.auto_index),
        }
    }
}
