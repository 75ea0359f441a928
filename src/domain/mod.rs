mod base_path;
mod error_policy;

pub use base_path::{BasePath, BasePathError};
pub use error_policy::ErrorPolicy;
