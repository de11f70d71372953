pub mod init;
pub mod remote;
pub mod sections;
pub mod validate;

pub use init::{init, InitArgs};
pub use remote::{pull, push, PullArgs, PushArgs};
pub use sections::{sections, SectionsArgs};
pub use validate::{validate, ValidateArgs};

use std::path::{Path, PathBuf};

/// Relative paths are taken from the working directory
pub(crate) fn resolve_path(cwd: &str, path: &Path) -> PathBuf {
    PathBuf::from(cwd).join(path)
}
