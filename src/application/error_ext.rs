//! Path context for I/O failures during a scan
//!
//! Walk and read errors carry the file they happened on, so a failed
//! run names the wizard file or directory at fault.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turns an `io::Result` into an `OperationFailed` naming the path.
pub trait IoResultExt<T> {
    /// `action` is a short verb phrase such as `"read wizard file"`.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}
