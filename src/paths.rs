//! Workbook path resolution.
//!
//! The MCP server can be pointed at a files directory via the
//! `SHEETBRIDGE_FILES_PATH` environment variable. The resolver is an
//! explicit value threaded into dispatch rather than process-wide state:
//! absolute paths always pass through, relative paths require a configured
//! base directory and fail otherwise.

use std::path::{Path, PathBuf};

use crate::error::{BridgeError, BridgeResult};

/// Environment variable naming the base directory for relative workbook paths.
pub const FILES_PATH_ENV: &str = "SHEETBRIDGE_FILES_PATH";

#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    base_dir: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Build a resolver from the environment, reading the variable once.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os(FILES_PATH_ENV).map(PathBuf::from))
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Resolve a user-supplied workbook path to a full path.
    pub fn resolve(&self, filename: &str) -> BridgeResult<PathBuf> {
        let path = Path::new(filename);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        match &self.base_dir {
            Some(base) => Ok(base.join(path)),
            None => Err(BridgeError::Path(format!(
                "invalid filename: {}, must be an absolute path when {} is not set",
                filename, FILES_PATH_ENV
            ))),
        }
    }
}
