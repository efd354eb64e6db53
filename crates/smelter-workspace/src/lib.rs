//! Isolated per-run workspace directories for smelter
//!
//! Every pipeline run owns exactly one [`RunWorkspace`]: a uniquely named
//! temporary directory that holds the source file, the generated artifact,
//! and the linked binary. The directory is removed recursively when the
//! workspace is dropped, on every exit path: normal return, stage failure,
//! timeout, or panic unwinding through the orchestrator.
//!
//! Uniqueness of the directory name is the only coordination concurrent runs
//! need; no two workspaces ever share a path.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

/// Prefix used for workspace directory names.
pub const WORKSPACE_PREFIX: &str = "smelter-";

/// Errors from workspace acquisition and release.
///
/// This is the only fatal error class in the pipeline: if the workspace
/// cannot be created, the run aborts before any stage executes.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("failed to create workspace directory: {source}")]
    Create {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove workspace directory {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workspace file name {name:?}: path separators are not allowed")]
    InvalidFileName { name: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A uniquely named, exclusively owned directory scoped to one pipeline run.
///
/// Removal is tied to ownership: dropping the workspace deletes the directory
/// and everything inside it. Callers that want to observe removal failures
/// can call [`close`](RunWorkspace::close) instead of relying on `Drop`.
#[derive(Debug)]
pub struct RunWorkspace {
    dir: TempDir,
}

impl RunWorkspace {
    /// Create a fresh, empty workspace in the system temp directory.
    pub fn acquire() -> Result<Self, WorkspaceError> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|source| WorkspaceError::Create { source })?;
        Ok(Self { dir })
    }

    /// Create a fresh workspace under an explicit parent directory.
    ///
    /// Used by tests to observe cleanup: point every run at a scratch root
    /// and assert the root is empty after the run ends.
    pub fn acquire_in(root: &Path) -> Result<Self, WorkspaceError> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|source| WorkspaceError::Create { source })?;
        Ok(Self { dir })
    }

    /// Path of the workspace directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Scoped path for a file inside the workspace.
    ///
    /// Rejects names containing path separators so no caller can reach
    /// outside the workspace through this API.
    pub fn file(&self, name: &str) -> Result<PathBuf, WorkspaceError> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(WorkspaceError::InvalidFileName {
                name: name.to_string(),
            });
        }
        Ok(self.dir.path().join(name))
    }

    /// Write `contents` to a scoped file inside the workspace.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, WorkspaceError> {
        let path = self.file(name)?;
        std::fs::write(&path, contents).map_err(|source| WorkspaceError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Remove the workspace now, surfacing any removal error.
    ///
    /// Dropping the workspace has the same effect but swallows errors.
    pub fn close(self) -> Result<(), WorkspaceError> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| WorkspaceError::Remove { path, source })
    }
}
