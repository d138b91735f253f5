//! Request-scoped temporary artifacts.
//!
//! Every on-disk intermediate (the copy of an uploaded image or PDF, the
//! directory of rendered pages) is acquired through an [`ArtifactScope`].
//! The scope releases everything it handed out in one teardown step, either
//! explicitly via [`ArtifactScope::release_all`] or on drop, so an early
//! return or a `?` can never leak a file.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CleanupWarning;
use crate::models::config::TempConfig;

const RANDOM_SUFFIX_LEN: usize = 12;

/// What a temp path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempKind {
    /// A single file.
    File,
    /// A directory removed recursively on release.
    Directory,
}

impl fmt::Display for TempKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// A uniquely named path in the temp area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempArtifact {
    path: PathBuf,
    kind: TempKind,
}

impl TempArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> TempKind {
        self.kind
    }
}

/// Allocates and removes temp artifacts under one root directory.
///
/// Safe to share between concurrent requests: names carry a random suffix,
/// and nothing else is shared.
#[derive(Debug)]
pub struct TempStore {
    root: PathBuf,
    prefix: String,
    acquired: AtomicUsize,
}

impl TempStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
            acquired: AtomicUsize::new(0),
        }
    }

    /// Create a store from configuration, defaulting to the system temp dir.
    pub fn from_config(config: &TempConfig) -> Self {
        let root = config.root.clone().unwrap_or_else(std::env::temp_dir);
        Self::new(root, config.prefix.clone())
    }

    /// Root directory artifacts are created in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Total number of artifacts this store has handed out.
    pub fn acquired_count(&self) -> usize {
        self.acquired.load(Ordering::Relaxed)
    }

    /// Create a new, uniquely named file or directory.
    ///
    /// The path is detached from `tempfile`'s drop cleanup; the caller owns
    /// its removal through [`TempStore::release`].
    pub fn acquire(&self, kind: TempKind, suffix: &str) -> io::Result<TempArtifact> {
        fs::create_dir_all(&self.root)?;

        let mut builder = tempfile::Builder::new();
        builder
            .prefix(&self.prefix)
            .suffix(suffix)
            .rand_bytes(RANDOM_SUFFIX_LEN);

        let path = match kind {
            TempKind::File => builder
                .tempfile_in(&self.root)?
                .into_temp_path()
                .keep()
                .map_err(|e| e.error)?,
            TempKind::Directory => builder.tempdir_in(&self.root)?.keep(),
        };

        self.acquired.fetch_add(1, Ordering::Relaxed);
        debug!("Acquired temp {} {}", kind, path.display());

        Ok(TempArtifact { path, kind })
    }

    /// Remove an artifact.
    ///
    /// A path that is already gone counts as released. Any other failure is
    /// returned as a warning, never as an error.
    pub fn release(&self, artifact: &TempArtifact) -> Option<CleanupWarning> {
        let result = match artifact.kind {
            TempKind::File => fs::remove_file(&artifact.path),
            TempKind::Directory => fs::remove_dir_all(&artifact.path),
        };

        match result {
            Ok(()) => {
                debug!("Released temp {} {}", artifact.kind, artifact.path.display());
                None
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => Some(CleanupWarning {
                path: artifact.path.clone(),
                kind: artifact.kind,
                source: e,
            }),
        }
    }

    /// Open a scope whose artifacts are released together.
    pub fn scope(&self) -> ArtifactScope<'_> {
        ArtifactScope {
            store: self,
            held: Vec::new(),
        }
    }
}

/// Arena of artifacts acquired while handling one request.
pub struct ArtifactScope<'a> {
    store: &'a TempStore,
    held: Vec<TempArtifact>,
}

impl ArtifactScope<'_> {
    /// Acquire an artifact owned by this scope and return its path.
    pub fn acquire(&mut self, kind: TempKind, suffix: &str) -> io::Result<PathBuf> {
        let artifact = self.store.acquire(kind, suffix)?;
        let path = artifact.path.clone();
        self.held.push(artifact);
        Ok(path)
    }

    /// Number of artifacts not yet released.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Release every held artifact, newest first, exactly once.
    pub fn release_all(&mut self) -> Vec<CleanupWarning> {
        let mut warnings = Vec::new();
        while let Some(artifact) = self.held.pop() {
            if let Some(warning) = self.store.release(&artifact) {
                warn!("{}", warning);
                warnings.push(warning);
            }
        }
        warnings
    }
}

impl Drop for ArtifactScope<'_> {
    fn drop(&mut self) {
        if !self.held.is_empty() {
            debug!("Releasing {} temp artifacts on scope drop", self.held.len());
            self.release_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn store(root: &TempDir) -> TempStore {
        TempStore::new(root.path(), "test-")
    }

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_acquire_file_with_suffix() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        let artifact = store.acquire(TempKind::File, ".pdf").unwrap();
        assert!(artifact.path().is_file());
        assert!(artifact.path().starts_with(root.path()));

        let name = artifact.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("test-"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(store.acquired_count(), 1);
    }

    #[test]
    fn test_release_is_idempotent() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        let artifact = store.acquire(TempKind::File, "").unwrap();
        assert!(store.release(&artifact).is_none());
        assert!(!artifact.path().exists());
        assert!(store.release(&artifact).is_none());
    }

    #[test]
    fn test_release_directory_recursively() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        let artifact = store.acquire(TempKind::Directory, "").unwrap();
        fs::write(artifact.path().join("page-1.png"), b"png").unwrap();
        fs::create_dir(artifact.path().join("nested")).unwrap();
        fs::write(artifact.path().join("nested/page-2.png"), b"png").unwrap();

        assert!(store.release(&artifact).is_none());
        assert!(!artifact.path().exists());
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_names_are_unique() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        let paths: HashSet<PathBuf> = (0..64)
            .map(|_| store.acquire(TempKind::File, ".png").unwrap().path().to_path_buf())
            .collect();
        assert_eq!(paths.len(), 64);
    }

    #[test]
    fn test_scope_releases_on_drop() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        {
            let mut scope = store.scope();
            scope.acquire(TempKind::File, ".pdf").unwrap();
            scope.acquire(TempKind::Directory, "").unwrap();
            assert_eq!(scope.len(), 2);
            assert_eq!(entries(root.path()), 2);
        }

        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_scope_release_all_empties_scope() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        let mut scope = store.scope();
        let dir = scope.acquire(TempKind::Directory, "").unwrap();
        fs::write(dir.join("page-1.png"), b"png").unwrap();

        let warnings = scope.release_all();
        assert!(warnings.is_empty());
        assert!(scope.is_empty());
        assert_eq!(entries(root.path()), 0);
    }

    #[test]
    fn test_failed_removal_is_a_warning() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        let artifact = store.acquire(TempKind::File, ".png").unwrap();
        crate::testing::clobber_with_directory(artifact.path()).unwrap();

        let warning = store.release(&artifact).expect("removal should fail");
        assert_eq!(warning.path, artifact.path());
        assert_eq!(warning.kind, TempKind::File);
        assert!(artifact.path().exists());
    }

    #[test]
    fn test_scope_keeps_releasing_after_a_failure() {
        let root = TempDir::new().unwrap();
        let store = store(&root);

        let mut scope = store.scope();
        let file = scope.acquire(TempKind::File, ".pdf").unwrap();
        scope.acquire(TempKind::Directory, "").unwrap();
        crate::testing::clobber_with_directory(&file).unwrap();

        let warnings = scope.release_all();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, file);
        assert!(scope.is_empty());
        assert_eq!(entries(root.path()), 1);
    }

    #[test]
    fn test_missing_root_is_created() {
        let root = TempDir::new().unwrap();
        let store = TempStore::new(root.path().join("nested/area"), "x-");

        let artifact = store.acquire(TempKind::File, "").unwrap();
        assert!(artifact.path().exists());
    }
}
