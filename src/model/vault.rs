//! Vault abstraction: the host's note storage
//!
//! The navigator only ever needs five primitives from the host's storage:
//! existence checks, single-level directory creation, file creation, and
//! whole-file read and write. Paths are vault-relative and `/`-separated.
//!
//! - `StdVault`: a directory on the native filesystem
//! - `MemoryVault`: in-memory storage with an operation log and failure
//!   injection, used in tests and headless embedding

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// A storage operation, used for error reporting and the memory vault's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaultOp {
    Mkdir,
    Create,
    Read,
    Modify,
}

impl fmt::Display for VaultOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VaultOp::Mkdir => "create folder",
            VaultOp::Create => "create file",
            VaultOp::Read => "read file",
            VaultOp::Modify => "write file",
        };
        f.write_str(name)
    }
}

/// Host storage capabilities.
pub trait Vault: Send + Sync {
    /// Check whether a file or folder exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Create a single folder. The parent must already exist.
    fn mkdir(&self, path: &str) -> io::Result<()>;

    /// Create a new file with `content`. Fails if the file already exists.
    fn create(&self, path: &str, content: &str) -> io::Result<()>;

    /// Read the full text of a file.
    fn read(&self, path: &str) -> io::Result<String>;

    /// Replace the full text of an existing file.
    fn modify(&self, path: &str, content: &str) -> io::Result<()>;
}

pub type SharedVault = Arc<dyn Vault>;

/// Parent folder of a vault path, or `None` for top-level entries.
fn parent_of(path: &str) -> Option<&str> {
    path.rfind('/').map(|idx| &path[..idx]).filter(|p| !p.is_empty())
}

// ============================================================================
// Native filesystem
// ============================================================================

/// Vault backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct StdVault {
    root: PathBuf,
}

impl StdVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault-relative path onto the native filesystem.
    ///
    /// Empty, `.` and `..` segments are dropped so every path stays under the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl Vault for StdVault {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn mkdir(&self, path: &str) -> io::Result<()> {
        fs::create_dir(self.resolve(path))
    }

    fn create(&self, path: &str, content: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(path))?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }

    fn read(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    fn modify(&self, path: &str, content: &str) -> io::Result<()> {
        let target = self.resolve(path);
        if !target.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a file", target.display()),
            ));
        }
        fs::write(target, content)
    }
}

// ============================================================================
// In-memory
// ============================================================================

#[derive(Debug, Default)]
struct MemoryVaultState {
    folders: BTreeSet<String>,
    files: BTreeMap<String, String>,
    failing: BTreeSet<String>,
    log: Vec<(VaultOp, String)>,
}

impl MemoryVaultState {
    fn check(&mut self, op: VaultOp, path: &str) -> io::Result<()> {
        if self.failing.contains(path) {
            return Err(io::Error::other(format!("injected failure: {op} {path}")));
        }
        self.log.push((op, path.to_string()));
        Ok(())
    }

    fn require_parent(&self, path: &str) -> io::Result<()> {
        match parent_of(path) {
            Some(parent) if !self.folders.contains(parent) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent folder {parent} does not exist"),
            )),
            _ => Ok(()),
        }
    }

    fn occupied(&self, path: &str) -> bool {
        self.folders.contains(path) || self.files.contains_key(path)
    }
}

/// In-memory vault.
///
/// Mutating operations are recorded in order so tests can assert exactly
/// which folders and files a run touched.
#[derive(Debug, Default)]
pub struct MemoryVault {
    state: RwLock<MemoryVaultState>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Seed a file (and all its parent folders) without logging.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        {
            let mut state = self.state.write().unwrap();
            let mut prefix = String::new();
            if let Some(parent) = parent_of(path) {
                for segment in parent.split('/').filter(|s| !s.is_empty()) {
                    if !prefix.is_empty() {
                        prefix.push('/');
                    }
                    prefix.push_str(segment);
                    state.folders.insert(prefix.clone());
                }
            }
            state.files.insert(path.to_string(), content.to_string());
        }
        self
    }

    /// Make every operation on `path` fail.
    pub fn fail_on(&self, path: &str) {
        self.state.write().unwrap().failing.insert(path.to_string());
    }

    /// Current content of a file, if present.
    pub fn file(&self, path: &str) -> Option<String> {
        self.state.read().unwrap().files.get(path).cloned()
    }

    pub fn is_folder(&self, path: &str) -> bool {
        self.state.read().unwrap().folders.contains(path)
    }

    pub fn folders(&self) -> Vec<String> {
        self.state.read().unwrap().folders.iter().cloned().collect()
    }

    /// Operations performed so far, in order.
    pub fn operations(&self) -> Vec<(VaultOp, String)> {
        self.state.read().unwrap().log.clone()
    }

    /// Operations of one kind, in order.
    pub fn operations_of(&self, op: VaultOp) -> Vec<String> {
        self.operations()
            .into_iter()
            .filter(|(o, _)| *o == op)
            .map(|(_, path)| path)
            .collect()
    }
}

impl Vault for MemoryVault {
    fn exists(&self, path: &str) -> bool {
        self.state.read().unwrap().occupied(path)
    }

    fn mkdir(&self, path: &str) -> io::Result<()> {
        let mut state = self.state.write().unwrap();
        state.check(VaultOp::Mkdir, path)?;
        state.require_parent(path)?;
        if state.occupied(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{path} already exists"),
            ));
        }
        state.folders.insert(path.to_string());
        Ok(())
    }

    fn create(&self, path: &str, content: &str) -> io::Result<()> {
        let mut state = self.state.write().unwrap();
        state.check(VaultOp::Create, path)?;
        state.require_parent(path)?;
        if state.occupied(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{path} already exists"),
            ));
        }
        state.files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn read(&self, path: &str) -> io::Result<String> {
        let mut state = self.state.write().unwrap();
        state.check(VaultOp::Read, path)?;
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{path} not found")))
    }

    fn modify(&self, path: &str, content: &str) -> io::Result<()> {
        let mut state = self.state.write().unwrap();
        state.check(VaultOp::Modify, path)?;
        match state.files.get_mut(path) {
            Some(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{path} not found"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_vault_mkdir_requires_parent() {
        let vault = MemoryVault::new();
        let err = vault.mkdir("a/b").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        vault.mkdir("a").unwrap();
        vault.mkdir("a/b").unwrap();
        assert!(vault.is_folder("a/b"));
        assert_eq!(vault.operations_of(VaultOp::Mkdir), vec!["a/b", "a", "a/b"]);
    }

    #[test]
    fn test_memory_vault_create_rejects_existing() {
        let vault = MemoryVault::new().with_file("notes/2025-03.md", "hello");
        assert!(vault.is_folder("notes"));

        let err = vault.create("notes/2025-03.md", "").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(vault.file("notes/2025-03.md").as_deref(), Some("hello"));
    }

    #[test]
    fn test_memory_vault_modify_requires_file() {
        let vault = MemoryVault::new();
        assert!(vault.modify("missing.md", "x").is_err());

        vault.create("note.md", "").unwrap();
        vault.modify("note.md", "updated").unwrap();
        assert_eq!(vault.read("note.md").unwrap(), "updated");
    }

    #[test]
    fn test_memory_vault_fail_on() {
        let vault = MemoryVault::new();
        vault.fail_on("broken");

        let err = vault.mkdir("broken").unwrap_err();
        assert!(err.to_string().contains("injected failure"));
        assert!(!vault.exists("broken"));
        assert!(vault.operations().is_empty());
    }

    #[test]
    fn test_std_vault_roundtrip() {
        let dir = TempDir::new().unwrap();
        let vault = StdVault::new(dir.path());

        assert!(!vault.exists("moodnote"));
        vault.mkdir("moodnote").unwrap();
        assert!(vault.exists("moodnote"));

        vault.create("moodnote/2025-03.md", "").unwrap();
        vault.modify("moodnote/2025-03.md", "### 13일 (목)\n").unwrap();
        assert_eq!(vault.read("moodnote/2025-03.md").unwrap(), "### 13일 (목)\n");

        let err = vault.create("moodnote/2025-03.md", "").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_std_vault_resolve_stays_under_root() {
        let vault = StdVault::new("/vault");
        assert_eq!(vault.resolve("../etc/./passwd"), PathBuf::from("/vault/etc/passwd"));
        assert_eq!(vault.resolve("a//b/"), PathBuf::from("/vault/a/b"));
    }

    #[test]
    fn test_std_vault_modify_missing_file() {
        let dir = TempDir::new().unwrap();
        let vault = StdVault::new(dir.path());
        let err = vault.modify("nope.md", "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
