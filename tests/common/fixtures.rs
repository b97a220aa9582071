// Test vault fixtures

use chrono::NaiveDate;
use moodnote::model::vault::StdVault;
use moodnote::services::time_source::FixedTimeSource;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A vault in a temporary directory
pub struct TestVault {
    _temp_dir: TempDir,
    pub root: PathBuf,
    pub vault: Arc<StdVault>,
}

impl TestVault {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path().join("vault");
        fs::create_dir(&root)?;
        Ok(TestVault {
            vault: Arc::new(StdVault::new(root.clone())),
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Write a file, creating parent directories
    pub fn write(&self, rel: &str, content: &str) -> anyhow::Result<()> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn read(&self, rel: &str) -> anyhow::Result<String> {
        Ok(fs::read_to_string(self.root.join(rel))?)
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Clock fixed at noon on the given day
pub fn clock(year: i32, month: u32, day: u32) -> Arc<FixedTimeSource> {
    Arc::new(FixedTimeSource::on_date(
        NaiveDate::from_ymd_opt(year, month, day).unwrap(),
    ))
}
