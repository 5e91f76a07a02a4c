//! On-disk enlistment fixtures

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ORIGIN_URL: &str = "https://example.com/org/_git/repo";

/// Temporary enlistment with `.gvfs/` and a `src/` repository.
pub struct EnlistmentFixture {
    pub temp_dir: TempDir,
}

impl EnlistmentFixture {
    pub fn new() -> Self {
        Self::with_origin(Some(ORIGIN_URL))
    }

    pub fn with_origin(origin: Option<&str>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join(".gvfs")).unwrap();
        let repo = git2::Repository::init(temp_dir.path().join("src")).unwrap();
        if let Some(url) = origin {
            repo.remote("origin", url).unwrap();
        }
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn nested_dir(&self) -> PathBuf {
        let dir = self.root().join("src").join("deep").join("folder");
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}
