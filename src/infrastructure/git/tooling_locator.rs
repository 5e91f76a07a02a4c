use std::env;
use std::path::{Path, PathBuf};

use crate::application::ports::GitToolingLocator;

#[cfg(windows)]
const GIT_EXECUTABLE: &str = "git.exe";
#[cfg(not(windows))]
const GIT_EXECUTABLE: &str = "git";

/// Finds git and the hooks executable by scanning a list of directories.
///
/// `from_environment` searches the directory of the running binary first and
/// then every `PATH` entry, in order.
#[derive(Debug, Clone, Default)]
pub struct PathToolingLocator {
    search_paths: Vec<PathBuf>,
}

impl PathToolingLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn from_environment() -> Self {
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let path_dirs = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
            .unwrap_or_default();

        Self::new(exe_dir.into_iter().chain(path_dirs).collect())
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl GitToolingLocator for PathToolingLocator {
    fn find_installed_bin_path(&self) -> Option<PathBuf> {
        let found = self
            .find_directory_containing(GIT_EXECUTABLE)
            .map(|dir| dir.join(GIT_EXECUTABLE));
        if found.is_none() {
            tracing::debug!(searched = self.search_paths.len(), "git not found");
        }
        found
    }

    fn find_directory_containing(&self, file_name: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .find(|dir| dir.join(file_name).is_file())
            .cloned()
    }
}
