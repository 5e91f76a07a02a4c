use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// エンリストメントのドットフォルダ名
pub const DOT_GVFS_DIR: &str = ".gvfs";

/// gitの作業ディレクトリ名
pub const WORKING_DIRECTORY_NAME: &str = "src";

/// 既定のリモート名
pub const ORIGIN_REMOTE: &str = "origin";

/// Enlistment関連のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnlistmentError {
    #[error("'{}' does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("missing '.gvfs' folder at '{}'", .0.display())]
    DotFolderMissing(PathBuf),

    #[error("missing working directory '{}'", .0.display())]
    WorkingDirectoryMissing(PathBuf),

    #[error("'{}' is not a git repository: {message}", .path.display())]
    NotAGitRepository { path: PathBuf, message: String },

    #[error("no 'origin' remote is configured")]
    MissingOriginRemote,

    #[error("origin url '{0}' is not an http(s) url")]
    InvalidRemoteUrl(String),
}

/// 仮想化されたエンリストメントのエンティティ
///
/// Immutable once created; a verb owns it for its whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enlistment {
    /// エンリストメントのルートパス
    enlistment_root: PathBuf,

    /// gitの作業ディレクトリ（`<root>/src`）
    working_directory_root: PathBuf,

    /// リモートリポジトリのURL
    repo_url: String,

    /// インストール済みgitの実行ファイルパス
    git_bin_path: PathBuf,

    /// フック実行ファイルを含むディレクトリ
    hooks_bin_dir: PathBuf,
}

impl Enlistment {
    /// ルートディレクトリを検証してEnlistmentを作成
    pub fn create(
        enlistment_root: &Path,
        git_bin_path: PathBuf,
        hooks_bin_dir: PathBuf,
    ) -> Result<Self, EnlistmentError> {
        if !enlistment_root.is_dir() {
            return Err(EnlistmentError::RootNotFound(enlistment_root.to_path_buf()));
        }

        let dot_gvfs = enlistment_root.join(DOT_GVFS_DIR);
        if !dot_gvfs.is_dir() {
            return Err(EnlistmentError::DotFolderMissing(
                enlistment_root.to_path_buf(),
            ));
        }

        let working_directory_root = enlistment_root.join(WORKING_DIRECTORY_NAME);
        if !working_directory_root.is_dir() {
            return Err(EnlistmentError::WorkingDirectoryMissing(
                working_directory_root,
            ));
        }

        let repo_url = Self::read_origin_url(&working_directory_root)?;

        Ok(Self {
            enlistment_root: enlistment_root.to_path_buf(),
            working_directory_root,
            repo_url,
            git_bin_path,
            hooks_bin_dir,
        })
    }

    fn read_origin_url(working_directory_root: &Path) -> Result<String, EnlistmentError> {
        let repo = git2::Repository::open(working_directory_root).map_err(|e| {
            EnlistmentError::NotAGitRepository {
                path: working_directory_root.to_path_buf(),
                message: e.message().to_string(),
            }
        })?;

        let remote = repo
            .find_remote(ORIGIN_REMOTE)
            .map_err(|_| EnlistmentError::MissingOriginRemote)?;
        let url = remote
            .url()
            .ok_or(EnlistmentError::MissingOriginRemote)?
            .to_string();

        match Url::parse(&url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url),
            _ => Err(EnlistmentError::InvalidRemoteUrl(url)),
        }
    }

    /// 指定ディレクトリから上位に向かってエンリストメントルートを発見
    pub fn discover_root(start_path: &Path) -> Option<PathBuf> {
        start_path
            .ancestors()
            .find(|candidate| candidate.join(DOT_GVFS_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    pub fn enlistment_root(&self) -> &Path {
        &self.enlistment_root
    }

    pub fn working_directory_root(&self) -> &Path {
        &self.working_directory_root
    }

    pub fn dot_gvfs_root(&self) -> PathBuf {
        self.enlistment_root.join(DOT_GVFS_DIR)
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn git_bin_path(&self) -> &Path {
        &self.git_bin_path
    }

    pub fn hooks_bin_dir(&self) -> &Path {
        &self.hooks_bin_dir
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::create_enlistment_layout;
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create(root: &Path) -> Result<Enlistment, EnlistmentError> {
        Enlistment::create(root, PathBuf::from("/usr/bin/git"), PathBuf::from("/opt/gvfs"))
    }

    #[test]
    fn test_create_valid_enlistment() {
        let temp_dir = TempDir::new().unwrap();
        create_enlistment_layout(temp_dir.path(), Some("https://example.com/org/repo"));

        let enlistment = create(temp_dir.path()).unwrap();

        assert_eq!(enlistment.enlistment_root(), temp_dir.path());
        assert_eq!(
            enlistment.working_directory_root(),
            temp_dir.path().join("src")
        );
        assert_eq!(enlistment.dot_gvfs_root(), temp_dir.path().join(".gvfs"));
        assert_eq!(enlistment.repo_url(), "https://example.com/org/repo");
        assert_eq!(enlistment.git_bin_path(), Path::new("/usr/bin/git"));
        assert_eq!(enlistment.hooks_bin_dir(), Path::new("/opt/gvfs"));
    }

    #[test]
    fn test_missing_dot_folder() {
        let temp_dir = TempDir::new().unwrap();
        let result = create(temp_dir.path());
        assert_eq!(
            result,
            Err(EnlistmentError::DotFolderMissing(temp_dir.path().to_path_buf()))
        );
    }

    #[test]
    fn test_missing_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join(DOT_GVFS_DIR)).unwrap();

        let result = create(temp_dir.path());
        assert!(matches!(
            result,
            Err(EnlistmentError::WorkingDirectoryMissing(_))
        ));
    }

    #[test]
    fn test_working_directory_not_a_repository() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join(DOT_GVFS_DIR)).unwrap();
        std::fs::create_dir_all(temp_dir.path().join(WORKING_DIRECTORY_NAME)).unwrap();

        let result = create(temp_dir.path());
        assert!(matches!(
            result,
            Err(EnlistmentError::NotAGitRepository { .. })
        ));
    }

    #[test]
    fn test_missing_or_invalid_origin() {
        let temp_dir = TempDir::new().unwrap();
        create_enlistment_layout(temp_dir.path(), None);
        assert_eq!(
            create(temp_dir.path()),
            Err(EnlistmentError::MissingOriginRemote)
        );

        let ssh_dir = TempDir::new().unwrap();
        create_enlistment_layout(ssh_dir.path(), Some("git@example.com:org/repo.git"));
        assert!(matches!(
            create(ssh_dir.path()),
            Err(EnlistmentError::InvalidRemoteUrl(_))
        ));
    }

    #[test]
    fn test_discover_root_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        create_enlistment_layout(temp_dir.path(), Some("https://example.com/org/repo"));
        let sub_dir = temp_dir.path().join("src").join("a").join("b");
        std::fs::create_dir_all(&sub_dir).unwrap();

        assert_eq!(
            Enlistment::discover_root(&sub_dir),
            Some(temp_dir.path().to_path_buf())
        );

        let other = TempDir::new().unwrap();
        assert_eq!(Enlistment::discover_root(other.path()), None);
    }
}
