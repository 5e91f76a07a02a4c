/// Infrastructure layer modules
///
/// Concrete implementations of the application ports:
/// - git subprocess access and tooling lookup
/// - the server's `gvfs/config` endpoint
/// - host service manager, antivirus and privilege checks
/// - settings file loading
pub mod filesystem;
pub mod git;
pub mod platform;
pub mod process;
pub mod remote;

pub use filesystem::{SettingsStore, SettingsStoreError};
pub use git::{GitProcess, PathToolingLocator};
pub use platform::{DefenderExclusionProvider, ProcessPrivilegeProbe, SystemServiceController};
pub use process::CommandRunner;
pub use remote::GvfsConfigClient;
