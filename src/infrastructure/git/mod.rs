pub mod git_process;
pub mod tooling_locator;

pub use git_process::GitProcess;
pub use tooling_locator::PathToolingLocator;
