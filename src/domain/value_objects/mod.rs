pub mod client_version;
pub mod git_config_setting;
pub mod git_version;
