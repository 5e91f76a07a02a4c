pub mod config_baseline;
pub mod enlistment;
pub mod remote_version_policy;
pub mod tool_settings;
