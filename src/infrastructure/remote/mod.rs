pub mod gvfs_config_client;

pub use gvfs_config_client::{GvfsConfigClient, RemoteConfigError};
