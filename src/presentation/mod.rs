//! Command-line surface of the `gvfs` binary.

pub mod cli;
pub mod ui;
