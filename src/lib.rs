//! # gvfs - Verb execution for virtualized git enlistments
//!
//! `gvfs` runs the preflight checks every command of a virtualized
//! enlistment depends on, and repairs what it safely can. A verb only starts
//! its real work after the enlistment has been resolved and validated.
//!
//! ## Enlistment layout
//!
//! ```text
//! <root>/
//!   .gvfs/     marker folder
//!   src/       git working directory (origin must be an http(s) url)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # run every preflight check from anywhere inside the enlistment
//! gvfs check
//!
//! # only bring the local git config to the required settings
//! gvfs config /repos/os
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: enlistment model, version types, required git config
//! - [`application`]: collaborator ports, preflight gates and the verb frame
//! - [`infrastructure`]: git subprocess, HTTP, service manager and antivirus adapters
//! - [`presentation`]: CLI parsing and console output
//! - [`common`]: exit codes, error kinds and the abort/reporting primitive
//!
//! ## Failure model
//!
//! Every gate returns [`common::result::VerbResult`]. A hard failure is an
//! [`common::error::Abort`] built by [`common::reporter::ErrorReporter`],
//! which has already written the message; the frame turns it into the
//! process exit code. Advisory problems (server policy unreachable, antivirus
//! exclusion missing) are written as warnings and never change the exit code.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use gvfs::application::frame::{VerbContext, VerbFrame};
//! use gvfs::application::use_cases::check_enlistment::CheckEnlistmentVerb;
//!
//! # async fn example(ctx: VerbContext) {
//! let exit_code = VerbFrame::new(&ctx)
//!     .execute(&CheckEnlistmentVerb::new(), Path::new("/repos/os"))
//!     .await;
//! println!("check finished with {exit_code}");
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::{Abort, ExitCode, VerbError};
pub use crate::common::result::VerbResult;
