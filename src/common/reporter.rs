//! Unified failure reporting for verbs.
//!
//! Every gate reports hard failures through [`ErrorReporter::abort`] and
//! advisory ones through [`ErrorReporter::warn`]. Nothing below the execution
//! frame inspects or swallows an [`Abort`].

use std::sync::Arc;

use crate::common::error::{Abort, ExitCode, VerbError};

/// Append-only text stream a verb writes its messages to.
pub trait OutputSink: Send + Sync {
    /// Write a regular message line.
    fn write_line(&self, message: &str);

    /// Write an advisory line.
    fn write_warning(&self, message: &str) {
        self.write_line(message);
    }

    /// Write an error line.
    fn write_error(&self, message: &str) {
        self.write_line(message);
    }
}

/// Reports messages on behalf of one running verb.
#[derive(Clone)]
pub struct ErrorReporter {
    verb: String,
    sink: Arc<dyn OutputSink>,
}

impl ErrorReporter {
    pub fn new(verb: impl Into<String>, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            verb: verb.into(),
            sink,
        }
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Write `error`'s message and build the signal that ends the verb.
    ///
    /// `ExitCode::Success` is never recorded; it is replaced with
    /// `ExitCode::GenericError`.
    pub fn abort(&self, exit_code: ExitCode, error: VerbError) -> Abort {
        let message = error.to_string();
        if !message.is_empty() {
            self.sink.write_error(&message);
        }
        let abort = Abort::new(self.verb.clone(), exit_code, error);
        tracing::debug!(verb = %self.verb, exit_code = %abort.exit_code(), "verb aborted");
        abort
    }

    /// Abort with the kind's own exit code.
    pub fn fail(&self, error: VerbError) -> Abort {
        let exit_code = error.exit_code();
        self.abort(exit_code, error)
    }

    /// Write an advisory for a warn-only kind. The exit code is untouched.
    pub fn warn(&self, error: &VerbError) {
        debug_assert!(error.is_warning(), "{error:?} is not a warn-only kind");
        tracing::warn!(verb = %self.verb, "{}", error);
        self.sink.write_warning(&error.to_string());
    }

    pub fn info(&self, message: &str) {
        self.sink.write_line(message);
    }
}
