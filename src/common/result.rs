use crate::common::error::{Abort, VerbError};
use crate::common::reporter::ErrorReporter;

/// Result type returned by every gate up to the execution frame.
///
/// # Examples
///
/// ```
/// use gvfs::common::result::VerbResult;
///
/// fn example_function() -> VerbResult<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type VerbResult<T> = Result<T, Abort>;

/// Turns an `Option` into a reported abort.
pub trait OptionExt<T> {
    /// Abort through `reporter` when the value is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use gvfs::common::error::VerbError;
    /// use gvfs::common::reporter::{ErrorReporter, OutputSink};
    /// use gvfs::common::result::OptionExt;
    ///
    /// struct Quiet;
    /// impl OutputSink for Quiet {
    ///     fn write_line(&self, _message: &str) {}
    /// }
    ///
    /// let reporter = ErrorReporter::new("example", Arc::new(Quiet));
    /// let missing: Option<u32> = None;
    /// assert!(missing.or_abort(&reporter, || VerbError::GitNotInstalled).is_err());
    /// ```
    fn or_abort<F>(self, reporter: &ErrorReporter, error: F) -> VerbResult<T>
    where
        F: FnOnce() -> VerbError;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_abort<F>(self, reporter: &ErrorReporter, error: F) -> VerbResult<T>
    where
        F: FnOnce() -> VerbError,
    {
        self.ok_or_else(|| reporter.fail(error()))
    }
}

/// Turns any `Result` into a reported abort.
pub trait ResultExt<T, E> {
    /// Map the error into a [`VerbError`] and abort through `reporter`.
    fn or_abort<F>(self, reporter: &ErrorReporter, f: F) -> VerbResult<T>
    where
        F: FnOnce(E) -> VerbError;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn or_abort<F>(self, reporter: &ErrorReporter, f: F) -> VerbResult<T>
    where
        F: FnOnce(E) -> VerbError,
    {
        self.map_err(|e| reporter.fail(f(e)))
    }
}
