use colored::Colorize;

use crate::common::reporter::OutputSink;

/// Writes verb output to stdout; warnings in yellow, errors in red.
///
/// Coloring follows the global `colored` override set from `--no-color`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl OutputSink for ConsoleSink {
    fn write_line(&self, message: &str) {
        println!("{message}");
    }

    fn write_warning(&self, message: &str) {
        println!("{}", message.yellow());
    }

    fn write_error(&self, message: &str) {
        println!("{}", message.red().bold());
    }
}
