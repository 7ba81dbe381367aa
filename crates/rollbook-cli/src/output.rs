//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for validation errors and dataset check findings.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use rollbook_schemas::ValidationError;
use std::io::{self, Write};

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    #[allow(dead_code)]
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer targeting stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write an informational message (suppressed when quiet)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            writeln!(self.writer, "{}", message.bright_blue())?;
        } else {
            writeln!(self.writer, "{}", message)?;
        }
        Ok(())
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            writeln!(self.writer, "{}", message.green())?;
        } else {
            writeln!(self.writer, "{}", message)?;
        }
        Ok(())
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            writeln!(self.writer, "{}", message.yellow())?;
        } else {
            writeln!(self.writer, "{}", message)?;
        }
        Ok(())
    }

    /// Write an error message (never suppressed)
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            writeln!(self.writer, "{}", message.red())?;
        } else {
            writeln!(self.writer, "{}", message)?;
        }
        Ok(())
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.use_color {
            writeln!(self.writer, "\n{}", title.bold().underline())?;
        } else {
            writeln!(self.writer, "\n{}\n{}", title, "=".repeat(title.len()))?;
        }
        Ok(())
    }

    /// Write a serializable value in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = match self.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty | OutputFormat::Human => {
                serde_json::to_string_pretty(value)?
            }
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        writeln!(self.writer, "{}", formatted)?;
        Ok(())
    }

    /// Write a validation error in the configured format
    pub fn validation_error(&mut self, error: &ValidationError) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                self.error(&format!("  at {}: {}", error.path, error.message))?;
                self.error(&format!("  code: {}", error.code))?;
            }
            _ => self.data(error)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollbook_schemas::RuleCode;
    use std::sync::{Arc, Mutex};

    /// Test writer that shares its buffer with the assertion site.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuf) {
        let buf = SharedBuf::default();
        let writer =
            OutputWriter::with_writer(format, false, quiet, 0, Box::new(buf.clone()));
        (writer, buf)
    }

    #[test]
    fn test_quiet_suppresses_info_but_not_errors() {
        let (mut out, buf) = writer(OutputFormat::Human, true);
        out.info("hello").unwrap();
        out.success("done").unwrap();
        out.error("boom").unwrap();
        assert_eq!(buf.contents(), "boom\n");
    }

    #[test]
    fn test_validation_error_human() {
        let (mut out, buf) = writer(OutputFormat::Human, false);
        let error = ValidationError::new("$[0].date", RuleCode::InvalidDate, "bad date");
        out.validation_error(&error).unwrap();
        let text = buf.contents();
        assert!(text.contains("$[0].date"));
        assert!(text.contains("invalid_date"));
    }

    #[test]
    fn test_validation_error_json() {
        let (mut out, buf) = writer(OutputFormat::Json, false);
        let error = ValidationError::new("$", RuleCode::InvalidSchema, "bad shape");
        out.validation_error(&error).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(buf.contents().trim()).unwrap();
        assert_eq!(parsed["code"], "invalid_schema");
        assert_eq!(parsed["path"], "$");
    }

    #[test]
    fn test_data_yaml() {
        let (mut out, buf) = writer(OutputFormat::Yaml, false);
        out.data(&serde_json::json!({"a": 1})).unwrap();
        assert!(buf.contents().contains("a: 1"));
    }
}
