//! Output streams and process exit
//!
//! Thin wrappers over stdout/stderr and `std::process::exit` used by the
//! command handlers and the entry point.

use std::io::{self, Write};
use std::process;
use tracing::{debug, warn};

/// Write `text` followed by a newline and flush
pub fn write_line<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    writeln!(writer, "{text}")?;
    writer.flush()
}

/// Print a line to standard output
pub fn stdout(text: &str) {
    if let Err(e) = write_line(&mut io::stdout().lock(), text) {
        warn!("Failed to write to stdout: {}", e);
    }
}

/// Print a line to standard error
pub fn stderr(text: &str) {
    if let Err(e) = write_line(&mut io::stderr().lock(), text) {
        warn!("Failed to write to stderr: {}", e);
    }
}

/// Print a line to standard error, then exit with `code`
pub fn stderr_and_exit(text: &str, code: i32) -> ! {
    stderr(text);
    exit_with_status(code)
}

/// Exit the process with `code`
pub fn exit_with_status(code: i32) -> ! {
    debug!("Exiting with status {}", code);
    process::exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_appends_newline() {
        let mut buffer = Vec::new();
        write_line(&mut buffer, "hello").unwrap();
        write_line(&mut buffer, "").unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "hello\n\n");
    }

    #[test]
    fn test_write_line_keeps_embedded_newlines() {
        let mut buffer = Vec::new();
        write_line(&mut buffer, "one\ntwo").unwrap();
        assert_eq!(buffer, b"one\ntwo\n");
    }
}
