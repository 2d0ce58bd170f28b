//! Log sink for session diagnostics
//!
//! The session reports exactly two kinds of lines; everything else goes
//! through `tracing` on stderr.

use std::io::{self, Write};

/// Line written when the connection opens, just before the greeting is sent
pub const SENDING_LINE: &str = "Sending message to server";

/// Prefix of the line written for every inbound text message
pub const MESSAGE_PREFIX: &str = "Message from server:";

/// Destination for the session's diagnostic lines
pub trait LogSink {
    /// Write one complete line
    fn line(&mut self, line: &str);
}

/// Writes lines to standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn line(&mut self, line: &str) {
        let mut stdout = io::stdout().lock();
        // Write errors on stdout are ignored
        let _ = writeln!(stdout, "{}", line);
        let _ = stdout.flush();
    }
}

/// Collects lines in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl LogSink for MemorySink {
    fn line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Format the line logged for an inbound message
pub fn message_line(payload: &str) -> String {
    format!("{} {}", MESSAGE_PREFIX, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_line() {
        assert_eq!(message_line("Pong"), "Message from server: Pong");
    }

    #[test]
    fn test_message_line_keeps_payload_verbatim() {
        assert_eq!(
            message_line("  {\"a\": 1}\tend "),
            "Message from server:   {\"a\": 1}\tend "
        );
        assert_eq!(message_line(""), "Message from server: ");
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::default();
        sink.line("one");
        sink.line("two");
        assert_eq!(sink.lines, vec!["one", "two"]);
    }
}
