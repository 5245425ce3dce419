//! Terminal render and notification sinks.
//!
//! Everything printed from the wire passes through [`terminal_safe`], so a
//! peer cannot move the cursor or rewrite earlier lines with control codes.

#[cfg(test)]
#[path = "sinks_test.rs"]
mod sinks_test;

use chat_stream::{ChatMessage, NotifySink, RenderSink, Toast, TypingEvent};
use time::{OffsetDateTime, UtcOffset};

/// Replace line breaks and tabs with spaces and drop other control
/// characters.
pub fn terminal_safe(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// `HH:MM` for a millisecond Unix timestamp at `offset`.
pub fn clock(timestamp_ms: i64, offset: UtcOffset) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp_ms) * 1_000_000)
        .map(|t| t.to_offset(offset))
        .map_or_else(|_| "--:--".to_owned(), |t| format!("{:02}:{:02}", t.hour(), t.minute()))
}

/// `[HH:MM] user: text`, with `[bot]` after bot usernames.
pub fn format_line(message: &ChatMessage, offset: UtcOffset) -> String {
    let tag = if message.is_bot { " [bot]" } else { "" };
    format!(
        "[{}] {}{tag}: {}",
        clock(message.timestamp, offset),
        terminal_safe(&message.username),
        terminal_safe(&message.message)
    )
}

/// Prints each message to stdout.
#[derive(Clone, Copy, Debug)]
pub struct TerminalView {
    offset: UtcOffset,
}

impl TerminalView {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl RenderSink for TerminalView {
    fn render(&self, message: &ChatMessage) {
        println!("{}", format_line(message, self.offset));
    }

    fn typing(&self, event: &TypingEvent) {
        tracing::debug!(user = %terminal_safe(&event.username), typing = event.is_typing, "typing update");
    }
}

/// Writes notifications to stderr so stdout stays a clean transcript.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier;

impl NotifySink for StderrNotifier {
    fn notify(&self, toast: Toast) {
        eprintln!("* [{}] {}", toast.level.as_str(), terminal_safe(&toast.text));
    }
}
