//! Status message log shown under the grid.

use pathviz_core::Color;
use pathviz_crossterm::StatusLine;

use crate::colors::{STATUS_ERROR, STATUS_FG, STATUS_GOOD, STATUS_WARN};

const MAX_ENTRIES: usize = 1000;

/// Style of a log entry, mapped to display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Normal,
    Success,
    Warning,
    Error,
}

impl LogStyle {
    pub fn color(self) -> Color {
        match self {
            Self::Normal => STATUS_FG,
            Self::Success => STATUS_GOOD,
            Self::Warning => STATUS_WARN,
            Self::Error => STATUS_ERROR,
        }
    }
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub style: LogStyle,
    pub dups: u32,
}

impl LogEntry {
    /// The entry text with a repeat counter when it was logged more than
    /// once in a row.
    pub fn display(&self) -> String {
        if self.dups > 0 {
            format!("{} ({}×)", self.text, self.dups + 1)
        } else {
            self.text.clone()
        }
    }
}

/// The visualizer's message log.
#[derive(Debug, Default)]
pub struct StatusLog {
    entries: Vec<LogEntry>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Add a message with a given style.
    pub fn log_styled(&mut self, text: &str, style: LogStyle) {
        let text = uppercase_first(text);
        log::debug!("status: {text}");

        if let Some(last) = self.entries.last_mut() {
            if last.text == text && last.style == style {
                last.dups += 1;
                return;
            }
        }
        self.entries.push(LogEntry {
            text,
            style,
            dups: 0,
        });

        if self.entries.len() > MAX_ENTRIES {
            self.entries.drain(0..MAX_ENTRIES / 10);
        }
    }

    /// Add a normal-style message.
    pub fn log(&mut self, text: &str) {
        self.log_styled(text, LogStyle::Normal);
    }

    /// The newest `max_lines` entries, oldest first, each cut to `width`
    /// characters and padded so it overwrites older text.
    pub fn recent_lines(&self, width: usize, max_lines: usize) -> Vec<StatusLine> {
        let skip = self.entries.len().saturating_sub(max_lines);
        let mut lines: Vec<StatusLine> = self.entries[skip..]
            .iter()
            .map(|e| StatusLine {
                text: e.display().chars().take(width).collect(),
                fg: e.style.color(),
            })
            .collect();
        while lines.len() < max_lines {
            lines.insert(
                0,
                StatusLine {
                    text: String::new(),
                    fg: STATUS_FG,
                },
            );
        }
        lines
    }
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_messages_are_folded() {
        let mut log = StatusLog::new();
        log.log("no path");
        log.log("no path");
        log.log("no path");
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.last().unwrap().display(), "No path (3×)");

        log.log_styled("no path", LogStyle::Warning);
        assert_eq!(log.entries().len(), 2);
    }

    #[test]
    fn recent_lines_keep_the_newest() {
        let mut log = StatusLog::new();
        log.log("one");
        log.log_styled("two", LogStyle::Success);
        log.log("a much longer third message");
        let lines = log.recent_lines(8, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Two");
        assert_eq!(lines[0].fg, STATUS_GOOD);
        assert_eq!(lines[1].text, "A much l");
    }

    #[test]
    fn recent_lines_pad_to_height() {
        let mut log = StatusLog::new();
        log.log("only");
        let lines = log.recent_lines(20, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].text.is_empty());
        assert_eq!(lines[2].text, "Only");
    }

    #[test]
    fn log_is_bounded() {
        let mut log = StatusLog::new();
        for i in 0..=MAX_ENTRIES {
            log.log(&i.to_string());
        }
        assert!(log.entries().len() <= MAX_ENTRIES);
        assert_eq!(log.last().unwrap().text, MAX_ENTRIES.to_string());
    }
}
