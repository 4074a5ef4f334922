//! Error type for pattern parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// A pattern failed to parse.
///
/// `offset` is the byte offset into the pattern at which parsing stopped.
/// This is the only error the library produces: layout never fails on a
/// tree the parser accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct SyntaxError {
    pub message: String,
    pub offset: usize,
}

impl SyntaxError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }

    /// Format the error with source context using ariadne.
    ///
    /// `name` labels the source in the report, e.g. `"<pattern>"` or a
    /// file name.
    pub fn format(&self, pattern: &str, name: &str) -> String {
        let at = self.offset.min(pattern.len());
        let end = pattern[at..]
            .chars()
            .next()
            .map_or(at, |c| at + c.len_utf8());

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, name, at)
            .with_message(&self.message)
            .with_label(
                Label::new((name, at..end))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((name, Source::from(pattern)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_offset() {
        let err = SyntaxError::new("unterminated group", 2);
        assert_eq!(err.to_string(), "unterminated group at offset 2");
    }

    #[test]
    fn test_format_reports_message() {
        let err = SyntaxError::new("unterminated group", 2);
        let report = err.format("(a", "<pattern>");
        assert!(report.contains("unterminated group"));
        assert!(report.contains("<pattern>"));
    }

    #[test]
    fn test_format_offset_at_end_of_input() {
        // Offset equal to the pattern length must not panic.
        let err = SyntaxError::new("unterminated character class", 4);
        let report = err.format("[abc", "<pattern>");
        assert!(report.contains("unterminated character class"));
    }
}
