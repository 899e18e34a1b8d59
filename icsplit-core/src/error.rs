//! Error types for the splitting engine.

use std::fmt;

use thiserror::Error;

/// Structural problems that make a calendar impossible to split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    EmptyInput,
    MissingCalendarOpen,
    DuplicateCalendarOpen,
    MissingCalendarClose,
    NestedEvent,
    UnterminatedEvent,
    UnmatchedEventClose,
    TrailingComponent,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MalformedKind::EmptyInput => "input is empty",
            MalformedKind::MissingCalendarOpen => "BEGIN:VEVENT found before BEGIN:VCALENDAR",
            MalformedKind::DuplicateCalendarOpen => "BEGIN:VCALENDAR found inside an open calendar",
            MalformedKind::MissingCalendarClose => "END:VCALENDAR not found",
            MalformedKind::NestedEvent => "BEGIN:VEVENT found inside another event",
            MalformedKind::UnterminatedEvent => "event is missing END:VEVENT",
            MalformedKind::UnmatchedEventClose => "END:VEVENT found outside an event",
            MalformedKind::TrailingComponent => "calendar content found after END:VCALENDAR",
        };
        f.write_str(msg)
    }
}

/// Errors that can occur while splitting a calendar.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Malformed calendar at line {line}: {kind}")]
    Malformed { line: usize, kind: MalformedKind },

    #[error("Line {line} cannot be decoded as {encoding}")]
    Encoding { line: usize, encoding: &'static str },

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Cannot understand size specification {0}")]
    InvalidSize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitError {
    pub(crate) fn malformed(line: usize, kind: MalformedKind) -> Self {
        SplitError::Malformed { line, kind }
    }

    /// The structural violation, if this is a malformed-calendar error.
    pub fn malformed_kind(&self) -> Option<MalformedKind> {
        match self {
            SplitError::Malformed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias for splitting operations.
pub type SplitResult<T> = Result<T, SplitError>;
