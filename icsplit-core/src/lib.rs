//! Streaming splitter for iCalendar (`.ics`) files.
//!
//! Splits one large calendar into several smaller ones, each a complete
//! calendar on its own and each kept under a byte budget where possible:
//! - the calendar header (everything before the first `VEVENT`) is copied
//!   into every segment
//! - events are never split; an event larger than the budget gets a segment
//!   of its own
//! - lines are copied byte for byte, folded continuation lines included
//!
//! The engine does no file I/O. Callers hand it lines (from a [`LineReader`]
//! over any `BufRead`, or [`lines_from_str`]) and receive [`Segment`]s.
//!
//! ```
//! use icsplit_core::{SplitConfig, Splitter};
//!
//! let ics = "BEGIN:VCALENDAR\nVERSION:2.0\n\
//!            BEGIN:VEVENT\nUID:1\nEND:VEVENT\n\
//!            BEGIN:VEVENT\nUID:2\nEND:VEVENT\n\
//!            END:VCALENDAR\n";
//!
//! let config = SplitConfig::new(64).unwrap();
//! let plan = Splitter::new(config).plan_str(ics).unwrap();
//!
//! assert_eq!(plan.len(), 2);
//! assert!(plan.segments()[1].to_text().starts_with("BEGIN:VCALENDAR\nVERSION:2.0\n"));
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod header;
pub mod line;
pub mod marker;
pub mod scan;
pub mod segment;
pub mod size;
mod splitter;

pub use config::SplitConfig;
pub use encoding::TextEncoding;
pub use error::{MalformedKind, SplitError, SplitResult};
pub use header::{CalendarHeader, HeaderExtractor, HeaderParts};
pub use line::{Line, LineReader, lines_from_str};
pub use marker::Marker;
pub use segment::{Event, Segment, Segments, SplitStats};
pub use size::ByteSize;
pub use splitter::{SplitPlan, Splitter};
