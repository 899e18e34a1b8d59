//! Calendar header extraction.
//!
//! The header is every line from `BEGIN:VCALENDAR` up to, but excluding, the
//! first `BEGIN:VEVENT`. It is copied verbatim into every output segment.

use crate::error::{MalformedKind, SplitResult};
use crate::line::Line;
use crate::marker::{Marker, terminator};
use crate::scan::{LineRole, LineSource, ScanState};

/// The calendar-level lines shared by every segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarHeader {
    lines: Vec<Line>,
    byte_size: u64,
}

impl CalendarHeader {
    fn new(lines: Vec<Line>) -> Self {
        let byte_size = lines.iter().map(|l| l.byte_len() as u64).sum();
        Self { lines, byte_size }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }
}

/// Result of header extraction: the header, the footer line to close each
/// segment with, and the unread rest of the input.
pub struct HeaderParts<I> {
    pub header: CalendarHeader,
    pub footer: Line,
    pub(crate) rest: Remaining<I>,
}

/// Where the segmenter picks up after the header.
pub(crate) struct Remaining<I> {
    pub(crate) source: LineSource<I>,
    pub(crate) state: ScanState,
    /// The `BEGIN:VEVENT` line that ended the header, if any.
    pub(crate) first_event_line: Option<Line>,
    /// The input's own `END:VCALENDAR`, when it was already read.
    pub(crate) closing_line: Option<Line>,
}

/// Reads lines until the first event starts (or the calendar closes).
pub struct HeaderExtractor<I> {
    source: LineSource<I>,
}

impl<I> HeaderExtractor<I>
where
    I: Iterator<Item = SplitResult<Line>>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            source: LineSource::new(lines.into_iter()),
        }
    }

    /// Capture the header.
    ///
    /// Lines before `BEGIN:VCALENDAR` are ignored. For a calendar without
    /// events a missing `END:VCALENDAR` is reported here; otherwise it is
    /// reported by [`Segments`](crate::Segments) at end of stream.
    pub fn extract(mut self) -> SplitResult<HeaderParts<I>> {
        let mut state = ScanState::OutsideCalendar;
        let mut lines = Vec::new();

        while let Some(line) = self.source.next_line()? {
            match self.source.advance(&mut state, &line)? {
                LineRole::Header => lines.push(line),
                LineRole::Skipped => {}
                LineRole::EventStart => return Ok(self.finish(lines, state, Some(line), None)),
                LineRole::Footer => return Ok(self.finish(lines, state, None, Some(line))),
                LineRole::EventBody | LineRole::EventEnd => {
                    unreachable!("no event can be open before the header is complete")
                }
            }
        }

        self.source.finish(state)?;
        Err(self.source.malformed(MalformedKind::MissingCalendarClose))
    }

    fn finish(
        self,
        lines: Vec<Line>,
        state: ScanState,
        first_event_line: Option<Line>,
        closing_line: Option<Line>,
    ) -> HeaderParts<I> {
        // Segments are emitted before the closing line is read, so theirs is
        // rebuilt with the same terminator as the opening line.
        let eol = lines.first().map(|l| terminator(l.text())).unwrap_or("\n");
        let eol = if eol.is_empty() { "\n" } else { eol };
        let footer = Line::from(format!("{}{}", Marker::CalendarClose.as_str(), eol));

        HeaderParts {
            header: CalendarHeader::new(lines),
            footer,
            rest: Remaining {
                source: self.source,
                state,
                first_event_line,
                closing_line,
            },
        }
    }
}
