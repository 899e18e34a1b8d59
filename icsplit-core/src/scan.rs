//! The per-line state machine shared by header extraction and segmenting.

use crate::error::{MalformedKind, SplitError, SplitResult};
use crate::line::Line;
use crate::marker::Marker;

/// Where the scanner is in the calendar structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    OutsideCalendar,
    InHeader,
    InEvent,
    BetweenEvents,
    CalendarClosed,
}

/// What a line contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Header,
    EventStart,
    EventBody,
    EventEnd,
    Footer,
    Skipped,
}

impl ScanState {
    /// Feed one line's marker through the state machine.
    ///
    /// Every (state, marker) pair is handled; illegal transitions return the
    /// structural violation they represent.
    pub fn advance(self, marker: Option<Marker>) -> Result<(ScanState, LineRole), MalformedKind> {
        use LineRole::*;
        use ScanState::*;

        match (self, marker) {
            (OutsideCalendar, Some(Marker::CalendarOpen)) => Ok((InHeader, Header)),
            (OutsideCalendar, Some(_)) => Err(MalformedKind::MissingCalendarOpen),
            (OutsideCalendar, None) => Ok((OutsideCalendar, Skipped)),

            (InHeader, Some(Marker::EventOpen)) => Ok((InEvent, EventStart)),
            (InHeader, Some(Marker::CalendarClose)) => Ok((CalendarClosed, Footer)),
            (InHeader, Some(Marker::EventClose)) => Err(MalformedKind::UnmatchedEventClose),
            (InHeader, Some(Marker::CalendarOpen)) => Err(MalformedKind::DuplicateCalendarOpen),
            (InHeader, None) => Ok((InHeader, Header)),

            (InEvent, Some(Marker::EventClose)) => Ok((BetweenEvents, EventEnd)),
            (InEvent, Some(Marker::EventOpen)) => Err(MalformedKind::NestedEvent),
            (InEvent, Some(Marker::CalendarClose)) => Err(MalformedKind::UnterminatedEvent),
            (InEvent, Some(Marker::CalendarOpen)) => Err(MalformedKind::DuplicateCalendarOpen),
            (InEvent, None) => Ok((InEvent, EventBody)),

            (BetweenEvents, Some(Marker::EventOpen)) => Ok((InEvent, EventStart)),
            (BetweenEvents, Some(Marker::CalendarClose)) => Ok((CalendarClosed, Footer)),
            (BetweenEvents, Some(Marker::EventClose)) => Err(MalformedKind::UnmatchedEventClose),
            (BetweenEvents, Some(Marker::CalendarOpen)) => Err(MalformedKind::DuplicateCalendarOpen),
            (BetweenEvents, None) => Ok((BetweenEvents, Skipped)),

            (CalendarClosed, Some(_)) => Err(MalformedKind::TrailingComponent),
            (CalendarClosed, None) => Ok((CalendarClosed, Skipped)),
        }
    }

    /// Check the state reached at end of input.
    pub fn finish(self, lines_seen: usize) -> Result<(), MalformedKind> {
        match self {
            ScanState::CalendarClosed => Ok(()),
            ScanState::OutsideCalendar if lines_seen == 0 => Err(MalformedKind::EmptyInput),
            ScanState::OutsideCalendar => Err(MalformedKind::MissingCalendarOpen),
            ScanState::InHeader | ScanState::BetweenEvents => Err(MalformedKind::MissingCalendarClose),
            ScanState::InEvent => Err(MalformedKind::UnterminatedEvent),
        }
    }
}

/// Line iterator that keeps a 1-based count for diagnostics.
pub(crate) struct LineSource<I> {
    inner: I,
    lines_seen: usize,
}

impl<I> LineSource<I>
where
    I: Iterator<Item = SplitResult<Line>>,
{
    pub(crate) fn new(inner: I) -> Self {
        Self {
            inner,
            lines_seen: 0,
        }
    }

    pub(crate) fn next_line(&mut self) -> SplitResult<Option<Line>> {
        let line = self.inner.next().transpose()?;
        if line.is_some() {
            self.lines_seen += 1;
        }
        Ok(line)
    }

    pub(crate) fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    pub(crate) fn malformed(&self, kind: MalformedKind) -> SplitError {
        SplitError::malformed(self.lines_seen, kind)
    }

    /// Run a line through `state`, mapping violations to positioned errors.
    pub(crate) fn advance(&self, state: &mut ScanState, line: &Line) -> SplitResult<LineRole> {
        let (next, role) = state.advance(line.marker()).map_err(|kind| self.malformed(kind))?;
        *state = next;
        Ok(role)
    }

    pub(crate) fn finish(&self, state: ScanState) -> SplitResult<()> {
        state.finish(self.lines_seen).map_err(|kind| self.malformed(kind))
    }
}
