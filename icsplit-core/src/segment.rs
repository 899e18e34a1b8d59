//! Packing events into size-bounded segments.

use std::iter;
use std::sync::Arc;

use crate::config::SplitConfig;
use crate::error::SplitResult;
use crate::header::{CalendarHeader, HeaderParts};
use crate::line::Line;
use crate::scan::{LineRole, LineSource, ScanState};

/// One `VEVENT` block, from its `BEGIN` line to its `END` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    lines: Vec<Line>,
    byte_size: u64,
}

impl Event {
    fn open(line: Line) -> Self {
        let mut event = Event {
            lines: Vec::new(),
            byte_size: 0,
        };
        event.push(line);
        event
    }

    fn push(&mut self, line: Line) {
        self.byte_size += line.byte_len() as u64;
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }
}

/// One output calendar: the shared header, whole events, and the footer.
#[derive(Debug, Clone)]
pub struct Segment {
    index: usize,
    header: Arc<CalendarHeader>,
    footer: Arc<Line>,
    events: Vec<Event>,
    byte_size: u64,
}

impl Segment {
    fn open(index: usize, header: Arc<CalendarHeader>, footer: Arc<Line>) -> Self {
        let byte_size = header.byte_size() + footer.byte_len() as u64;
        Segment {
            index,
            header,
            footer,
            events: Vec::new(),
            byte_size,
        }
    }

    /// True if `event` must start a new segment instead of joining this one.
    ///
    /// An empty segment always accepts, so an oversized event still gets a
    /// segment of its own. A total exactly at the budget fits.
    fn is_full_for(&self, event: &Event, config: &SplitConfig) -> bool {
        if self.events.is_empty() {
            return false;
        }

        let over_budget = self.byte_size + event.byte_size > config.max_bytes();
        let at_event_cap = config
            .max_events()
            .is_some_and(|max| self.events.len() >= max.get());

        over_budget || at_event_cap
    }

    fn push(&mut self, event: Event) {
        self.byte_size += event.byte_size;
        self.events.push(event);
    }

    /// End with the input's own closing line instead of the rebuilt one,
    /// unless that would grow the segment past what was budgeted.
    fn close_with(&mut self, closing: Line) {
        if closing.byte_len() <= self.footer.byte_len() {
            self.byte_size -= (self.footer.byte_len() - closing.byte_len()) as u64;
            self.footer = Arc::new(closing);
        }
    }

    /// 1-based position in the plan.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Serialized size in bytes: header, events and footer.
    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn header(&self) -> &CalendarHeader {
        &self.header
    }

    pub fn footer(&self) -> &Line {
        &self.footer
    }

    /// Every output line in order: header, events, footer.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.header
            .lines()
            .iter()
            .chain(self.events.iter().flat_map(|e| e.lines.iter()))
            .chain(iter::once(self.footer.as_ref()))
    }

    pub fn to_text(&self) -> String {
        self.lines().map(Line::text).collect()
    }
}

/// Counters available once a split has run to completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    pub segments: usize,
    pub events: usize,
    /// Non-event lines between events (or after the calendar) that were dropped.
    pub skipped_lines: usize,
}

/// Lazy, single-pass iterator over the segments of one calendar.
///
/// Segments are yielded as soon as they are full, before the rest of the
/// input has been checked. A structural error further down is yielded as the
/// last item; callers that need all-or-nothing output must stage what they
/// receive until the iterator is exhausted. After an error the iterator is
/// fused.
pub struct Segments<I> {
    config: SplitConfig,
    header: Arc<CalendarHeader>,
    footer: Arc<Line>,
    source: LineSource<I>,
    state: ScanState,
    first_event_line: Option<Line>,
    closing_line: Option<Line>,
    carried: Option<Event>,
    stats: SplitStats,
    exhausted: bool,
    done: bool,
}

impl<I> Segments<I>
where
    I: Iterator<Item = SplitResult<Line>>,
{
    pub fn new(parts: HeaderParts<I>, config: SplitConfig) -> Self {
        Segments {
            config,
            header: Arc::new(parts.header),
            footer: Arc::new(parts.footer),
            source: parts.rest.source,
            state: parts.rest.state,
            first_event_line: parts.rest.first_event_line,
            closing_line: parts.rest.closing_line,
            carried: None,
            stats: SplitStats::default(),
            exhausted: false,
            done: false,
        }
    }

    pub fn header(&self) -> &CalendarHeader {
        &self.header
    }

    pub fn footer(&self) -> &Line {
        &self.footer
    }

    /// Counters so far; final once the iterator has returned `None`.
    pub fn stats(&self) -> SplitStats {
        self.stats
    }

    fn next_segment(&mut self) -> SplitResult<Option<Segment>> {
        let mut segment = Segment::open(
            self.stats.segments + 1,
            Arc::clone(&self.header),
            Arc::clone(&self.footer),
        );
        if let Some(event) = self.carried.take() {
            segment.push(event);
        }

        while let Some(event) = self.next_event()? {
            if segment.is_full_for(&event, &self.config) {
                self.carried = Some(event);
                return Ok(Some(self.seal(segment)));
            }
            segment.push(event);
        }

        if let Some(closing) = self.closing_line.take() {
            segment.close_with(closing);
        }

        // A calendar without events still yields one (empty) segment.
        if segment.event_count() > 0 || self.stats.segments == 0 {
            Ok(Some(self.seal(segment)))
        } else {
            Ok(None)
        }
    }

    fn seal(&mut self, segment: Segment) -> Segment {
        self.stats.segments += 1;
        segment
    }

    /// Read the next complete event, or `None` once the whole input has been
    /// read and validated.
    fn next_event(&mut self) -> SplitResult<Option<Event>> {
        let mut current = self.first_event_line.take().map(Event::open);

        loop {
            if self.exhausted {
                return Ok(None);
            }

            let Some(line) = self.source.next_line()? else {
                self.exhausted = true;
                self.source.finish(self.state)?;
                return Ok(None);
            };

            match self.source.advance(&mut self.state, &line)? {
                LineRole::EventStart => current = Some(Event::open(line)),
                LineRole::EventBody => {
                    if let Some(event) = current.as_mut() {
                        event.push(line);
                    }
                }
                LineRole::EventEnd => {
                    if let Some(mut event) = current.take() {
                        event.push(line);
                        self.stats.events += 1;
                        return Ok(Some(event));
                    }
                }
                LineRole::Skipped => self.stats.skipped_lines += 1,
                // Keep reading after END:VCALENDAR so trailing components are caught.
                LineRole::Footer => self.closing_line = Some(line),
                LineRole::Header => {}
            }
        }
    }
}

impl<I> Iterator for Segments<I>
where
    I: Iterator<Item = SplitResult<Line>>,
{
    type Item = SplitResult<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.next_segment();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result.transpose()
    }
}

impl<I> iter::FusedIterator for Segments<I> where I: Iterator<Item = SplitResult<Line>> {}
