//! Recognition of the four structural lines the splitter cares about.

/// A structural line of an iCalendar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    CalendarOpen,
    CalendarClose,
    EventOpen,
    EventClose,
}

impl Marker {
    pub const fn as_str(self) -> &'static str {
        match self {
            Marker::CalendarOpen => "BEGIN:VCALENDAR",
            Marker::CalendarClose => "END:VCALENDAR",
            Marker::EventOpen => "BEGIN:VEVENT",
            Marker::EventClose => "END:VEVENT",
        }
    }

    /// Classify a raw line (terminator included or not).
    ///
    /// Matching is exact and case-sensitive on the content left after
    /// removing the line terminator. Folded continuation lines start with a
    /// space or tab and never match, whatever follows.
    pub fn classify(raw: &str) -> Option<Marker> {
        let content = strip_terminator(raw);
        if is_continuation(content) {
            return None;
        }

        match content {
            "BEGIN:VCALENDAR" => Some(Marker::CalendarOpen),
            "END:VCALENDAR" => Some(Marker::CalendarClose),
            "BEGIN:VEVENT" => Some(Marker::EventOpen),
            "END:VEVENT" => Some(Marker::EventClose),
            _ => None,
        }
    }
}

/// True for folded lines (RFC 5545 section 3.1).
pub fn is_continuation(raw: &str) -> bool {
    raw.starts_with([' ', '\t'])
}

/// Remove a trailing `\n` or `\r\n`, nothing else.
pub fn strip_terminator(raw: &str) -> &str {
    match raw.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => raw,
    }
}

/// The line terminator of `raw`, empty if it has none.
pub fn terminator(raw: &str) -> &str {
    &raw[strip_terminator(raw).len()..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_markers() {
        assert_eq!(Marker::classify("BEGIN:VCALENDAR\r\n"), Some(Marker::CalendarOpen));
        assert_eq!(Marker::classify("END:VCALENDAR\n"), Some(Marker::CalendarClose));
        assert_eq!(Marker::classify("BEGIN:VEVENT"), Some(Marker::EventOpen));
        assert_eq!(Marker::classify("END:VEVENT\r\n"), Some(Marker::EventClose));
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(Marker::classify("begin:vevent\n"), None);
        assert_eq!(Marker::classify("Begin:VEvent\n"), None);
    }

    #[test]
    fn test_classify_does_not_trim_whitespace() {
        assert_eq!(Marker::classify("BEGIN:VEVENT \n"), None);
        assert_eq!(Marker::classify(" BEGIN:VEVENT\n"), None);
        assert_eq!(Marker::classify("\tEND:VEVENT\r\n"), None);
    }

    #[test]
    fn test_classify_ignores_other_components() {
        assert_eq!(Marker::classify("BEGIN:VALARM\n"), None);
        assert_eq!(Marker::classify("BEGIN:VTIMEZONE\n"), None);
        assert_eq!(Marker::classify("BEGIN:VEVENTX\n"), None);
    }

    #[test]
    fn test_terminator_variants() {
        assert_eq!(terminator("END:VEVENT\r\n"), "\r\n");
        assert_eq!(terminator("END:VEVENT\n"), "\n");
        assert_eq!(terminator("END:VEVENT"), "");
        assert_eq!(strip_terminator("A\r\n"), "A");
        assert_eq!(strip_terminator("A\r"), "A\r");
    }
}
