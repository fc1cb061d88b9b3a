//! Birthdays and anniversaries, and the merger that hands them out day by day.

use crate::error::{DataFormatError, EventOrderingViolation};
use chrono::NaiveDate;

/// A label containing this character is an anniversary rather than a birthday
pub const ANNIVERSARY_MARKER: char = '&';

/// A birthday or anniversary attached to a date
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AnnotationEvent {
    pub month: u32,
    pub day: u32,
    /// Year of birth or marriage
    pub year: i32,
    pub label: String,
}

impl AnnotationEvent {
    pub fn new<S: ToString>(month: u32, day: u32, year: i32, label: S) -> AnnotationEvent {
        AnnotationEvent {
            month,
            day,
            year,
            label: label.to_string(),
        }
    }

    pub fn is_anniversary(&self) -> bool {
        self.label.contains(ANNIVERSARY_MARKER)
    }

    fn key(&self) -> (u32, u32) {
        (self.month, self.day)
    }
}

/// Parse `M/D/Y name` lines. Blank lines and lines starting with `#` are ignored;
/// anything else that does not parse is an error.
pub fn parse_events(text: &str, source_name: &str) -> Result<Vec<AnnotationEvent>, DataFormatError> {
    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let error = |reason: &str| DataFormatError {
            source_name: source_name.to_string(),
            line: i + 1,
            content: line.to_string(),
            reason: reason.to_string(),
        };

        let (date, label) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| error("missing name"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(error("missing name"));
        }

        let mut parts = date.split('/');
        let (Some(month), Some(day), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(error("expected a M/D/Y date"));
        };
        let month: u32 = month.parse().map_err(|_| error("invalid month"))?;
        let day: u32 = day.parse().map_err(|_| error("invalid day"))?;
        let year: i32 = year.parse().map_err(|_| error("invalid year"))?;

        // 2000 is a leap year, so Feb 29 is accepted here
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(error("no such date"));
        }

        events.push(AnnotationEvent::new(month, day, year, label));
    }
    Ok(events)
}

/// Fill in a template such as `{name} ({shortyear})` for one event
pub fn format_event(template: &str, event: &AnnotationEvent) -> String {
    template
        .replace("{name}", &event.label)
        .replace("{shortyear}", &format!("{:02}", event.year.rem_euclid(100)))
        .replace("{year}", &event.year.to_string())
        .replace("{month}", &event.month.to_string())
        .replace("{day}", &event.day.to_string())
}

/// Hands out events as a forward traversal of the year reaches their dates.
///
/// Events are kept sorted descending by (month, day) so the next one due is
/// always at the tail. Events sharing a date come out in the order they were
/// given.
#[derive(Debug, Clone)]
pub struct EventMerger {
    pending: Vec<AnnotationEvent>,
    cursor: Option<(u32, u32)>,
}

impl EventMerger {
    pub fn new(events: Vec<AnnotationEvent>) -> EventMerger {
        let mut indexed: Vec<(usize, AnnotationEvent)> = events.into_iter().enumerate().collect();
        // descending by date, and by file position within a date so the tail pops
        // the earliest line first
        indexed.sort_by(|(ia, a), (ib, b)| b.key().cmp(&a.key()).then(ib.cmp(ia)));
        EventMerger {
            pending: indexed.into_iter().map(|(_, e)| e).collect(),
            cursor: None,
        }
    }

    /// Build a merger for one calendar year, moving Feb 29 events to Feb 28 when
    /// the year has no leap day
    pub fn for_year(mut events: Vec<AnnotationEvent>, year: i32) -> EventMerger {
        if NaiveDate::from_ymd_opt(year, 2, 29).is_none() {
            for event in events.iter_mut().filter(|e| e.key() == (2, 29)) {
                log::debug!("{} has no Feb 29, showing '{}' on Feb 28", year, event.label);
                event.day = 28;
            }
        }
        EventMerger::new(events)
    }

    /// Remove and return every event on (`month`, `day`).
    ///
    /// The cursor must never move backwards, and no pending event may lie before
    /// it: either means an event would be silently skipped.
    pub fn pop_if_matches(
        &mut self,
        month: u32,
        day: u32,
    ) -> Result<Vec<AnnotationEvent>, EventOrderingViolation> {
        let cursor = (month, day);
        if let Some(previous) = self.cursor {
            if cursor < previous {
                return Err(EventOrderingViolation::Backwards {
                    from: previous,
                    to: cursor,
                });
            }
        }
        self.cursor = Some(cursor);

        if let Some(event) = self.pending.last() {
            if event.key() < cursor {
                return Err(EventOrderingViolation::PassedOver {
                    event: event.clone(),
                    cursor,
                });
            }
        }

        let mut due = Vec::new();
        while self.pending.last().map(AnnotationEvent::key) == Some(cursor) {
            if let Some(event) = self.pending.pop() {
                due.push(event);
            }
        }
        Ok(due)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Check that the traversal consumed everything
    pub fn finish(self) -> Result<(), EventOrderingViolation> {
        match self.pending.last() {
            Some(event) => Err(EventOrderingViolation::PassedOver {
                event: event.clone(),
                cursor: self.cursor.unwrap_or((12, 31)),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn labels(events: &[AnnotationEvent]) -> Vec<&str> {
        events.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn parses_event_lines() {
        let text = "# family\n\n1/15/2000 Bob\n 2/1/1990  Alice Smith \n12/25/1950 Ann & Joe\n";
        let events = parse_events(text, "birthdays.txt").expect("can parse events");
        assert_eq!(
            events,
            vec![
                AnnotationEvent::new(1, 15, 2000, "Bob"),
                AnnotationEvent::new(2, 1, 1990, "Alice Smith"),
                AnnotationEvent::new(12, 25, 1950, "Ann & Joe"),
            ]
        );
        assert!(!events[0].is_anniversary());
        assert!(events[2].is_anniversary());
    }

    #[test]
    fn rejects_malformed_lines() {
        for (text, line) in [
            ("1/15/2000", 1),
            ("# ok\n1/15 Bob", 2),
            ("13/1/2000 Bob", 1),
            ("2/30/2000 Bob", 1),
            ("a/1/2000 Bob", 1),
            ("1/1/2000/3 Bob", 1),
        ] {
            let err = parse_events(text, "birthdays.txt").expect_err("line is malformed");
            assert_eq!(err.line, line, "{text}");
            assert_eq!(err.source_name, "birthdays.txt");
        }
        assert!(parse_events("2/29/1996 Leap", "birthdays.txt").is_ok());
    }

    #[test]
    fn formats_templates() {
        let event = AnnotationEvent::new(3, 7, 1905, "Ada");
        assert_eq!(
            format_event("{name} ({shortyear}) {month}/{day}/{year}", &event),
            "Ada (05) 3/7/1905"
        );
    }

    #[test]
    fn merges_in_chronological_order() {
        let mut merger = EventMerger::new(vec![
            AnnotationEvent::new(2, 1, 1990, "A"),
            AnnotationEvent::new(1, 15, 2000, "B"),
            AnnotationEvent::new(1, 15, 2000, "C&D"),
        ]);

        let mut seen = Vec::new();
        for (month, days) in [(1, 31), (2, 1)] {
            for day in 1..=days {
                let due = merger.pop_if_matches(month, day).expect("in order");
                if !due.is_empty() {
                    seen.push(((month, day), due));
                }
            }
        }

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, (1, 15));
        assert_eq!(labels(&seen[0].1), ["B", "C&D"]);
        assert!(seen[0].1[1].is_anniversary());
        assert_eq!(seen[1].0, (2, 1));
        assert_eq!(labels(&seen[1].1), ["A"]);
        assert!(merger.is_empty());
        merger.finish().expect("nothing left over");
    }

    #[test]
    fn skipped_dates_are_violations() {
        let mut merger = EventMerger::new(vec![AnnotationEvent::new(1, 10, 2000, "X")]);
        merger.pop_if_matches(1, 9).expect("not due yet");
        match merger.pop_if_matches(1, 11) {
            Err(EventOrderingViolation::PassedOver { event, cursor }) => {
                assert_eq!(event.label, "X");
                assert_eq!(cursor, (1, 11));
            }
            other => panic!("expected Jan 10 to be passed over, got {other:?}"),
        }
    }

    #[test]
    fn backwards_cursor_is_a_violation() {
        let mut merger = EventMerger::new(vec![AnnotationEvent::new(3, 1, 2000, "X")]);
        merger.pop_if_matches(2, 1).expect("not due yet");
        assert_eq!(
            merger.pop_if_matches(1, 1),
            Err(EventOrderingViolation::Backwards {
                from: (2, 1),
                to: (1, 1)
            })
        );

        // nothing pending does not excuse a backwards step
        let mut empty = EventMerger::new(vec![]);
        empty.pop_if_matches(3, 1).expect("nothing due");
        assert_eq!(
            empty.pop_if_matches(1, 1),
            Err(EventOrderingViolation::Backwards {
                from: (3, 1),
                to: (1, 1)
            })
        );
    }

    #[test]
    fn leftovers_are_reported() {
        let merger = EventMerger::new(vec![AnnotationEvent::new(3, 1, 2000, "X")]);
        assert!(merger.finish().is_err());
    }

    #[test]
    fn leap_day_folds_in_common_years() {
        let events = vec![AnnotationEvent::new(2, 29, 1996, "Leap")];

        let mut common = EventMerger::for_year(events.clone(), 2023);
        assert_eq!(labels(&common.pop_if_matches(2, 28).expect("in order")), ["Leap"]);

        let mut leap = EventMerger::for_year(events, 2024);
        assert!(leap.pop_if_matches(2, 28).expect("in order").is_empty());
        assert_eq!(labels(&leap.pop_if_matches(2, 29).expect("in order")), ["Leap"]);
    }
}
