//! Invariants that must hold for every well-formed calendar and budget.

use icsplit_core::{Line, SplitConfig, SplitPlan, Splitter};
use proptest::prelude::*;

#[derive(Debug)]
struct Calendar {
    header: String,
    events: Vec<String>,
    text: String,
}

fn arb_property() -> impl Strategy<Value = String> {
    prop_oneof![
        // Values are lower case so no property line can spell a marker.
        4 => "[A-Z]{1,10}(;[A-Z]+=[a-z]+)?:[a-z0-9 :/.@-]{0,60}",
        1 => "[ \t][a-zA-Z0-9 :]{0,40}",
    ]
}

fn arb_event(uid: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_property(), 0..8).prop_map(move |props| {
        let mut event = format!("BEGIN:VEVENT\nUID:{uid}@test\n");
        for prop in props {
            event.push_str(&prop);
            event.push('\n');
        }
        event.push_str("END:VEVENT\n");
        event
    })
}

fn arb_calendar() -> impl Strategy<Value = Calendar> {
    let header = prop::collection::vec("[A-Z]{1,10}:[a-z0-9 .-]{0,30}", 0..5);
    let events = (0usize..25).prop_flat_map(|count| {
        (0..count).map(arb_event).collect::<Vec<_>>()
    });

    (header, events).prop_map(|(props, events)| {
        let mut header = String::from("BEGIN:VCALENDAR\n");
        for prop in props {
            header.push_str(&prop);
            header.push('\n');
        }
        let text = format!("{}{}END:VCALENDAR\n", header, events.concat());
        Calendar {
            header,
            events,
            text,
        }
    })
}

fn plan(calendar: &Calendar, budget: u64) -> SplitPlan {
    Splitter::new(SplitConfig::new(budget).unwrap())
        .plan_str(&calendar.text)
        .expect("well-formed calendar must split")
}

proptest! {
    #[test]
    fn prop_header_is_identical_in_every_segment(calendar in arb_calendar(), budget in 1u64..2000) {
        for segment in plan(&calendar, budget).segments() {
            let header: String = segment.header().lines().iter().map(Line::text).collect();
            prop_assert_eq!(&header, &calendar.header);
            prop_assert!(segment.to_text().starts_with(&calendar.header));
            prop_assert!(segment.to_text().ends_with("END:VCALENDAR\n"));
        }
    }

    #[test]
    fn prop_events_are_whole_and_in_order(calendar in arb_calendar(), budget in 1u64..2000) {
        let plan = plan(&calendar, budget);

        let events: Vec<String> = plan
            .segments()
            .iter()
            .flat_map(|s| s.events())
            .map(|e| e.lines().iter().map(Line::text).collect::<String>())
            .collect();

        prop_assert_eq!(events, calendar.events.clone());
        let total: usize = plan.segments().iter().map(|s| s.event_count()).sum();
        prop_assert_eq!(total, calendar.events.len());
        prop_assert_eq!(plan.stats().events, calendar.events.len());
    }

    #[test]
    fn prop_only_single_event_segments_exceed_budget(calendar in arb_calendar(), budget in 1u64..2000) {
        for segment in plan(&calendar, budget).segments() {
            prop_assert_eq!(segment.to_text().len() as u64, segment.byte_size());
            if segment.event_count() >= 2 {
                prop_assert!(
                    segment.byte_size() <= budget,
                    "segment {} has {} bytes for a budget of {}",
                    segment.index(),
                    segment.byte_size(),
                    budget
                );
            }
        }
    }

    #[test]
    fn prop_segments_are_numbered_and_never_empty(calendar in arb_calendar(), budget in 1u64..2000) {
        let plan = plan(&calendar, budget);

        prop_assert!(!plan.is_empty());
        for (i, segment) in plan.segments().iter().enumerate() {
            prop_assert_eq!(segment.index(), i + 1);
            if !calendar.events.is_empty() {
                prop_assert!(segment.event_count() >= 1);
            }
        }
    }

    #[test]
    fn prop_split_is_deterministic(calendar in arb_calendar(), budget in 1u64..2000) {
        let shape = |plan: SplitPlan| -> Vec<(u64, usize)> {
            plan.segments().iter().map(|s| (s.byte_size(), s.event_count())).collect()
        };
        prop_assert_eq!(shape(plan(&calendar, budget)), shape(plan(&calendar, budget)));
    }
}
