//! Classification report types.

use filtercheck_config::{MatchType, TestCase};
use serde::Serialize;

/// The result of classifying a whole test corpus:
/// `MatchType -> EventType -> Vec<TestCase>`.
///
/// The `none` bucket is always present and comes first; the remaining
/// buckets appear in order of first match. Ordering is deterministic for
/// fixed stores.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub buckets: Vec<Bucket>,
}

/// All test cases that landed in one match type.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub match_type: MatchType,
    pub events: Vec<EventResults>,
}

/// The test cases of one event type within a bucket.
#[derive(Debug, Clone, Serialize)]
pub struct EventResults {
    pub event_type: String,
    pub cases: Vec<TestCase>,
}

impl Report {
    /// An empty report with the `none` bucket pre-seeded.
    pub fn new() -> Self {
        Report {
            buckets: vec![Bucket {
                match_type: MatchType::None,
                events: Vec::new(),
            }],
        }
    }

    /// File a test case under `match_type`/`event_type`, creating the
    /// bucket and event section on first use.
    pub fn push(&mut self, match_type: MatchType, event_type: &str, case: TestCase) {
        let bi = match self.buckets.iter().position(|b| b.match_type == match_type) {
            Some(i) => i,
            None => {
                self.buckets.push(Bucket {
                    match_type,
                    events: Vec::new(),
                });
                self.buckets.len() - 1
            }
        };
        let bucket = &mut self.buckets[bi];
        match bucket.events.iter_mut().find(|e| e.event_type == event_type) {
            Some(entry) => entry.cases.push(case),
            None => bucket.events.push(EventResults {
                event_type: event_type.to_string(),
                cases: vec![case],
            }),
        }
    }

    /// Bucket for a match type, if present.
    pub fn bucket(&self, match_type: &MatchType) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.match_type == *match_type)
    }

    /// Total filed cases across all buckets. A dual-membership case
    /// counts once per bucket it landed in.
    pub fn case_count(&self) -> usize {
        self.buckets
            .iter()
            .flat_map(|b| &b.events)
            .map(|e| e.cases.len())
            .sum()
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}
