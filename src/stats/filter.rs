use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;

use super::UNKNOWN_VISITOR;

/// Visitors already counted on the current Pacific day.
///
/// Lives for the lifetime of one process. A restart, or a second instance
/// behind the same load balancer, starts with an empty set, so a visitor
/// can be counted more than once per day across those boundaries.
pub struct SeenVisitors {
    inner: Mutex<SeenDay>,
}

struct SeenDay {
    date: NaiveDate,
    seen: HashSet<String>,
}

impl SeenVisitors {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            inner: Mutex::new(SeenDay {
                date: today,
                seen: HashSet::new(),
            }),
        }
    }

    /// Returns `true` the first time `identity` shows up on `today`.
    pub fn check_and_mark(&self, identity: &str, today: NaiveDate) -> bool {
        let mut day = self.inner.lock().unwrap_or_else(|p| p.into_inner());

        if day.date != today {
            tracing::debug!(
                "New day {}, dropping {} seen visitors from {}",
                today,
                day.seen.len(),
                day.date
            );
            day.seen = HashSet::new();
            day.date = today;
        }

        if identity == UNKNOWN_VISITOR {
            return false;
        }

        day.seen.insert(identity.to_string())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
