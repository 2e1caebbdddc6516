//! Unique-visit counter persisted in a pinned Discord message.

pub mod codec;
pub mod filter;
pub mod ingest;
pub mod store;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

pub use codec::CounterState;
pub use filter::SeenVisitors;
pub use ingest::{VisitNotice, VisitOutcome, VisitTracker};
pub use store::{CounterStore, DiscordCounterStore, StoreError, StoredCounter};

/// All "today" decisions and displayed timestamps use this zone.
pub const PACIFIC: Tz = chrono_tz::America::Los_Angeles;

pub const UNKNOWN_VISITOR: &str = "unknown";

pub fn pacific_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&PACIFIC).date_naive()
}

/// Text of a freshly created stats message.
pub fn initial_message(now: DateTime<Utc>) -> String {
    let state = CounterState {
        daily_count: 0,
        total_count: 0,
        last_reset_date: Some(pacific_date(now)),
    };
    codec::encode(&state, now)
}
