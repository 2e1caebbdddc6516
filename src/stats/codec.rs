//! Text format of the pinned stats message.
//!
//! Grammar, each field optional and located anywhere in the body:
//!
//! ```text
//! Today:** <ASCII digits>
//! Total:** <ASCII digits>
//! Last Reset:** <YYYY-MM-DD>
//! ```
//!
//! Anything else (title, emoji, the "Last Updated" line) is decoration and
//! ignored when reading back, so hand-edited or older message layouts still
//! decode.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use super::PACIFIC;

pub const TITLE: &str = "DACC Website Stats";

static TODAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Today:\*\* ([0-9]+)").expect("valid regex"));
static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total:\*\* ([0-9]+)").expect("valid regex"));
static LAST_RESET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last Reset:\*\* ([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    pub daily_count: u64,
    pub total_count: u64,
    pub last_reset_date: Option<NaiveDate>,
}

impl CounterState {
    /// Counts one accepted visit on `today`, zeroing the daily counter first
    /// when the stored reset date is a different day.
    pub fn record_visit(&mut self, today: NaiveDate) {
        if self.last_reset_date != Some(today) {
            self.daily_count = 0;
            self.last_reset_date = Some(today);
        }
        self.daily_count = self.daily_count.saturating_add(1);
        self.total_count = self.total_count.saturating_add(1);
    }
}

pub fn decode(text: &str) -> CounterState {
    CounterState {
        daily_count: capture(&TODAY_RE, text)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0),
        total_count: capture(&TOTAL_RE, text)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0),
        last_reset_date: capture(&LAST_RESET_RE, text)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
    }
}

pub fn encode(state: &CounterState, now: DateTime<Utc>) -> String {
    let updated = now.with_timezone(&PACIFIC).format("%-m/%-d/%y, %-I:%M %p %Z");
    let reset = state
        .last_reset_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        "**{TITLE}**\n---\n**Today:** {} unique visitors\n**Total:** {} unique visitors\n**Last Reset:** {}\n**Last Updated:** {}",
        state.daily_count, state.total_count, reset, updated
    )
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
