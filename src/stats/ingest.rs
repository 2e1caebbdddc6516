use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

use super::codec::{decode, encode};
use super::filter::SeenVisitors;
use super::store::{CounterStore, StoreError};
use super::{UNKNOWN_VISITOR, pacific_date};

/// Address information carried by one visit notification.
#[derive(Debug, Clone, Default)]
pub struct VisitNotice {
    pub forwarded_for: Option<String>,
    pub client_ip: Option<String>,
}

impl VisitNotice {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::to_string)
        };
        Self {
            forwarded_for: header("x-forwarded-for"),
            client_ip: header("client-ip"),
        }
    }

    /// First forwarded-for hop, then the client-ip header, then `"unknown"`.
    pub fn identity(&self) -> String {
        self.forwarded_for
            .as_deref()
            .and_then(|chain| chain.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .or_else(|| {
                self.client_ip
                    .as_deref()
                    .map(str::trim)
                    .filter(|ip| !ip.is_empty())
            })
            .unwrap_or(UNKNOWN_VISITOR)
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitOutcome {
    pub accepted: bool,
    pub is_unique_visit: bool,
}

pub struct VisitTracker {
    seen: SeenVisitors,
    store: Arc<dyn CounterStore>,
}

impl VisitTracker {
    pub fn new(store: Arc<dyn CounterStore>, now: DateTime<Utc>) -> Self {
        Self {
            seen: SeenVisitors::new(pacific_date(now)),
            store,
        }
    }

    /// Records one visit. Store failures are logged and swallowed; the
    /// outcome only reflects the duplicate filter's verdict.
    pub async fn track(&self, visit: &VisitNotice, now: DateTime<Utc>) -> VisitOutcome {
        let identity = visit.identity();
        let today = pacific_date(now);
        let is_unique_visit = self.seen.check_and_mark(&identity, today);

        if is_unique_visit {
            match self.record(now).await {
                Ok(()) => tracing::debug!("Recorded unique visit for {}", today),
                Err(StoreError::NotConfigured) => {
                    tracing::debug!("Visit tracking disabled, stats message not configured")
                }
                Err(e) => tracing::error!("Failed to update stats: {}", e),
            }
        }

        VisitOutcome {
            accepted: true,
            is_unique_visit,
        }
    }

    async fn record(&self, now: DateTime<Utc>) -> Result<(), StoreError> {
        let stored = self.store.read().await?;
        let mut state = decode(&stored.content);
        state.record_visit(pacific_date(now));
        self.store.write(&encode(&state, now)).await
    }
}
