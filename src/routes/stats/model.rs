use serde::Serialize;

use crate::stats::VisitOutcome;

#[derive(Debug, Serialize)]
pub struct TrackVisitResponse {
    pub success: bool,
    pub unique: bool,
}

impl From<VisitOutcome> for TrackVisitResponse {
    fn from(outcome: VisitOutcome) -> Self {
        Self {
            success: outcome.accepted,
            unique: outcome.is_unique_visit,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitStatsResponse {
    pub success: bool,
    pub message_id: String,
    pub instructions: String,
}

impl InitStatsResponse {
    pub fn created(message_id: String) -> Self {
        Self {
            success: true,
            instructions: format!(
                "Add this to your .env file: DISCORD_STATS_MESSAGE_ID={message_id}"
            ),
            message_id,
        }
    }
}
