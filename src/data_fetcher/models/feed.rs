//! Wire shapes of the schedule feed.
//!
//! The feed is loosely typed: most fields may be missing, and scores arrive as
//! strings, numbers or `{value, displayValue}` objects depending on the
//! endpoint. Everything here is `Option` and is validated once by the
//! normalizer in `processors`.

use serde::{Deserialize, Deserializer, Serialize};

/// Response of the team schedule endpoint for one season and phase.
///
/// Events are kept as raw JSON so that one event with an unexpected shape
/// cannot fail the whole response; each is decoded into [`FeedEvent`] on its own.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub events: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedEvent {
    pub id: Option<String>,
    /// ISO 8601, sometimes without seconds (`2024-11-04T19:00Z`)
    pub date: Option<String>,
    #[serde(default)]
    pub competitions: Option<Vec<FeedCompetition>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedCompetition {
    pub status: Option<FeedStatus>,
    #[serde(default)]
    pub competitors: Option<Vec<FeedCompetitor>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedStatus {
    #[serde(rename = "type")]
    pub status_type: Option<FeedStatusType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedStatusType {
    /// e.g. `STATUS_SCHEDULED`, `STATUS_IN_PROGRESS`, `STATUS_FINAL`
    pub name: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>,
    pub team: Option<FeedTeam>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<FeedScore>,
    pub winner: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedTeam {
    pub id: Option<String>,
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Score as rendered by the different feed endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeedScore {
    Text(String),
    Number(f64),
    Detailed {
        #[serde(rename = "displayValue")]
        display_value: Option<String>,
        value: Option<f64>,
    },
}

/// Decodes a score without ever failing the surrounding competitor; shapes
/// that match no [`FeedScore`] variant become `None`.
fn lenient_score<'de, D>(deserializer: D) -> Result<Option<FeedScore>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Response of the single-event summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SummaryResponse {
    pub header: Option<SummaryHeader>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SummaryHeader {
    pub id: Option<String>,
    #[serde(default)]
    pub competitions: Option<Vec<FeedCompetition>>,
}
