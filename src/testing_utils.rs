//! In-memory feed and payload builders shared by unit tests.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::SportConfig;
use crate::data_fetcher::api::FeedSource;
use crate::data_fetcher::models::{ScheduleResponse, SummaryResponse};
use crate::error::AppError;

type ScheduleScript = VecDeque<Result<Vec<Value>, u16>>;

/// [`FeedSource`] answering from scripted responses.
///
/// Each (season, phase) and the summary endpoint hold a queue of responses;
/// every call takes the next one and the last one repeats. Unscripted
/// schedule requests answer 404.
#[derive(Default)]
pub struct ScriptedFeed {
    schedules: Mutex<HashMap<(i32, u32), ScheduleScript>>,
    summaries: Mutex<VecDeque<Value>>,
    schedule_requests: Mutex<Vec<(i32, u32)>>,
    summary_calls: AtomicUsize,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(self, season: i32, phase: u32, events: Vec<Value>) -> Self {
        self.push_schedule(season, phase, Ok(events));
        self
    }

    pub fn failing_schedule(self, season: i32, phase: u32, status: u16) -> Self {
        self.push_schedule(season, phase, Err(status));
        self
    }

    pub fn summary(self, body: Value) -> Self {
        self.summaries.lock().unwrap().push_back(body);
        self
    }

    fn push_schedule(&self, season: i32, phase: u32, response: Result<Vec<Value>, u16>) {
        self.schedules
            .lock()
            .unwrap()
            .entry((season, phase))
            .or_default()
            .push_back(response);
    }

    pub fn schedule_requests(&self) -> Vec<(i32, u32)> {
        self.schedule_requests.lock().unwrap().clone()
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

fn next_scripted<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

impl FeedSource for ScriptedFeed {
    async fn fetch_schedule(
        &self,
        sport: &SportConfig,
        season: i32,
        phase: u32,
    ) -> Result<ScheduleResponse, AppError> {
        self.schedule_requests.lock().unwrap().push((season, phase));
        let url = format!("{}?season={season}&seasontype={phase}", sport.feed_base_url);
        let scripted = self
            .schedules
            .lock()
            .unwrap()
            .get_mut(&(season, phase))
            .and_then(next_scripted);

        match scripted {
            Some(Ok(events)) => Ok(ScheduleResponse {
                events: Some(events),
            }),
            Some(Err(status)) => Err(AppError::api_server_error(status, "scripted failure", url)),
            None => Err(AppError::api_not_found(url)),
        }
    }

    async fn fetch_summary(
        &self,
        sport: &SportConfig,
        event_id: &str,
    ) -> Result<SummaryResponse, AppError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        let body = next_scripted(&mut self.summaries.lock().unwrap()).ok_or_else(|| {
            AppError::api_not_found(format!("{}/summary?event={event_id}", sport.feed_base_url))
        })?;
        Ok(serde_json::from_value(body)?)
    }
}

pub fn competitor(home_away: &str, code: &str, score: &str, winner: bool) -> Value {
    json!({
        "homeAway": home_away,
        "team": {"abbreviation": code},
        "score": score,
        "winner": winner
    })
}

/// Schedule event with `ku` at home against `opp`.
pub fn event(id: &str, start: DateTime<Utc>, state: &str, completed: bool) -> Value {
    let (ours, theirs) = if completed { ("78", "70") } else { ("0", "0") };
    json!({
        "id": id,
        "date": start.format("%Y-%m-%dT%H:%MZ").to_string(),
        "competitions": [{
            "status": {"type": {"name": state, "completed": completed}},
            "competitors": [
                competitor("home", "KU", ours, completed),
                competitor("away", "OPP", theirs, false)
            ]
        }]
    })
}

pub fn final_event(id: &str, start: DateTime<Utc>) -> Value {
    event(id, start, "STATUS_FINAL", true)
}

pub fn scheduled_event(id: &str, start: DateTime<Utc>) -> Value {
    event(id, start, "STATUS_SCHEDULED", false)
}

/// Summary payload with `ku` at home against `opp`.
pub fn summary(id: &str, state: &str, completed: bool, ours: &str, theirs: &str) -> Value {
    let won = completed && ours.parse::<u32>().ok() > theirs.parse::<u32>().ok();
    json!({
        "header": {
            "id": id,
            "competitions": [{
                "status": {"type": {"name": state, "completed": completed}},
                "competitors": [
                    competitor("home", "KU", ours, won),
                    competitor("away", "OPP", theirs, completed && !won)
                ]
            }]
        }
    })
}
