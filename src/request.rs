use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::league_params::EventType;

/// Five observations, index 0 = most recent match.
pub type HistorySeries = Vec<f64>;

pub const HISTORY_LEN: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub favorite_team: String,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub match_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_away: Option<bool>,

    // Favorite (scored).
    #[serde(default)]
    pub fav_goals_history: Option<HistorySeries>,
    #[serde(default)]
    pub fav_shots_h1_history: Option<HistorySeries>,
    #[serde(default)]
    pub fav_corners_h1_history: Option<HistorySeries>,

    // Underdog (conceded).
    #[serde(default)]
    pub underdog_goals_conceded_history: Option<HistorySeries>,
    #[serde(default)]
    pub underdog_shots_conceded_h1_history: Option<HistorySeries>,
    #[serde(default)]
    pub underdog_corners_conceded_h1_history: Option<HistorySeries>,

    #[serde(default)]
    pub prediction_goals: Option<f64>,
    #[serde(default)]
    pub prediction_shots_h1: Option<f64>,
    #[serde(default)]
    pub prediction_corners_h1: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    pub fn apply_prediction(&mut self, prediction: &PredictionResult, at: DateTime<Utc>) {
        self.prediction_goals = Some(prediction.goals);
        self.prediction_shots_h1 = Some(prediction.shots_h1);
        self.prediction_corners_h1 = Some(prediction.corners_h1);
        self.created_at = Some(at);
    }

    pub fn label(&self) -> String {
        match self.match_date {
            Some(date) => format!("{} vs {} - {}", self.home_team, self.away_team, date),
            None => format!("{} vs {}", self.home_team, self.away_team),
        }
    }
}

/// Engine input: the favorite's scored histories and the underdog's conceded histories.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRequest {
    pub league: String,
    pub is_away: bool,
    pub fav_goals: HistorySeries,
    pub fav_shots_h1: HistorySeries,
    pub fav_corners_h1: HistorySeries,
    pub dog_goals_conceded: HistorySeries,
    pub dog_shots_conceded_h1: HistorySeries,
    pub dog_corners_conceded_h1: HistorySeries,
}

impl MatchRequest {
    /// Fails on the first absent history field, checked per event (favorite then
    /// underdog) in `EventType::ALL` order. Series lengths are not checked here.
    pub fn from_record(record: &MatchRecord) -> EngineResult<Self> {
        let fav_goals = required(&record.fav_goals_history, "fav_goals_history")?;
        let dog_goals_conceded = required(
            &record.underdog_goals_conceded_history,
            "underdog_goals_conceded_history",
        )?;
        let fav_shots_h1 = required(&record.fav_shots_h1_history, "fav_shots_h1_history")?;
        let dog_shots_conceded_h1 = required(
            &record.underdog_shots_conceded_h1_history,
            "underdog_shots_conceded_h1_history",
        )?;
        let fav_corners_h1 = required(&record.fav_corners_h1_history, "fav_corners_h1_history")?;
        let dog_corners_conceded_h1 = required(
            &record.underdog_corners_conceded_h1_history,
            "underdog_corners_conceded_h1_history",
        )?;

        Ok(Self {
            league: record.league.clone().unwrap_or_default(),
            is_away: record.is_away.unwrap_or(false),
            fav_goals,
            fav_shots_h1,
            fav_corners_h1,
            dog_goals_conceded,
            dog_shots_conceded_h1,
            dog_corners_conceded_h1,
        })
    }

    pub fn from_json(raw: &str) -> EngineResult<Self> {
        let record: MatchRecord = serde_json::from_str(raw)?;
        Self::from_record(&record)
    }

    // (favorite scored, underdog conceded)
    pub fn series(&self, event: EventType) -> (&[f64], &[f64]) {
        match event {
            EventType::Goals => (&self.fav_goals[..], &self.dog_goals_conceded[..]),
            EventType::ShotsH1 => (&self.fav_shots_h1[..], &self.dog_shots_conceded_h1[..]),
            EventType::CornersH1 => (&self.fav_corners_h1[..], &self.dog_corners_conceded_h1[..]),
        }
    }

    pub fn named_series(&self) -> [(&'static str, &[f64]); 6] {
        [
            ("fav_goals_history", &self.fav_goals[..]),
            ("fav_shots_h1_history", &self.fav_shots_h1[..]),
            ("fav_corners_h1_history", &self.fav_corners_h1[..]),
            ("underdog_goals_conceded_history", &self.dog_goals_conceded[..]),
            ("underdog_shots_conceded_h1_history", &self.dog_shots_conceded_h1[..]),
            ("underdog_corners_conceded_h1_history", &self.dog_corners_conceded_h1[..]),
        ]
    }

    // Strict mode only. The engine itself degrades to 0 for malformed series.
    pub fn check_history_lengths(&self) -> EngineResult<()> {
        for (field, series) in self.named_series() {
            if series.len() != HISTORY_LEN {
                return Err(EngineError::InvalidHistoryLength {
                    field,
                    len: series.len(),
                });
            }
        }
        Ok(())
    }
}

fn required(value: &Option<HistorySeries>, field: &'static str) -> EngineResult<HistorySeries> {
    value.clone().ok_or(EngineError::MissingField(field))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "prediction_goals")]
    pub goals: f64,
    #[serde(rename = "prediction_shots_h1")]
    pub shots_h1: f64,
    #[serde(rename = "prediction_corners_h1")]
    pub corners_h1: f64,
}

impl PredictionResult {
    pub fn get(&self, event: EventType) -> f64 {
        match event {
            EventType::Goals => self.goals,
            EventType::ShotsH1 => self.shots_h1,
            EventType::CornersH1 => self.corners_h1,
        }
    }
}

/// Accepts a JSON array of records, a single record object, or `null`.
pub fn parse_match_records_json(raw: &str) -> EngineResult<Vec<MatchRecord>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        rows @ serde_json::Value::Array(_) => Ok(serde_json::from_value(rows)?),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}
