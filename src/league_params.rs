use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Fallback baseline for any league or event type missing from the tables.
pub const DEFAULT_BASELINE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goals,
    ShotsH1,
    CornersH1,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Goals, EventType::ShotsH1, EventType::CornersH1];

    pub fn key(self) -> &'static str {
        match self {
            EventType::Goals => "goals",
            EventType::ShotsH1 => "shots_h1",
            EventType::CornersH1 => "corners_h1",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        match raw {
            "goals" => Some(EventType::Goals),
            "shots_h1" => Some(EventType::ShotsH1),
            "corners_h1" => Some(EventType::CornersH1),
            _ => None,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeagueProfile {
    pub name: &'static str,
    pub goals: f64,
    pub corners_h1: f64,
    pub shots_h1: f64,
}

impl LeagueProfile {
    pub fn average(&self, event: EventType) -> f64 {
        match event {
            EventType::Goals => self.goals,
            EventType::ShotsH1 => self.shots_h1,
            EventType::CornersH1 => self.corners_h1,
        }
    }
}

const fn profile(name: &'static str, goals: f64, corners_h1: f64, shots_h1: f64) -> LeagueProfile {
    LeagueProfile {
        name,
        goals,
        corners_h1,
        shots_h1,
    }
}

const LEAGUE_TABLE: [LeagueProfile; 12] = [
    profile("Bundesliga", 3.20, 4.41, 5.8),
    profile("Saudi_Pro_League", 2.96, 4.85, 4.2),
    profile("Jupiler_League", 2.52, 4.48, 4.6),
    profile("Brasileirao", 3.00, 5.00, 4.5),
    profile("La_Liga", 2.62, 4.69, 5.1),
    profile("Ligue_1", 2.85, 4.32, 5.2),
    profile("Premier_League", 2.79, 4.63, 5.9),
    profile("Championship", 2.58, 4.73, 4.9),
    profile("Serie_A", 2.40, 4.02, 5.0),
    profile("Eredivisie", 3.24, 4.95, 5.4),
    profile("Liga_Portugal", 2.77, 4.39, 4.4),
    profile("Super_Lig", 2.61, 4.44, 4.8),
];

static LEAGUES: Lazy<HashMap<&'static str, LeagueProfile>> =
    Lazy::new(|| LEAGUE_TABLE.iter().map(|p| (p.name, *p)).collect());

// Applied to the favorite's expectation when it plays away from home.
const AWAY_GOALS: f64 = 0.82;
const AWAY_CORNERS_H1: f64 = 0.88;
const AWAY_SHOTS_H1: f64 = 0.90;

pub fn league_profile(name: &str) -> Option<&'static LeagueProfile> {
    LEAGUES.get(name)
}

pub fn league_average(name: &str, event: EventType) -> f64 {
    league_profile(name)
        .map(|p| p.average(event))
        .unwrap_or(DEFAULT_BASELINE)
}

pub fn league_average_by_key(name: &str, event_key: &str) -> f64 {
    match EventType::from_key(event_key) {
        Some(event) => league_average(name, event),
        None => DEFAULT_BASELINE,
    }
}

pub fn away_multiplier(event: EventType) -> f64 {
    match event {
        EventType::Goals => AWAY_GOALS,
        EventType::ShotsH1 => AWAY_SHOTS_H1,
        EventType::CornersH1 => AWAY_CORNERS_H1,
    }
}

pub fn away_multiplier_by_key(event_key: &str) -> f64 {
    EventType::from_key(event_key)
        .map(away_multiplier)
        .unwrap_or(DEFAULT_BASELINE)
}

pub fn known_leagues() -> impl Iterator<Item = &'static str> {
    LEAGUE_TABLE.iter().map(|p| p.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brasileirao_goals_baseline() {
        assert_eq!(league_average("Brasileirao", EventType::Goals), 3.00);
        assert_eq!(league_average("Brasileirao", EventType::CornersH1), 5.00);
        assert_eq!(league_average("Brasileirao", EventType::ShotsH1), 4.5);
    }

    #[test]
    fn unknown_league_uses_default_for_every_event() {
        for event in EventType::ALL {
            assert_eq!(league_average("Sunday_League", event), DEFAULT_BASELINE);
        }
        assert!(league_profile("Sunday_League").is_none());
    }

    #[test]
    fn unknown_event_key_uses_default() {
        assert_eq!(league_average_by_key("Serie_A", "cards"), DEFAULT_BASELINE);
        assert_eq!(away_multiplier_by_key("cards"), DEFAULT_BASELINE);
        assert_eq!(league_average_by_key("Serie_A", "shots_h1"), 5.0);
    }

    #[test]
    fn away_multipliers_are_fractions() {
        for event in EventType::ALL {
            let m = away_multiplier(event);
            assert!(m > 0.0 && m <= 1.0, "{event}: {m}");
        }
        assert_eq!(away_multiplier(EventType::Goals), 0.82);
    }

    #[test]
    fn event_keys_round_trip() {
        for event in EventType::ALL {
            assert_eq!(EventType::from_key(event.key()), Some(event));
        }
        assert_eq!(EventType::from_key(" Corners_H1 "), None);
        assert_eq!(EventType::from_key("Goals"), None);
        assert_eq!(EventType::from_key("shots_h1 "), None);
    }

    #[test]
    fn table_lists_twelve_leagues() {
        assert_eq!(known_leagues().count(), 12);
        assert!(known_leagues().all(|name| league_profile(name).is_some()));
    }
}
