use crate::SessionConfig;
use serde::{Deserialize, Serialize};

/// Outcome of one finished session, as stored on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "CPS")]
    pub cps: f64,
    #[serde(rename = "Time")]
    pub time: u32,
    #[serde(rename = "Mode")]
    pub mode: String,
}

impl ScoreRecord {
    pub fn new(cps: f64, time: u32, mode: impl Into<String>) -> Self {
        Self {
            cps,
            time,
            mode: mode.into(),
        }
    }

    pub fn from_session(config: &SessionConfig, cps: f64) -> Self {
        Self::new(cps, config.duration_secs(), config.mode_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_record_carries_duration_and_label() {
        let config = SessionConfig::new(false, true, 45, Some(0.75)).expect("config");
        let record = ScoreRecord::from_session(&config, 12.5);
        assert_eq!(record, ScoreRecord::new(12.5, 45, "Buy-Out[0.75]"));
    }
}
