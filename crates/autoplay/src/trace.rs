use crate::AutoplayError;
use cookiebot_core::{tier_name, ScoreRecord, SessionConfig, TIER_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionStatus {
    Completed,
    Aborted,
    Cancelled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionStats {
    pub ticks: u64,
    pub clicks: u64,
    pub purchases: [u64; TIER_COUNT],
    pub skipped_ticks: u64,
    pub elapsed_ms: u64,
}

impl SessionStats {
    pub fn total_purchases(&self) -> u64 {
        self.purchases.iter().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionReport {
    pub status: SessionStatus,
    pub config: SessionConfig,
    pub record: Option<ScoreRecord>,
    #[serde(default)]
    pub abort_reason: Option<String>,
    pub stats: SessionStats,
}

/// User-facing message for a session that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl SessionReport {
    pub fn notice(&self) -> Option<Notice> {
        match self.status {
            SessionStatus::Completed => None,
            SessionStatus::Aborted => Some(Notice {
                title: "Game Aborted".to_string(),
                body: "The game was aborted because the game window was closed.".to_string(),
            }),
            SessionStatus::Cancelled => Some(Notice {
                title: "Game Cancelled".to_string(),
                body: "The game was stopped before its time ran out.".to_string(),
            }),
        }
    }

    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("status: {}", status_label(self.status)),
            format!(
                "mode: {}  time: {}s",
                self.config.mode_label(),
                self.config.duration_secs()
            ),
        ];
        match self.record.as_ref() {
            Some(record) => lines.push(format!("cps: {}", record.cps)),
            None => lines.push("cps: (not recorded)".to_string()),
        }
        if let Some(reason) = self.abort_reason.as_ref() {
            lines.push(format!("reason: {reason}"));
        }
        lines.push(format!(
            "ticks: {} clicks: {} skipped: {} elapsed: {}ms",
            self.stats.ticks, self.stats.clicks, self.stats.skipped_ticks, self.stats.elapsed_ms
        ));
        lines.push(format!("purchases: {}", self.stats.total_purchases()));
        for (tier, count) in self.stats.purchases.iter().enumerate() {
            if *count > 0 {
                lines.push(format!("  {:<12} x{count}", tier_name(tier)));
            }
        }
        lines.join("\n")
    }
}

fn status_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Completed => "Completed",
        SessionStatus::Aborted => "Aborted",
        SessionStatus::Cancelled => "Cancelled",
    }
}

pub fn write_json(path: &Path, report: &SessionReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: SessionStatus) -> SessionReport {
        let config = SessionConfig::new(true, true, 30, Some(0.625)).expect("config");
        let mut stats = SessionStats {
            ticks: 100,
            clicks: 90,
            ..SessionStats::default()
        };
        stats.purchases[0] = 4;
        stats.purchases[1] = 1;
        SessionReport {
            status,
            config,
            record: (status == SessionStatus::Completed)
                .then(|| ScoreRecord::from_session(&config, 1.6)),
            abort_reason: None,
            stats,
        }
    }

    #[test]
    fn text_report_lists_purchases_per_tier() {
        let text = report(SessionStatus::Completed).to_text_report();
        assert!(text.contains("status: Completed"));
        assert!(text.contains("mode: Full-Auto[0.625]"));
        assert!(text.contains("purchases: 5"));
        assert!(text.contains("Cursor"));
        assert!(text.contains("Grandma"));
        assert!(!text.contains("Factory"));
    }

    #[test]
    fn only_unfinished_sessions_notify() {
        assert!(report(SessionStatus::Completed).notice().is_none());
        let notice = report(SessionStatus::Aborted).notice().expect("notice");
        assert_eq!(notice.title, "Game Aborted");
        assert!(report(SessionStatus::Cancelled).notice().is_some());
    }

    #[test]
    fn json_report_round_trips_status() {
        let path = std::env::temp_dir().join(format!(
            "cookiebot_report_{}_{}.json",
            std::process::id(),
            line!()
        ));
        write_json(&path, &report(SessionStatus::Aborted)).expect("write");
        let body = std::fs::read_to_string(&path).expect("read");
        let parsed: SessionReport = serde_json::from_str(&body).expect("parse");
        assert_eq!(parsed.status, SessionStatus::Aborted);
        assert!(parsed.record.is_none());
        let _ = std::fs::remove_file(path);
    }
}
