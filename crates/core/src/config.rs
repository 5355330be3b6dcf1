use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("time must be a whole number of seconds, got {0:?}")]
    InvalidDuration(String),
    #[error("time must be greater than zero")]
    ZeroDuration,
    #[error("ratio must be a number, got {0:?}")]
    InvalidRatio(String),
    #[error("ratio must lie within [0, 1], got {0}")]
    RatioOutOfRange(f64),
    #[error("ratio is required when buy-out is enabled")]
    MissingRatio,
}

/// Settings of one session. Validated on construction and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionConfig")]
pub struct SessionConfig {
    click_enabled: bool,
    ratio: Option<f64>,
    duration_secs: u32,
}

#[derive(Deserialize)]
struct RawSessionConfig {
    click_enabled: bool,
    ratio: Option<f64>,
    duration_secs: u32,
}

impl TryFrom<RawSessionConfig> for SessionConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSessionConfig) -> Result<Self, Self::Error> {
        Self::new(raw.click_enabled, raw.ratio.is_some(), raw.duration_secs, raw.ratio)
    }
}

impl SessionConfig {
    /// `ratio` is required iff `purchase_enabled`; it is dropped otherwise.
    pub fn new(
        click_enabled: bool,
        purchase_enabled: bool,
        duration_secs: u32,
        ratio: Option<f64>,
    ) -> Result<Self, ConfigError> {
        if duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        let ratio = if purchase_enabled {
            let value = ratio.ok_or(ConfigError::MissingRatio)?;
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioOutOfRange(value));
            }
            Some(value)
        } else {
            None
        };
        Ok(Self {
            click_enabled,
            ratio,
            duration_secs,
        })
    }

    /// Builds a config from raw text entries of a control panel.
    pub fn parse(
        click_enabled: bool,
        purchase_enabled: bool,
        time_text: &str,
        ratio_text: &str,
    ) -> Result<Self, ConfigError> {
        let time_text = time_text.trim();
        let duration_secs = match time_text.parse::<i64>() {
            Ok(value) if value <= 0 => return Err(ConfigError::ZeroDuration),
            Ok(value) => u32::try_from(value)
                .map_err(|_| ConfigError::InvalidDuration(time_text.to_string()))?,
            Err(_) => return Err(ConfigError::InvalidDuration(time_text.to_string())),
        };
        let ratio = if purchase_enabled {
            let ratio_text = ratio_text.trim();
            if ratio_text.is_empty() {
                return Err(ConfigError::MissingRatio);
            }
            let value = ratio_text
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidRatio(ratio_text.to_string()))?;
            Some(value)
        } else {
            None
        };
        Self::new(click_enabled, purchase_enabled, duration_secs, ratio)
    }

    pub fn click_enabled(&self) -> bool {
        self.click_enabled
    }

    pub fn purchase_enabled(&self) -> bool {
        self.ratio.is_some()
    }

    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn play_style(&self) -> PlayStyle {
        match (self.click_enabled, self.ratio) {
            (true, Some(ratio)) => PlayStyle::FullAuto { ratio },
            (true, None) => PlayStyle::Clicker,
            (false, Some(ratio)) => PlayStyle::BuyOut { ratio },
            (false, None) => PlayStyle::Manual,
        }
    }

    pub fn mode_label(&self) -> String {
        self.play_style().to_string()
    }
}

/// Which automation a session runs; doubles as the leaderboard mode label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayStyle {
    FullAuto { ratio: f64 },
    Clicker,
    BuyOut { ratio: f64 },
    Manual,
}

impl fmt::Display for PlayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullAuto { ratio } => write!(f, "Full-Auto[{}]", format_ratio(*ratio)),
            Self::Clicker => f.write_str("Clicker"),
            Self::BuyOut { ratio } => write!(f, "Buy-Out[{}]", format_ratio(*ratio)),
            Self::Manual => f.write_str("Manual"),
        }
    }
}

/// Shortest round-trip form that always keeps a decimal point: `1.0`, `0.625`.
pub fn format_ratio(ratio: f64) -> String {
    let text = ratio.to_string();
    if text.contains('.') || text.contains("inf") || text.contains("NaN") {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_flags() {
        let full = SessionConfig::new(true, true, 5, Some(0.625)).expect("config");
        assert_eq!(full.mode_label(), "Full-Auto[0.625]");
        let clicker = SessionConfig::new(true, false, 5, Some(0.3)).expect("config");
        assert_eq!(clicker.mode_label(), "Clicker");
        assert_eq!(clicker.ratio(), None);
        let buy = SessionConfig::new(false, true, 5, Some(1.0)).expect("config");
        assert_eq!(buy.mode_label(), "Buy-Out[1.0]");
        let manual = SessionConfig::new(false, false, 5, None).expect("config");
        assert_eq!(manual.mode_label(), "Manual");
    }

    #[test]
    fn parse_rejects_bad_entries_before_start() {
        assert_eq!(
            SessionConfig::parse(true, true, "ten", "0.5"),
            Err(ConfigError::InvalidDuration("ten".to_string()))
        );
        assert_eq!(
            SessionConfig::parse(true, true, "0", "0.5"),
            Err(ConfigError::ZeroDuration)
        );
        assert_eq!(
            SessionConfig::parse(true, true, "-3", "0.5"),
            Err(ConfigError::ZeroDuration)
        );
        assert_eq!(
            SessionConfig::parse(true, true, "10", "abc"),
            Err(ConfigError::InvalidRatio("abc".to_string()))
        );
        assert_eq!(
            SessionConfig::parse(false, true, "10", ""),
            Err(ConfigError::MissingRatio)
        );
        assert_eq!(
            SessionConfig::parse(true, true, "10", "1.5"),
            Err(ConfigError::RatioOutOfRange(1.5))
        );
    }

    #[test]
    fn parse_ignores_ratio_without_buy_out() {
        let config = SessionConfig::parse(true, false, " 30 ", "not a number").expect("config");
        assert_eq!(config.duration_secs(), 30);
        assert!(config.click_enabled());
        assert!(!config.purchase_enabled());
    }

    #[test]
    fn deserialized_config_is_validated() {
        let config = SessionConfig::new(false, true, 30, Some(0.5)).expect("config");
        let text = serde_json::to_string(&config).expect("serialize");
        let back: SessionConfig = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, config);

        let zero = r#"{"click_enabled":true,"ratio":null,"duration_secs":0}"#;
        assert!(serde_json::from_str::<SessionConfig>(zero).is_err());
        let wide = r#"{"click_enabled":true,"ratio":1.5,"duration_secs":10}"#;
        assert!(serde_json::from_str::<SessionConfig>(wide).is_err());
    }

    #[test]
    fn ratio_formatting_keeps_decimal_point() {
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(1.0), "1.0");
        assert_eq!(format_ratio(0.0), "0.0");
        assert_eq!(format_ratio(0.625), "0.625");
    }
}
