//! Parsing of the numbers the live game shows as text.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadoutError {
    #[error("unreadable money readout {0:?}")]
    Money(String),
    #[error("unreadable price readout {0:?}")]
    Price(String),
    #[error("unreadable rate readout {0:?}")]
    Rate(String),
}

fn strip_grouping(text: &str) -> String {
    text.trim().chars().filter(|ch| *ch != ',').collect()
}

/// `"1,234"` -> `1234`.
pub fn parse_money(text: &str) -> Result<u64, ReadoutError> {
    strip_grouping(text)
        .parse::<u64>()
        .map_err(|_| ReadoutError::Money(text.to_string()))
}

/// Store entries read `"<name> - <price>"`, e.g. `"Cursor - 1,500"`.
pub fn parse_price(text: &str) -> Result<u64, ReadoutError> {
    let (_, price) = text
        .split_once("- ")
        .ok_or_else(|| ReadoutError::Price(text.to_string()))?;
    strip_grouping(price)
        .parse::<u64>()
        .map_err(|_| ReadoutError::Price(text.to_string()))
}

/// Rate line reads `"per second : <rate>"`.
pub fn parse_rate(text: &str) -> Result<f64, ReadoutError> {
    let (_, rate) = text
        .split_once(": ")
        .ok_or_else(|| ReadoutError::Rate(text.to_string()))?;
    let value = strip_grouping(rate)
        .parse::<f64>()
        .map_err(|_| ReadoutError::Rate(text.to_string()))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ReadoutError::Rate(text.to_string()))
    }
}
