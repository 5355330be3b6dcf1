use cookiebot_core::{ConfigError, GameError, ReadoutError};
use cookiebot_data::LedgerError;
use thiserror::Error;

/// Failure of a read or action against the game surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The page changed between read and act; only the current tick is lost.
    #[error("stale surface: {0}")]
    Transient(String),
    /// The surface is gone for good.
    #[error("surface unavailable: {0}")]
    Unavailable(String),
}

impl SurfaceError {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<ReadoutError> for SurfaceError {
    fn from(value: ReadoutError) -> Self {
        Self::Transient(value.to_string())
    }
}

impl From<GameError> for SurfaceError {
    fn from(value: GameError) -> Self {
        Self::Transient(value.to_string())
    }
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("worker error: {0}")]
    Worker(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
