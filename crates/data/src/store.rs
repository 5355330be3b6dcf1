use cookiebot_core::ScoreRecord;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

pub const LEDGER_HEADERS: [&str; 3] = ["CPS", "Time", "Mode"];
const DEFAULT_LEDGER_PATH: &str = "data/score.csv";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("io error: {0}")]
    Io(String),
    #[error("format error: {0}")]
    Format(String),
}

/// Where the ledger keeps its records. Every save receives the full set.
pub trait LedgerStore: Send {
    fn load(&self) -> Result<Vec<ScoreRecord>, LedgerError>;
    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), LedgerError>;
    fn describe(&self) -> String;
}

pub fn default_ledger_path() -> PathBuf {
    if let Some(path) = std::env::var_os("COOKIEBOT_SCORES") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_LEDGER_PATH)
}

/// Tabular file with a `CPS,Time,Mode` header, one row per session.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for CsvFileStore {
    fn load(&self) -> Result<Vec<ScoreRecord>, LedgerError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger file yet");
                return Ok(Vec::new());
            }
            Err(err) => {
                return Err(LedgerError::Io(format!("{}: {err}", self.path.display())));
            }
        };
        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize::<ScoreRecord>() {
            let record =
                row.map_err(|err| LedgerError::Format(format!("{}: {err}", self.path.display())))?;
            records.push(record);
        }
        debug!(path = %self.path.display(), rows = records.len(), "ledger loaded");
        Ok(records)
    }

    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), LedgerError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if records.is_empty() {
            writer
                .write_record(LEDGER_HEADERS)
                .map_err(|err| LedgerError::Format(err.to_string()))?;
        }
        for record in records {
            writer
                .serialize(record)
                .map_err(|err| LedgerError::Format(err.to_string()))?;
        }
        let body = writer
            .into_inner()
            .map_err(|err| LedgerError::Format(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| LedgerError::Io(format!("{}: {err}", parent.display())))?;
            }
        }
        fs::write(&self.path, body)
            .map_err(|err| LedgerError::Io(format!("{}: {err}", self.path.display())))?;
        debug!(path = %self.path.display(), rows = records.len(), "ledger saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<ScoreRecord>>>,
    reject_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<ScoreRecord>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            reject_saves: false,
        }
    }

    /// A store whose saves always fail, for exercising write errors.
    pub fn read_only(rows: Vec<ScoreRecord>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            reject_saves: true,
        }
    }

    pub fn rows(&self) -> Vec<ScoreRecord> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Vec<ScoreRecord>, LedgerError> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .map_err(|_| LedgerError::Io("memory store poisoned".to_string()))
    }

    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), LedgerError> {
        if self.reject_saves {
            return Err(LedgerError::Io("memory store is read-only".to_string()));
        }
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| LedgerError::Io("memory store poisoned".to_string()))?;
        *rows = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
