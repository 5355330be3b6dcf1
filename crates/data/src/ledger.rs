use crate::{CsvFileStore, LedgerError, LedgerStore};
use cookiebot_core::ScoreRecord;
use std::cmp::Ordering;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardColumn {
    Cps,
    Time,
    Mode,
}

impl LeaderboardColumn {
    pub const ALL: [LeaderboardColumn; 3] = [Self::Cps, Self::Time, Self::Mode];

    pub fn label(self) -> &'static str {
        match self {
            Self::Cps => "CPS",
            Self::Time => "Time",
            Self::Mode => "Mode",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cps" => Some(Self::Cps),
            "time" => Some(Self::Time),
            "mode" => Some(Self::Mode),
            _ => None,
        }
    }

    fn compare(self, a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
        match self {
            Self::Cps => a.cps.total_cmp(&b.cps),
            Self::Time => a.time.cmp(&b.time),
            Self::Mode => a.mode.cmp(&b.mode),
        }
    }
}

/// Copy of `records` ordered by `column`. The input is left untouched.
pub fn rank_by(
    records: &[ScoreRecord],
    column: LeaderboardColumn,
    descending: bool,
) -> Vec<ScoreRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| {
        let ord = column.compare(a, b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    out
}

/// Append-only record of finished sessions.
///
/// Rows are loaded on first access and every append rewrites the whole
/// store. Ordering is applied only when a ranking is requested.
pub struct ScoreLedger {
    store: Box<dyn LedgerStore>,
    records: Option<Vec<ScoreRecord>>,
}

impl ScoreLedger {
    pub fn new(store: impl LedgerStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            records: None,
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(CsvFileStore::new(path))
    }

    pub fn location(&self) -> String {
        self.store.describe()
    }

    pub fn records(&mut self) -> Result<&[ScoreRecord], LedgerError> {
        Ok(self.loaded()?.as_slice())
    }

    pub fn len(&mut self) -> Result<usize, LedgerError> {
        Ok(self.loaded()?.len())
    }

    pub fn is_empty(&mut self) -> Result<bool, LedgerError> {
        Ok(self.loaded()?.is_empty())
    }

    pub fn append(&mut self, record: ScoreRecord) -> Result<(), LedgerError> {
        self.loaded()?;
        let Some(records) = self.records.as_mut() else {
            return Err(LedgerError::Io("ledger not loaded".to_string()));
        };
        records.push(record);
        if let Err(err) = self.store.save(records) {
            records.pop();
            return Err(err);
        }
        info!(
            location = %self.store.describe(),
            rows = records.len(),
            "score recorded"
        );
        Ok(())
    }

    /// All records ordered by CPS, best first.
    pub fn leaderboard(&mut self) -> Result<Vec<ScoreRecord>, LedgerError> {
        self.sorted_by(LeaderboardColumn::Cps, true)
    }

    pub fn sorted_by(
        &mut self,
        column: LeaderboardColumn,
        descending: bool,
    ) -> Result<Vec<ScoreRecord>, LedgerError> {
        Ok(rank_by(self.loaded()?, column, descending))
    }

    fn loaded(&mut self) -> Result<&Vec<ScoreRecord>, LedgerError> {
        if self.records.is_none() {
            self.records = Some(self.store.load()?);
        }
        self.records
            .as_ref()
            .ok_or_else(|| LedgerError::Io("ledger not loaded".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn first_run_has_empty_leaderboard() {
        let mut ledger = ScoreLedger::new(MemoryStore::new());
        assert!(ledger.leaderboard().expect("board").is_empty());
    }

    #[test]
    fn append_persists_full_set() {
        let store = MemoryStore::with_rows(vec![ScoreRecord::new(1.0, 10, "Manual")]);
        let mut ledger = ScoreLedger::new(store.clone());
        ledger
            .append(ScoreRecord::new(4.2, 10, "Clicker"))
            .expect("append");
        assert_eq!(store.rows().len(), 2);
        assert_eq!(store.rows()[0].mode, "Manual");
    }

    #[test]
    fn failed_save_leaves_memory_unchanged() {
        let mut ledger = ScoreLedger::new(MemoryStore::read_only(Vec::new()));
        assert!(ledger.append(ScoreRecord::new(4.2, 10, "Clicker")).is_err());
        assert_eq!(ledger.len().expect("len"), 0);
    }

    #[test]
    fn column_names_parse() {
        assert_eq!(LeaderboardColumn::from_name("CPS"), Some(LeaderboardColumn::Cps));
        assert_eq!(LeaderboardColumn::from_name(" time "), Some(LeaderboardColumn::Time));
        assert_eq!(LeaderboardColumn::from_name("mode"), Some(LeaderboardColumn::Mode));
        assert_eq!(LeaderboardColumn::from_name("ratio"), None);
    }
}
