//! Persistence of session outcomes and leaderboard queries.

pub mod ledger;
pub mod store;

pub use ledger::*;
pub use store::*;
