//! Core bot logic. Keep this crate free of IO and platform concerns.

pub mod catalog;
pub mod config;
pub mod countdown;
pub mod help;
pub mod mode;
pub mod readout;
pub mod record;
pub mod sim;
pub mod strategy;

pub use catalog::*;
pub use config::*;
pub use countdown::*;
pub use help::*;
pub use mode::*;
pub use readout::*;
pub use record::*;
pub use sim::*;
pub use strategy::*;
