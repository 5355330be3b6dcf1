//! Automated play sessions: the timed click-and-buy loop, its countdown and
//! the launcher that runs both side by side.

mod clock;
mod config;
mod countdown;
mod error;
mod launcher;
mod session;
mod signal;
mod surface;
mod sweep;
mod trace;

pub use clock::*;
pub use config::*;
pub use countdown::*;
pub use error::*;
pub use launcher::*;
pub use session::*;
pub use signal::*;
pub use surface::*;
pub use sweep::*;
pub use trace::*;
