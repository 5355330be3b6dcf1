use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Automated,
    Manual,
}

impl SessionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Automated => Self::Manual,
            Self::Manual => Self::Automated,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Automated => "automated",
            Self::Manual => "manual",
        }
    }
}

/// Session mode shared between the input side (single writer) and the
/// session loop (single reader). Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ModeSwitch {
    manual: Arc<AtomicBool>,
}

impl ModeSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SessionMode {
        if self.manual.load(Ordering::Acquire) {
            SessionMode::Manual
        } else {
            SessionMode::Automated
        }
    }

    /// Flips the mode and returns the new value.
    pub fn toggle(&self) -> SessionMode {
        let was_manual = self.manual.fetch_xor(true, Ordering::AcqRel);
        if was_manual {
            SessionMode::Automated
        } else {
            SessionMode::Manual
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_automated() {
        assert_eq!(ModeSwitch::new().current(), SessionMode::Automated);
    }

    #[test]
    fn double_toggle_restores_automated() {
        let switch = ModeSwitch::new();
        assert_eq!(switch.toggle(), SessionMode::Manual);
        assert_eq!(switch.current(), SessionMode::Manual);
        assert_eq!(switch.toggle(), SessionMode::Automated);
        assert_eq!(switch.current(), SessionMode::Automated);
    }

    #[test]
    fn clones_share_state() {
        let switch = ModeSwitch::new();
        let remote = switch.clone();
        remote.toggle();
        assert_eq!(switch.current(), SessionMode::Manual);
        assert_eq!(SessionMode::Manual.toggled(), SessionMode::Automated);
    }
}
