use cookiebot_data::LeaderboardColumn;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    NextFocus,
    PrevFocus,
    Activate,
    Space,
    ToggleClicker,
    ToggleBuyOut,
    Start,
    DismissCountdown,
    CloseGame,
    Cancel,
    ToggleLeaderboard,
    SortBy(LeaderboardColumn),
    ClosePopup,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Cancel,
        KeyCode::Esc => InputAction::ClosePopup,
        KeyCode::Tab | KeyCode::Down => InputAction::NextFocus,
        KeyCode::BackTab | KeyCode::Up => InputAction::PrevFocus,
        KeyCode::Enter => InputAction::Activate,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char(' ') => InputAction::Space,
        KeyCode::Char('j') => InputAction::NextFocus,
        KeyCode::Char('k') => InputAction::PrevFocus,
        KeyCode::Char('c') => InputAction::ToggleClicker,
        KeyCode::Char('b') => InputAction::ToggleBuyOut,
        KeyCode::Char('s') => InputAction::Start,
        KeyCode::Char('x') => InputAction::DismissCountdown,
        KeyCode::Char('w') => InputAction::CloseGame,
        KeyCode::Char('l') => InputAction::ToggleLeaderboard,
        KeyCode::Char('1') => InputAction::SortBy(LeaderboardColumn::Cps),
        KeyCode::Char('2') => InputAction::SortBy(LeaderboardColumn::Time),
        KeyCode::Char('3') => InputAction::SortBy(LeaderboardColumn::Mode),
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_basic_actions() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)),
            InputAction::Space
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            InputAction::Activate
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            InputAction::Quit
        );
    }

    #[test]
    fn ctrl_c_cancels_instead_of_toggling() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Cancel
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            InputAction::ToggleClicker
        );
    }

    #[test]
    fn digits_pick_leaderboard_columns() {
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE)),
            InputAction::SortBy(LeaderboardColumn::Time)
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE)),
            InputAction::SortBy(LeaderboardColumn::Mode)
        );
    }
}
