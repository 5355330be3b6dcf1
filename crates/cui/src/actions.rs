use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::NextFocus => app.cycle_focus(true),
        InputAction::PrevFocus => app.cycle_focus(false),
        InputAction::Activate => app.activate(),
        InputAction::Space => app.space(),
        InputAction::ToggleClicker => app.toggle_clicker(),
        InputAction::ToggleBuyOut => app.toggle_buy_out(),
        InputAction::Start => app.start(),
        InputAction::DismissCountdown => app.dismiss_countdown(),
        InputAction::CloseGame => app.close_game(),
        InputAction::Cancel => app.cancel(),
        InputAction::ToggleLeaderboard => app.toggle_board(),
        InputAction::SortBy(column) => app.sort_board(column),
        InputAction::ClosePopup => app.close_popups(),
    }
}
