use cookiebot_autoplay::{
    launch_request, LaunchRequest, SessionHandle, SessionParts, SessionReport, SessionTuning,
    SharedDisplay, SimulatedSurface, SimulationHandle, SystemClock,
};
use cookiebot_core::{OfflineGame, ScoreRecord, SessionMode};
use cookiebot_data::{LeaderboardColumn, ScoreLedger};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Clicker,
    BuyOut,
    Ratio,
    Time,
    Start,
}

impl FocusField {
    pub const ORDER: [FocusField; 5] = [
        Self::Clicker,
        Self::BuyOut,
        Self::Ratio,
        Self::Time,
        Self::Start,
    ];

    pub fn is_text(self) -> bool {
        matches!(self, Self::Ratio | Self::Time)
    }
}

pub struct RunningSession {
    pub handle: SessionHandle,
    pub display: SharedDisplay,
    pub game: SimulationHandle,
}

#[derive(Debug, Clone)]
pub struct BoardView {
    pub column: LeaderboardColumn,
    pub descending: bool,
    pub rows: Vec<ScoreRecord>,
}

pub struct App {
    pub request: LaunchRequest,
    pub focus: FocusField,
    pub scores_path: PathBuf,
    pub tuning: SessionTuning,
    pub session: Option<RunningSession>,
    pub last_report: Option<SessionReport>,
    pub board: Option<BoardView>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(scores_path: PathBuf) -> Self {
        Self {
            request: LaunchRequest {
                clicker: true,
                buy_out: true,
                time: "60".to_string(),
                ratio: "0.625".to_string(),
            },
            focus: FocusField::Start,
            scores_path,
            tuning: SessionTuning::default(),
            session: None,
            last_report: None,
            board: None,
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_mode(&self) -> Option<SessionMode> {
        self.session.as_ref().map(|running| running.handle.mode())
    }

    pub fn countdown_text(&self) -> Option<String> {
        self.session
            .as_ref()
            .and_then(|running| running.display.text())
    }

    pub fn game_snapshot(&self) -> Option<OfflineGame> {
        self.session
            .as_ref()
            .and_then(|running| running.game.snapshot())
    }

    pub fn on_tick(&mut self) {
        let finished = self
            .session
            .as_ref()
            .is_some_and(|running| running.handle.is_finished());
        if finished {
            self.collect_session();
        }
    }

    /// Types into the focused ratio/time entry. Returns whether the key was used.
    pub fn handle_text_key(&mut self, key: KeyEvent) -> bool {
        if self.board.is_some() || self.show_help || !self.focus.is_text() {
            return false;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        let field = match self.focus {
            FocusField::Ratio => &mut self.request.ratio,
            FocusField::Time => &mut self.request.time,
            _ => return false,
        };
        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '.' => {
                field.push(ch);
                true
            }
            KeyCode::Backspace => {
                field.pop();
                true
            }
            _ => false,
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let order = FocusField::ORDER;
        let idx = order
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % order.len()
        } else {
            (idx + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    pub fn activate(&mut self) {
        match self.focus {
            FocusField::Clicker => self.toggle_clicker(),
            FocusField::BuyOut => self.toggle_buy_out(),
            FocusField::Ratio | FocusField::Time | FocusField::Start => self.start(),
        }
    }

    pub fn toggle_clicker(&mut self) {
        if !self.is_running() {
            self.request.clicker = !self.request.clicker;
        }
    }

    pub fn toggle_buy_out(&mut self) {
        if !self.is_running() {
            self.request.buy_out = !self.request.buy_out;
        }
    }

    /// Space: flips the session mode while running, otherwise the focused toggle.
    pub fn space(&mut self) {
        if let Some(running) = self.session.as_ref() {
            let mode = running.handle.toggle_mode();
            self.push_status(format!("mode: {}", mode.label()));
            return;
        }
        match self.focus {
            FocusField::Clicker => self.toggle_clicker(),
            FocusField::BuyOut => self.toggle_buy_out(),
            _ => {}
        }
    }

    pub fn start(&mut self) {
        if self.is_running() {
            self.push_status("a session is already running");
            return;
        }
        let clock = SystemClock::new();
        let surface = SimulatedSurface::new(OfflineGame::new(), clock.clone());
        let game = surface.handle();
        let display = SharedDisplay::new();
        let parts = SessionParts {
            surface,
            display: display.clone(),
            readiness: game.clone(),
            clock,
            ledger: ScoreLedger::open(self.scores_path.clone()),
            tuning: self.tuning.clone(),
        };
        match launch_request(&self.request, parts) {
            Ok(handle) => {
                self.last_report = None;
                self.session = Some(RunningSession {
                    handle,
                    display,
                    game,
                });
                self.push_status("session started; space pauses clicking");
            }
            Err(err) => self.push_status(format!("cannot start: {err}")),
        }
    }

    /// Closes the countdown pane. The session keeps running.
    pub fn dismiss_countdown(&mut self) {
        if let Some(running) = self.session.as_ref() {
            running.display.dismiss();
            self.push_status("countdown closed");
        }
    }

    /// Closes the game window, which aborts the session.
    pub fn close_game(&mut self) {
        if let Some(running) = self.session.as_ref() {
            running.game.close();
        }
    }

    pub fn cancel(&mut self) {
        if let Some(running) = self.session.as_ref() {
            running.handle.cancel();
        }
    }

    pub fn shutdown(&mut self) {
        self.cancel();
        if self.session.is_some() {
            self.collect_session();
        }
    }

    fn collect_session(&mut self) {
        let Some(running) = self.session.take() else {
            return;
        };
        match running.handle.join() {
            Ok(outcome) => {
                match (outcome.report.notice(), outcome.report.record.as_ref()) {
                    (Some(notice), _) => {
                        self.push_status(format!("{}: {}", notice.title, notice.body))
                    }
                    (None, Some(record)) => self.push_status(format!(
                        "{} recorded {:.1} cps",
                        record.mode, record.cps
                    )),
                    (None, None) => self.push_status("session finished"),
                }
                self.last_report = Some(outcome.report);
            }
            Err(err) => self.push_status(format!("session failed: {err}")),
        }
        if self.board.is_some() {
            self.refresh_board();
        }
    }

    pub fn toggle_board(&mut self) {
        if self.board.take().is_some() {
            return;
        }
        self.board = Some(BoardView {
            column: LeaderboardColumn::Cps,
            descending: true,
            rows: Vec::new(),
        });
        self.refresh_board();
    }

    /// A new column sorts ascending first; the same column again flips direction.
    pub fn sort_board(&mut self, column: LeaderboardColumn) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        if board.column == column {
            board.descending = !board.descending;
        } else {
            board.column = column;
            board.descending = false;
        }
        self.refresh_board();
    }

    fn refresh_board(&mut self) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let mut ledger = ScoreLedger::open(self.scores_path.clone());
        match ledger.sorted_by(board.column, board.descending) {
            Ok(rows) => board.rows = rows,
            Err(err) => {
                board.rows.clear();
                self.status_line = format!("leaderboard unavailable: {err}");
            }
        }
    }

    pub fn close_popups(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.board = None;
        }
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }
}
