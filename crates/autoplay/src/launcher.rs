use crate::{
    AutoplayError, Clock, CountdownCoordinator, CountdownDisplay, CountdownStatus, GameSurface,
    Readiness, SessionController, SessionReport, SessionStatus, SessionTuning, StopSignal,
};
use cookiebot_core::{ConfigError, ModeSwitch, SessionConfig, SessionMode};
use cookiebot_data::ScoreLedger;
use std::thread::JoinHandle;
use tracing::{info, warn};

/// Raw option toggles and text entries of the control panel.
#[derive(Debug, Clone, Default)]
pub struct LaunchRequest {
    pub clicker: bool,
    pub buy_out: bool,
    pub time: String,
    pub ratio: String,
}

impl LaunchRequest {
    pub fn config(&self) -> Result<SessionConfig, ConfigError> {
        SessionConfig::parse(self.clicker, self.buy_out, &self.time, &self.ratio)
    }
}

/// Collaborators a launched session runs against.
pub struct SessionParts<S, D, R, C> {
    pub surface: S,
    pub display: D,
    pub readiness: R,
    pub clock: C,
    pub ledger: ScoreLedger,
    pub tuning: SessionTuning,
}

type SessionJoin = JoinHandle<(ScoreLedger, Result<SessionReport, AutoplayError>)>;

/// Running session plus its countdown.
pub struct SessionHandle {
    mode: ModeSwitch,
    session_stop: StopSignal,
    countdown_stop: StopSignal,
    session: SessionJoin,
    countdown: JoinHandle<CountdownStatus>,
}

pub struct LaunchReport {
    pub report: SessionReport,
    pub countdown: CountdownStatus,
    pub ledger: ScoreLedger,
}

/// Validates the request, then starts the session.
pub fn launch_request<S, D, R, C>(
    request: &LaunchRequest,
    parts: SessionParts<S, D, R, C>,
) -> Result<SessionHandle, AutoplayError>
where
    S: GameSurface + 'static,
    D: CountdownDisplay + 'static,
    R: Readiness + 'static,
    C: Clock + Clone + 'static,
{
    let config = request.config()?;
    launch(config, parts)
}

/// Starts the session loop and the countdown on their own threads.
pub fn launch<S, D, R, C>(
    config: SessionConfig,
    parts: SessionParts<S, D, R, C>,
) -> Result<SessionHandle, AutoplayError>
where
    S: GameSurface + 'static,
    D: CountdownDisplay + 'static,
    R: Readiness + 'static,
    C: Clock + Clone + 'static,
{
    let SessionParts {
        surface,
        display,
        readiness,
        clock,
        ledger,
        tuning,
    } = parts;
    let mode = ModeSwitch::new();
    let session_stop = StopSignal::new();
    let countdown_stop = StopSignal::new();
    let session_over = StopSignal::new();

    let countdown = CountdownCoordinator::new(config.duration_secs(), display, readiness, clock.clone())
        .with_stop(countdown_stop.clone())
        .with_session_over(session_over.clone())
        .with_tuning(tuning.clone())
        .spawn()?;

    let controller = SessionController::new(config, surface, clock)
        .with_mode(mode.clone())
        .with_stop(session_stop.clone())
        .with_tuning(tuning);
    let teardown = countdown_stop.clone();
    let spawned = std::thread::Builder::new()
        .name("session".to_string())
        .spawn(move || {
            let mut ledger = ledger;
            let result = controller.run(&mut ledger);
            let completed = matches!(
                &result,
                Ok(report) if report.status == SessionStatus::Completed
            );
            if !completed {
                teardown.raise();
            }
            session_over.raise();
            if let Ok(report) = &result {
                if let Some(notice) = report.notice() {
                    warn!(title = %notice.title, "{}", notice.body);
                }
            }
            (ledger, result)
        });
    let session = match spawned {
        Ok(session) => session,
        Err(err) => {
            countdown_stop.raise();
            return Err(AutoplayError::Worker(err.to_string()));
        }
    };
    info!(mode = %config.mode_label(), "session launched");

    Ok(SessionHandle {
        mode,
        session_stop,
        countdown_stop,
        session,
        countdown,
    })
}

impl SessionHandle {
    /// Forwards the user's toggle key to the running session.
    pub fn toggle_mode(&self) -> SessionMode {
        self.mode.toggle()
    }

    pub fn mode(&self) -> SessionMode {
        self.mode.current()
    }

    /// Shared switch, for input threads that outlive a borrow of the handle.
    pub fn mode_switch(&self) -> ModeSwitch {
        self.mode.clone()
    }

    /// Stops the session between ticks and tears down the countdown.
    pub fn cancel(&self) {
        self.session_stop.raise();
        self.countdown_stop.raise();
    }

    pub fn session_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished() && self.countdown.is_finished()
    }

    pub fn join(self) -> Result<LaunchReport, AutoplayError> {
        let joined = self.session.join();
        let (ledger, result) = match joined {
            Ok(pair) => pair,
            Err(_) => {
                self.countdown_stop.raise();
                return Err(AutoplayError::Worker("session thread panicked".to_string()));
            }
        };
        let countdown = self
            .countdown
            .join()
            .map_err(|_| AutoplayError::Worker("countdown thread panicked".to_string()))?;
        let report = result?;
        Ok(LaunchReport {
            report,
            countdown,
            ledger,
        })
    }
}
