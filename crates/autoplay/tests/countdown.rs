use cookiebot_autoplay::{
    Clock, CountdownCoordinator, CountdownDisplay, CountdownStatus, ManualClock, SharedDisplay,
    StopSignal,
};
use std::time::Duration;

fn always_ready() -> bool {
    true
}

/// Raises the stop signal once it has shown `after` frames.
struct StoppingDisplay {
    inner: SharedDisplay,
    stop: StopSignal,
    after: usize,
    shown: usize,
}

impl CountdownDisplay for StoppingDisplay {
    fn show(&mut self, text: &str) {
        self.inner.show(text);
        self.shown += 1;
        if self.shown == self.after {
            self.stop.raise();
        }
    }

    fn close(&mut self) {
        self.inner.close();
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }
}

#[test]
fn counts_down_every_second_to_zero() {
    let display = SharedDisplay::new();
    let clock = ManualClock::new();
    let status =
        CountdownCoordinator::new(65, display.clone(), always_ready, clock.clone()).run();

    assert_eq!(status, CountdownStatus::Finished);
    let frames = display.frames();
    assert_eq!(frames.len(), 66);
    assert_eq!(frames.first().map(String::as_str), Some("1:05"));
    assert_eq!(frames[5], "1:00");
    assert_eq!(frames[6], "0:59");
    assert_eq!(frames.iter().filter(|frame| *frame == "1:05").count(), 1);
    assert_eq!(frames.iter().filter(|frame| *frame == "0:00").count(), 1);
    assert_eq!(frames.last().map(String::as_str), Some("0:00"));
    assert!(!display.is_open());
    assert!(!display.was_dismissed());
    assert_eq!(clock.now(), Duration::from_secs(65));
}

#[test]
fn waits_for_the_surface_before_counting() {
    let display = SharedDisplay::new();
    let clock = ManualClock::new();
    let gate = clock.clone();
    let ready = move || gate.now() >= Duration::from_secs(1);
    let status = CountdownCoordinator::new(2, display.clone(), ready, clock.clone()).run();

    assert_eq!(status, CountdownStatus::Finished);
    assert_eq!(display.frames(), vec!["0:02", "0:01", "0:00"]);
    assert_eq!(clock.now(), Duration::from_secs(3));
}

#[test]
fn raised_stop_closes_the_display() {
    let display = SharedDisplay::new();
    let stop = StopSignal::new();
    stop.raise();
    let status = CountdownCoordinator::new(30, display.clone(), always_ready, ManualClock::new())
        .with_stop(stop)
        .run();

    assert_eq!(status, CountdownStatus::Cancelled);
    assert!(display.frames().is_empty());
    assert!(!display.is_open());
}

#[test]
fn stop_mid_count_is_noticed_within_a_poll() {
    let inner = SharedDisplay::new();
    let stop = StopSignal::new();
    let display = StoppingDisplay {
        inner: inner.clone(),
        stop: stop.clone(),
        after: 3,
        shown: 0,
    };
    let clock = ManualClock::new();
    let status = CountdownCoordinator::new(10, display, always_ready, clock.clone())
        .with_stop(stop)
        .run();

    assert_eq!(status, CountdownStatus::Cancelled);
    assert_eq!(inner.frames(), vec!["0:10", "0:09", "0:08"]);
    assert_eq!(clock.now(), Duration::from_millis(2_100));
}

#[test]
fn user_dismissal_ends_the_countdown() {
    let display = SharedDisplay::new();
    display.dismiss();
    let status =
        CountdownCoordinator::new(30, display.clone(), always_ready, ManualClock::new()).run();

    assert_eq!(status, CountdownStatus::Dismissed);
    assert!(display.frames().is_empty());
    assert!(display.was_dismissed());
}

#[test]
fn ended_session_releases_a_waiting_countdown() {
    let display = SharedDisplay::new();
    let session_over = StopSignal::new();
    session_over.raise();
    let status = CountdownCoordinator::new(30, display.clone(), || false, ManualClock::new())
        .with_session_over(session_over)
        .run();

    assert_eq!(status, CountdownStatus::Cancelled);
    assert!(display.frames().is_empty());
}
