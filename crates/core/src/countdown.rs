/// Renders remaining seconds as `m:ss`.
pub fn format_clock(remaining_secs: u32) -> String {
    format!("{}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

/// Remaining-time frames of a countdown, from the full duration down to zero.
///
/// Finite and not restartable: the sequence is consumed by iteration and
/// yields `0` exactly once.
#[derive(Debug, Clone)]
pub struct CountdownFrames {
    next: Option<u32>,
}

impl CountdownFrames {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            next: Some(duration_secs),
        }
    }
}

impl Iterator for CountdownFrames {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.next?;
        self.next = current.checked_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.map(|value| value as usize + 1).unwrap_or(0);
        (len, Some(len))
    }
}

impl ExactSizeIterator for CountdownFrames {}

impl std::iter::FusedIterator for CountdownFrames {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn frames_reach_zero_once() {
        let frames: Vec<u32> = CountdownFrames::new(3).collect();
        assert_eq!(frames, vec![3, 2, 1, 0]);
    }

    #[test]
    fn frames_are_fused() {
        let mut frames = CountdownFrames::new(0);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames.next(), Some(0));
        assert_eq!(frames.next(), None);
        assert_eq!(frames.next(), None);
    }
}
