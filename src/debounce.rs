/*
 * Push buttons bounce: a single press shows up as a burst of asserted polls.
 * Each input keeps its own lockout timer. An asserted poll only counts when
 * more than the debounce window has passed since the last press this input
 * accepted; everything in between is ignored.
 *
 * In order to keep this module testable the clock stays outside of it. The
 * caller passes in `now`, so tests drive it with made-up instants instead of
 * waiting.
 */

use embassy_time::{Duration, Instant};

pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Debouncer {
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Whether an action should fire for this poll.
    pub fn is_ready(&self, asserted: bool, now: Instant) -> bool {
        if !asserted {
            return false;
        }

        match self.last_accepted {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.window,
        }
    }

    /// Start the lockout. Only call this once the action actually happened;
    /// an action that was skipped should be retried on the next poll.
    pub fn accept(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    fn at(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_released_input_is_never_ready() {
        let debouncer = Debouncer::new(WINDOW);
        assert!(!debouncer.is_ready(false, at(1_000)));
    }

    #[test]
    fn test_first_press_is_accepted() {
        let debouncer = Debouncer::new(WINDOW);
        assert!(debouncer.is_ready(true, at(0)));
    }

    #[test]
    fn test_bounce_inside_window_is_ignored() {
        let mut debouncer = Debouncer::new(WINDOW);
        let mut accepted = 0;

        for millis in [1_000, 1_010, 1_050, 1_190, 1_200] {
            if debouncer.is_ready(true, at(millis)) {
                debouncer.accept(at(millis));
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1);
    }

    #[test]
    fn test_press_after_window_is_accepted() {
        let mut debouncer = Debouncer::new(WINDOW);
        debouncer.accept(at(1_000));

        // The window is exclusive: exactly 200 ms later is still locked out.
        assert!(!debouncer.is_ready(true, at(1_200)));
        assert!(debouncer.is_ready(true, at(1_201)));
    }

    #[test]
    fn test_skipped_action_does_not_start_lockout() {
        let debouncer = Debouncer::new(WINDOW);

        assert!(debouncer.is_ready(true, at(1_000)));
        // Not accepted, so the very next poll may try again.
        assert!(debouncer.is_ready(true, at(1_010)));
    }

    #[test]
    fn test_inputs_debounce_independently() {
        let mut entry = Debouncer::new(WINDOW);
        let exit = Debouncer::new(WINDOW);

        entry.accept(at(1_000));

        assert!(!entry.is_ready(true, at(1_050)));
        assert!(exit.is_ready(true, at(1_050)));
    }
}
