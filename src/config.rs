/*
 * Compile-time configuration. Capacity is fixed for the lifetime of the
 * firmware; all periods and bounded waits are in one place so they can be
 * tuned together.
 */

use embassy_time::Duration;

/// Maximum number of people allowed inside at once.
pub const CAPACITY: u32 = 10;

pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub const RENDER_PERIOD: Duration = Duration::from_millis(100);
pub const RENDER_GUARD_TIMEOUT: Duration = Duration::from_millis(100);

pub const INDICATOR_PERIOD: Duration = Duration::from_millis(200);
// Shorter than the render wait: a missed read shows "empty" rather than
// holding up the next indicator cycle.
pub const INDICATOR_GUARD_TIMEOUT: Duration = Duration::from_millis(50);

/// Bounded waits used by the input-side store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// How long an admission waits for a free token before reporting full.
    pub token: Duration,
    /// How long any input operation waits for the guard.
    pub guard: Duration,
}

impl Timeouts {
    pub const DEFAULT: Timeouts = Timeouts {
        token: Duration::from_millis(100),
        guard: Duration::from_millis(100),
    };
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::DEFAULT
    }
}
