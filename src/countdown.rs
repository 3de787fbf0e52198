use std::time::Duration;

/// Marker returned by [`Countdown::tick`] on the tick that drives the
/// remaining time to zero. It is produced at most once per countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired;

/// A single countdown towards zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
    running: bool,
}

impl Countdown {
    /// Starts a fresh countdown that is already running.
    ///
    /// `total` must be non-zero; presets are validated before they get here.
    pub fn start(total: Duration) -> Self {
        debug_assert!(!total.is_zero(), "countdown length must be positive");
        Self {
            total,
            remaining: total,
            running: true,
        }
    }

    pub fn tick(&mut self, elapsed: Duration) -> Option<Expired> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.running = false;
            return Some(Expired);
        }

        None
    }

    /// Flips between running and stopped. A finished countdown stays stopped.
    pub fn toggle(&mut self) {
        if self.remaining.is_zero() {
            return;
        }
        self.running = !self.running;
    }

    /// A new countdown over the same length, running from the top.
    pub fn restarted(&self) -> Self {
        Self::start(self.total)
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Fraction of the countdown already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total.is_zero() {
            return 1.0;
        }
        1.0 - (self.remaining.as_secs_f64() / self.total.as_secs_f64())
    }
}

/// Formats a remaining duration as `MM:SS`, or `H:MM:SS` from one hour up.
///
/// Partial seconds round up, so the display only reads `00:00` once the
/// countdown has really run out.
pub fn format_remaining(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
