use std::time::{Duration, Instant};

/// Decides, once per display refresh, whether enough time has passed for the
/// snake to take another step
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct TickDriver {
    /// When the driver last fired.  `None` until the first poll after
    /// creation or a reset, which only starts the clock.
    last_fired: Option<Instant>,
}

impl TickDriver {
    pub(super) fn new() -> TickDriver {
        TickDriver { last_fired: None }
    }

    /// Forget when the driver last fired, so that the next step happens a
    /// full interval after the next poll
    pub(super) fn reset(&mut self) {
        self.last_fired = None;
    }

    /// Returns `true` (and restarts the clock) if more than `interval` has
    /// elapsed since the driver last fired
    pub(super) fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        match self.last_fired {
            Some(last) if now.saturating_duration_since(last) > interval => {
                self.last_fired = Some(now);
                true
            }
            Some(_) => false,
            None => {
                self.last_fired = Some(now);
                false
            }
        }
    }
}
