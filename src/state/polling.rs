/// Polling lifecycle
///
/// ACTIVE: the refresh timer runs. PAUSED: the window is hidden, no timer.
/// DISPOSED: torn down, nothing runs again.
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Active,
    Paused,
    Disposed,
}

#[derive(Debug, Clone)]
pub struct Polling {
    state: PollState,
    interval: Duration,
}

impl Polling {
    /// Start in ACTIVE; the caller performs the initial load
    pub fn new(interval: Duration) -> Self {
        Self {
            state: PollState::Active,
            interval,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True while the timer subscription should exist
    pub fn is_ticking(&self) -> bool {
        self.state == PollState::Active
    }

    pub fn is_disposed(&self) -> bool {
        self.state == PollState::Disposed
    }

    /// Window hidden: stop the timer
    pub fn on_hidden(&mut self) {
        if self.state == PollState::Active {
            info!("⏸️  Window hidden, pausing refresh");
            self.state = PollState::Paused;
        }
    }

    /// Window visible again. Returns true exactly when a load should be
    /// issued right away (only on the PAUSED -> ACTIVE edge).
    pub fn on_visible(&mut self) -> bool {
        if self.state == PollState::Paused {
            info!("▶️  Window visible, resuming refresh");
            self.state = PollState::Active;
            return true;
        }
        false
    }

    /// Terminal teardown
    pub fn dispose(&mut self) {
        self.state = PollState::Disposed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_active() {
        let polling = Polling::new(Duration::from_secs(5));
        assert_eq!(polling.state(), PollState::Active);
        assert!(polling.is_ticking());
        assert_eq!(polling.interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_hidden_then_visible_resumes_once() {
        let mut polling = Polling::new(Duration::from_secs(5));

        polling.on_hidden();
        assert_eq!(polling.state(), PollState::Paused);
        assert!(!polling.is_ticking());

        assert!(polling.on_visible());
        assert!(polling.is_ticking());

        // Already active: no extra load
        assert!(!polling.on_visible());
    }

    #[test]
    fn test_disposed_is_terminal() {
        let mut polling = Polling::new(Duration::from_secs(5));
        polling.dispose();

        polling.on_hidden();
        assert!(!polling.on_visible());
        assert!(polling.is_disposed());
        assert!(!polling.is_ticking());
    }
}
