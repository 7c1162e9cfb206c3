#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Stopped,
}

/// Whole-second session clock. Advanced by scheduled ticks, not by reading
/// wall time, so it only moves while a tick callback is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    elapsed_secs: u64,
    state: TimerState,
}

impl Timer {
    pub fn new() -> Self {
        Timer {
            elapsed_secs: 0,
            state: TimerState::Idle,
        }
    }

    /// Reset to zero and begin counting.
    pub fn start(&mut self) {
        self.elapsed_secs = 0;
        self.state = TimerState::Running;
    }

    /// Freeze the elapsed value. No-op unless running.
    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
        }
    }

    /// Count one second. Returns false (and changes nothing) when not running.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn has_started(&self) -> bool {
        self.state != TimerState::Idle
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_timer_ignores_ticks() {
        let mut timer = Timer::new();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 0);
        assert!(!timer.has_started());
    }

    #[test]
    fn test_running_timer_counts() {
        let mut timer = Timer::new();
        timer.start();
        assert!(timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.elapsed_secs(), 2);
        assert!(timer.is_running());
    }

    #[test]
    fn test_stop_freezes_elapsed() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.stop();

        assert!(!timer.tick());
        assert_eq!(timer.elapsed_secs(), 1);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn test_start_resets() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.tick();
        timer.start();
        assert_eq!(timer.elapsed_secs(), 0);
        assert!(timer.is_running());
    }

    #[test]
    fn test_stop_on_idle_stays_idle() {
        let mut timer = Timer::new();
        timer.stop();
        assert_eq!(timer.state(), TimerState::Idle);
    }
}
