//! One-second level clock
//!
//! The host fires the countdown from its own 1 Hz interval, independent of the
//! frame loop. Each `start` hands out a new generation token so a fire from a
//! previous level's interval is recognised as stale and ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Countdown {
    generation: u64,
    running: bool,
    /// Fractional seconds carried between `accumulate` calls
    carry: f32,
}

impl Countdown {
    /// Cancel whatever was running and start a fresh countdown
    pub fn start(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        self.carry = 0.0;
        self.generation
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.carry = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Token of the most recently started countdown
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a fire carrying `token` should be honoured
    pub fn accepts(&self, token: u64) -> bool {
        self.running && token == self.generation
    }

    /// Feed elapsed wall time, returning how many whole seconds elapsed
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        if !self.running || dt <= 0.0 {
            return 0;
        }
        self.carry += dt;
        let whole = self.carry.floor();
        self.carry -= whole;
        whole as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_token_rejected() {
        let mut countdown = Countdown::default();
        let first = countdown.start();
        assert!(countdown.accepts(first));

        let second = countdown.start();
        assert!(!countdown.accepts(first));
        assert!(countdown.accepts(second));
    }

    #[test]
    fn test_stopped_rejects_everything() {
        let mut countdown = Countdown::default();
        let token = countdown.start();
        countdown.stop();
        assert!(!countdown.accepts(token));
        assert_eq!(countdown.accumulate(5.0), 0);
    }

    #[test]
    fn test_accumulate_whole_seconds() {
        let mut countdown = Countdown::default();
        countdown.start();
        assert_eq!(countdown.accumulate(0.5), 0);
        assert_eq!(countdown.accumulate(0.75), 1);
        assert_eq!(countdown.accumulate(2.25), 2);
    }

    #[test]
    fn test_restart_clears_carry() {
        let mut countdown = Countdown::default();
        countdown.start();
        assert_eq!(countdown.accumulate(0.9), 0);
        countdown.start();
        assert_eq!(countdown.accumulate(0.5), 0);
    }
}
