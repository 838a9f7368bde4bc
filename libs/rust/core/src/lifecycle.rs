//! Gateway boot finite state machine (FSM).
//!
//! Phases:
//! - ConfigLoad
//! - ModelLoad
//! - Serving
//!
//! Tracks durations for each transition; readiness must only flip once the
//! FSM reaches Serving, so registry population happens-before dispatch.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BootPhase {
    ConfigLoad,
    ModelLoad,
    Serving,
}

#[derive(Debug)]
pub struct BootState {
    phase: BootPhase,
    phase_started_at: Instant,
    phase_durations: Vec<(BootPhase, Duration)>,
}

impl BootState {
    pub fn new() -> Self {
        Self {
            phase: BootPhase::ConfigLoad,
            phase_started_at: Instant::now(),
            phase_durations: Vec::new(),
        }
    }

    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    pub fn advance(&mut self) {
        let now = Instant::now();
        self.phase_durations.push((self.phase, now - self.phase_started_at));
        self.phase = match self.phase {
            BootPhase::ConfigLoad => BootPhase::ModelLoad,
            BootPhase::ModelLoad => BootPhase::Serving,
            BootPhase::Serving => BootPhase::Serving,
        };
        self.phase_started_at = now;
    }

    pub fn is_serving(&self) -> bool {
        self.phase == BootPhase::Serving
    }

    pub fn durations(&self) -> &[(BootPhase, Duration)] {
        &self.phase_durations
    }
}

impl Default for BootState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fsm_progresses() {
        let mut st = BootState::new();
        assert_eq!(st.phase(), BootPhase::ConfigLoad);
        st.advance();
        assert_eq!(st.phase(), BootPhase::ModelLoad);
        assert!(!st.is_serving());
        st.advance();
        assert!(st.is_serving());
        assert_eq!(st.durations().len(), 2);
    }

    #[test]
    fn serving_is_terminal() {
        let mut st = BootState::new();
        st.advance();
        st.advance();
        st.advance();
        assert!(st.is_serving());
    }
}
