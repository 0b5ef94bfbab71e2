//! Onboarding tutorial: a fixed sequence of cards dismissed by taps.
//!
//! While a card is showing, every tap goes to the tutorial.

use arniegeddon_core::enums::TutorialState;

/// Result of routing a tap to the tutorial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialTap {
    /// Moved on to card `n`.
    Advanced(u8),
    /// Last card dismissed.
    Completed,
    /// No card showing; the tap belongs to the game.
    NotActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tutorial {
    steps: u8,
    state: TutorialState,
}

impl Tutorial {
    /// `steps == 0` disables the tutorial.
    pub fn new(steps: u8) -> Self {
        Self {
            steps,
            state: TutorialState::Inactive,
        }
    }

    pub fn state(&self) -> TutorialState {
        self.state
    }

    pub fn steps(&self) -> u8 {
        self.steps
    }

    pub fn is_enabled(&self) -> bool {
        self.steps > 0
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Show the first card. Returns it, or `None` when the tutorial is disabled.
    pub fn begin(&mut self) -> Option<u8> {
        if !self.is_enabled() {
            return None;
        }
        self.state = TutorialState::Step(1);
        Some(1)
    }

    pub fn tap(&mut self) -> TutorialTap {
        match self.state {
            TutorialState::Step(n) if n < self.steps => {
                self.state = TutorialState::Step(n + 1);
                TutorialTap::Advanced(n + 1)
            }
            TutorialState::Step(_) => {
                self.state = TutorialState::Done;
                TutorialTap::Completed
            }
            TutorialState::Inactive | TutorialState::Done => TutorialTap::NotActive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_steps_disables_tutorial() {
        let mut tutorial = Tutorial::new(0);
        assert_eq!(tutorial.steps(), 0);
        assert!(!tutorial.is_enabled());
        assert_eq!(tutorial.begin(), None);
        assert!(!tutorial.is_active());
        assert_eq!(tutorial.tap(), TutorialTap::NotActive);
    }

    #[test]
    fn test_five_taps_complete_five_steps() {
        let mut tutorial = Tutorial::new(5);
        assert_eq!(tutorial.begin(), Some(1));
        for n in 2..=5 {
            assert_eq!(tutorial.tap(), TutorialTap::Advanced(n));
        }
        assert_eq!(tutorial.tap(), TutorialTap::Completed);
        assert_eq!(tutorial.state(), TutorialState::Done);
        assert_eq!(tutorial.tap(), TutorialTap::NotActive);
    }

    #[test]
    fn test_taps_before_begin_not_intercepted() {
        let mut tutorial = Tutorial::new(5);
        assert_eq!(tutorial.tap(), TutorialTap::NotActive);
        assert_eq!(tutorial.state(), TutorialState::Inactive);
    }

    #[test]
    fn test_disabled_tutorial() {
        let mut tutorial = Tutorial::new(0);
        assert_eq!(tutorial.begin(), None);
        assert!(!tutorial.is_active());
        assert_eq!(tutorial.tap(), TutorialTap::NotActive);
    }

    #[test]
    fn test_single_step_tutorial() {
        let mut tutorial = Tutorial::new(1);
        tutorial.begin();
        assert_eq!(tutorial.tap(), TutorialTap::Completed);
    }
}
