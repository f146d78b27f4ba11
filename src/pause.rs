/// Freeze switch for the display.
///
/// Pausing only stops rendering and integration; samples keep being
/// buffered so nothing is lost while the view is frozen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PauseController {
    paused: bool,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip the state and return the new one.
    pub fn toggle(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Caption for the toggle button in the current state.
    pub fn button_label(&self) -> &'static str {
        if self.paused {
            "Unpause"
        } else {
            "Pause"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_label() {
        let mut p = PauseController::new();
        assert_eq!(p.button_label(), "Pause");
        assert!(p.toggle());
        assert_eq!(p.button_label(), "Unpause");
        assert!(!p.toggle());
        assert_eq!(p.button_label(), "Pause");
    }
}
