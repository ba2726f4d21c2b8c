//! Level message banner
//!
//! Holds the current on-screen message and its fade-in alpha. The fade runs
//! on unscaled time so it still plays while the simulation is paused.

use serde::{Deserialize, Serialize};

use crate::hooks::Messages;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiTuning {
    /// Seconds for a message to fade from transparent to opaque
    pub fade_in_time: f64,
}

impl Default for UiTuning {
    fn default() -> Self {
        Self { fade_in_time: 0.25 }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageBanner {
    pub tuning: UiTuning,
    text: Option<String>,
    alpha: f64,
    fade_elapsed: f64,
    fading: bool,
}

impl MessageBanner {
    pub fn new(tuning: UiTuning) -> Self {
        Self {
            tuning,
            ..Default::default()
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    /// Advance the fade by `unscaled_dt`
    pub fn update(&mut self, unscaled_dt: f64) {
        if !self.fading {
            return;
        }
        self.fade_elapsed += unscaled_dt.max(0.0);
        if self.fade_elapsed >= self.tuning.fade_in_time {
            self.alpha = 1.0;
            self.fading = false;
        } else {
            self.alpha = self.fade_elapsed / self.tuning.fade_in_time;
        }
    }

    /// Hide the banner
    pub fn clear(&mut self) {
        self.text = None;
        self.alpha = 0.0;
        self.fading = false;
    }
}

impl Messages for MessageBanner {
    /// Replace the text and restart the fade from transparent
    fn show_message(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.alpha = 0.0;
        self.fade_elapsed = 0.0;
        self.fading = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_starts_hidden() {
        let banner = MessageBanner::new(UiTuning::default());
        assert_eq!(banner.text(), None);
        assert_eq!(banner.alpha(), 0.0);
    }

    #[test]
    fn test_fade_is_linear_and_ends_opaque() {
        let mut banner = MessageBanner::new(UiTuning { fade_in_time: 0.5 });
        banner.show_message("Level complete!");
        assert_eq!(banner.alpha(), 0.0);

        banner.update(0.125);
        assert!((banner.alpha() - 0.25).abs() < 1e-12);
        banner.update(0.5);
        assert_eq!(banner.alpha(), 1.0);
        assert!(!banner.is_fading());
        assert_eq!(banner.text(), Some("Level complete!"));
    }

    #[test]
    fn test_new_message_restarts_fade() {
        let mut banner = MessageBanner::new(UiTuning::default());
        banner.show_message("first");
        banner.update(0.2);
        assert!(banner.alpha() > 0.5);

        banner.show_message("second");
        assert_eq!(banner.alpha(), 0.0);
        assert_eq!(banner.text(), Some("second"));
        banner.update(0.125);
        assert!((banner.alpha() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_fade_time_is_instant() {
        let mut banner = MessageBanner::new(UiTuning { fade_in_time: 0.0 });
        banner.show_message("hi");
        banner.update(0.0);
        assert_eq!(banner.alpha(), 1.0);
    }
}
