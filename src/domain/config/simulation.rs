use std::time::Duration;

/// Timings of the cosmetic upload progress bar. The bar is not driven by
/// bytes on the wire: the upload is a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSimulation {
    pub step: u8,
    pub interval: Duration,
    pub cap: u8,
    /// How long the bar stays at 100% before the view goes idle again.
    pub settle_delay: Duration,
}

impl Default for ProgressSimulation {
    fn default() -> Self {
        Self {
            step: 10,
            interval: Duration::from_millis(200),
            cap: 90,
            settle_delay: Duration::from_millis(1000),
        }
    }
}

impl ProgressSimulation {
    pub fn advance(&self, current: u8) -> u8 {
        current.saturating_add(self.step).min(self.cap).max(current)
    }
}
