//! Progress bars for the long batch phases (indexing, matching, rendering)

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix:>10} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Hands out one progress bar per batch phase, or nothing when disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressReporter {
    enabled: bool,
}

impl ProgressReporter {
    /// Create a reporter that draws bars only when `enabled`
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Reporter that never draws
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether bars are drawn
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a phase of `length` steps
    pub fn phase(&self, length: u64, label: &str) -> PhaseProgress {
        let bar = self.enabled.then(|| {
            let bar = ProgressBar::new(length);
            bar.set_style(PHASE_STYLE.clone());
            bar.set_prefix(label.to_string());
            bar
        });
        PhaseProgress { bar }
    }
}

/// Progress of a single phase
#[derive(Debug)]
pub struct PhaseProgress {
    bar: Option<ProgressBar>,
}

impl PhaseProgress {
    /// Record one completed step
    pub fn advance(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Steps completed so far (zero when not drawing)
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
