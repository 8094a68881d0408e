//! Progress display for downloads and clones.
//!
//! Bars draw on stderr and are hidden when stderr is not a terminal, when
//! `AGENTDOCS_NO_PROGRESS` is set, or after [`set_enabled`]`(false)`.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::constants::NO_PROGRESS_ENV;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Globally enable or disable progress output.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn is_progress_disabled() -> bool {
    !ENABLED.load(Ordering::Relaxed)
        || std::env::var_os(NO_PROGRESS_ENV).is_some()
        || !std::io::stderr().is_terminal()
}

/// Thin wrapper that is a no-op when progress is disabled.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Byte counter for a download; a spinner when the size is unknown.
    pub fn new_download(total_bytes: Option<u64>) -> Self {
        if is_progress_disabled() {
            return Self { inner: IndicatifBar::hidden() };
        }

        match total_bytes {
            Some(total) => {
                let bar = IndicatifBar::new(total);
                bar.set_style(download_style());
                Self { inner: bar }
            }
            None => Self::new_spinner(),
        }
    }

    /// Indeterminate spinner.
    pub fn new_spinner() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { inner: bar }
    }

    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn download_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸━")
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{prefix:.bold} {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
