//! Progress indicators for the OathNet CLI.
//!
//! Responsibilities:
//! - A job spinner that shows the latest polled status and percent.
//! - A plain spinner for downloads and other single requests.
//! - Draw everything on STDERR so stdout stays clean for results.
//!
//! Non-responsibilities:
//! - Deciding when progress is shown; callers pass `enabled` (`!quiet` and table output).
//! - Printing command results.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

fn spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .expect("template is a compile-time constant with valid syntax"),
    );
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Spinner for a polled job. No-op when disabled.
pub(crate) struct JobProgress {
    label: String,
    pb: Option<ProgressBar>,
}

impl JobProgress {
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();
        let pb = enabled.then(|| spinner(&label));
        Self { label, pb }
    }

    /// Show the status from the latest poll, with a percentage when known.
    pub(crate) fn update(&self, status: Option<&str>, percent: Option<f64>) {
        let Some(pb) = &self.pb else {
            return;
        };

        let status = status.unwrap_or("pending");
        let message = match percent {
            Some(p) => format!("{} ({status}, {:.0}%)", self.label, p.clamp(0.0, 100.0)),
            None => format!("{} ({status})", self.label),
        };
        pb.set_message(message);
    }

    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl Drop for JobProgress {
    fn drop(&mut self) {
        // Clear the line on error paths so the message is not interleaved.
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// Indefinite spinner for a single request. No-op when disabled.
pub(crate) struct Spinner {
    pb: Option<ProgressBar>,
}

impl Spinner {
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            pb: enabled.then(|| spinner(&label)),
        }
    }

    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
