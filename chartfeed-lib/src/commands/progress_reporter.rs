use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Refresh rate for the spinner (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const SPINNER_TEMPLATE: &str = "{prefix:>12.bold.cyan} {spinner} {msg}";
const SPINNER_TEMPLATE_NO_COLOR: &str = "{prefix:>12} {spinner} {msg}";

/// A spinner that delays showing itself until a threshold is reached, so fast loads
/// never flash a progress line.
pub struct ProgressReporter {
    bar: ProgressBar,
    visible: Arc<AtomicBool>,
    refresh_task: JoinHandle<()>,
}

impl ProgressReporter {
    /// Start a spinner labeled `phase` that becomes visible on stderr after `delay`.
    #[must_use]
    pub fn start(phase: &str, message: &str, delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_draw_target(ProgressDrawTarget::hidden());

        let template = if use_colors { SPINNER_TEMPLATE } else { SPINNER_TEMPLATE_NO_COLOR };
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            bar.set_style(style);
        }
        bar.set_prefix(phase.to_string());
        bar.set_message(message.to_string());

        let visible = Arc::new(AtomicBool::new(false));
        let refresh_task = tokio::spawn(refresh_task(bar.clone(), Arc::clone(&visible), Instant::now() + delay));

        Self {
            bar,
            visible,
            refresh_task,
        }
    }

    /// Stop and clear the spinner.
    pub fn done(&self) {
        self.refresh_task.abort();
        if self.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.done();
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("visible", &self.visible)
            .field("refresh_task", &"<task>")
            .finish()
    }
}

/// Background task that reveals the spinner once `visible_after` has passed and keeps it ticking.
async fn refresh_task(bar: ProgressBar, visible: Arc<AtomicBool>, visible_after: Instant) {
    let mut interval = tokio::time::interval(Duration::from_millis(REFRESH_INTERVAL_MS));
    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !visible.load(Ordering::Relaxed) && Instant::now() >= visible_after {
            visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        if visible.load(Ordering::Relaxed) {
            bar.tick();
        }
    }
}
