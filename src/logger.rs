//! Terminal output for brewpress.
//!
//! - `log!("module"; ...)` prints a colored `[module]` prefix and a message
//! - `debug!` does the same, only with `--verbose`
//! - [`ProgressLine`] redraws one status line during bulk passes
//!
//! All of it goes to stderr. Stdout carries command results (shortened text,
//! JSON) and stays clean for piping.
//!
//! ```ignore
//! log!("audit"; "{} records over budget", count);
//!
//! let progress = ProgressLine::new("optimize", &[("article", 12), ("recipe", 4)]);
//! progress.inc("article");
//! progress.finish();
//! ```

use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};
use owo_colors::{AnsiColors, OwoColorize};
use parking_lot::Mutex;
use std::io::{Write, stderr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set while a [`ProgressLine`] owns the last terminal line.
static PROGRESS_SHOWN: AtomicBool = AtomicBool::new(false);

/// Enable or disable `debug!` output.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a message with a colored module prefix.
///
/// ```ignore
/// log!("write"; "{} `{}` saved", content_type, id);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, but only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Print one log line.
///
/// An active progress line is wiped first; its next update redraws it.
pub fn log(module: &str, message: &str) {
    let mut err = stderr().lock();
    if PROGRESS_SHOWN.load(Ordering::Acquire) {
        queue!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }
    writeln!(err, "{} {message}", prefix(module)).ok();
    err.flush().ok();
}

/// Prefix color per module.
fn prefix_color(module: &str) -> AnsiColors {
    match module.to_ascii_lowercase().as_str() {
        "error" => AnsiColors::BrightRed,
        "warning" => AnsiColors::BrightMagenta,
        "intercept" => AnsiColors::BrightBlue,
        "optimize" | "write" => AnsiColors::BrightGreen,
        _ => AnsiColors::BrightYellow,
    }
}

fn prefix(module: &str) -> String {
    format!("[{module}]")
        .color(prefix_color(module))
        .bold()
        .to_string()
}

/// One in-place status line with a counter per content type.
///
/// Renders as `[optimize] article 4/12  recipe 1/4`.
pub struct ProgressLine {
    label: &'static str,
    counters: Vec<Counter>,
    /// Held while drawing; a busy line skips a redraw rather than wait.
    draw: Mutex<()>,
}

struct Counter {
    name: &'static str,
    done: AtomicUsize,
    total: usize,
}

impl ProgressLine {
    /// Start a progress line. Counters with a zero total are left out.
    pub fn new(label: &'static str, totals: &[(&'static str, usize)]) -> Self {
        let counters = totals
            .iter()
            .filter(|&&(_, total)| total > 0)
            .map(|&(name, total)| Counter {
                name,
                done: AtomicUsize::new(0),
                total,
            })
            .collect();

        let progress = Self {
            label,
            counters,
            draw: Mutex::new(()),
        };
        PROGRESS_SHOWN.store(true, Ordering::Release);
        progress.redraw(false);
        progress
    }

    /// Count one finished item for `name`. Unknown names are ignored.
    pub fn inc(&self, name: &str) {
        let Some(counter) = self.counters.iter().find(|c| c.name == name) else {
            return;
        };
        counter.done.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.draw.try_lock() {
            self.redraw(false);
        }
    }

    /// Items counted so far for `name`.
    pub fn current(&self, name: &str) -> usize {
        self.counters
            .iter()
            .find(|c| c.name == name)
            .map_or(0, |c| c.done.load(Ordering::Relaxed))
    }

    fn status(&self) -> String {
        let parts: Vec<String> = self
            .counters
            .iter()
            .map(|c| format!("{} {}/{}", c.name, c.done.load(Ordering::Relaxed), c.total))
            .collect();
        parts.join("  ")
    }

    fn redraw(&self, last: bool) {
        let mut err = stderr().lock();
        queue!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        write!(err, "{} {}", prefix(self.label), self.status()).ok();
        if last {
            writeln!(err).ok();
        }
        err.flush().ok();
    }

    /// Leave the final counts on screen.
    pub fn finish(self) {
        {
            let _guard = self.draw.lock();
            self.redraw(true);
        }
        PROGRESS_SHOWN.store(false, Ordering::Release);
        // Drop would wipe the line we just printed
        std::mem::forget(self);
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        PROGRESS_SHOWN.store(false, Ordering::Release);
        let mut err = stderr().lock();
        queue!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        err.flush().ok();
    }
}
