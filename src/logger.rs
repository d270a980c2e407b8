//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, only printed with `--verbose`
//! - `ProgressLine` for single-line progress display with named counters
//!
//! # Example
//!
//! ```ignore
//! log!("fetch"; "{}", url);
//!
//! let progress = ProgressLine::new("enrich", &[("pages", 10)]);
//! progress.inc("pages");
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute, queue,
    terminal::{Clear, ClearType},
    tty::IsTty,
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    cell::Cell,
    io::{Write, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Active progress bar count (for log coordination)
static BAR_COUNT: AtomicUsize = AtomicUsize::new(0);

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();

    let bar_count = BAR_COUNT.load(Ordering::SeqCst);
    if bar_count > 0 {
        execute!(stdout, cursor::MoveToColumn(0)).ok();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
    }

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
///
/// Honors `--color` through `owo_colors::set_override`.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "fetch" | "enrich" => Style::new().bright_blue().bold(),
        "done" => Style::new().bright_green().bold(),
        "error" | "warning" => Style::new().bright_red().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    prefix
        .if_supports_color(Stream::Stdout, |text| text.style(style))
        .to_string()
}

// ============================================================================
// Progress Line (single-line counters)
// ============================================================================

/// Single-line progress display with multiple counters
///
/// Displays: `[enrich] pages(3/10)`
///
/// On a terminal, counters update in place on the same line and a `log!`
/// issued while the line is active clears it first; the next `inc` redraws
/// it. Otherwise only the final line is printed, without escape codes.
pub struct ProgressLine {
    module: &'static str,
    counters: Vec<Counter>,
    interactive: bool,
}

struct Counter {
    name: &'static str,
    total: usize,
    current: Cell<usize>,
}

impl ProgressLine {
    /// Create a new progress display under the given module prefix.
    ///
    /// Only includes counters with total > 0.
    pub fn new(module: &'static str, items: &[(&'static str, usize)]) -> Self {
        let progress = Self::with_mode(module, items, stdout().is_tty());
        if progress.interactive {
            progress.draw(&mut stdout().lock(), false);
        }
        progress
    }

    fn with_mode(module: &'static str, items: &[(&'static str, usize)], interactive: bool) -> Self {
        let counters = items
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|(name, total)| Counter {
                name,
                total: *total,
                current: Cell::new(0),
            })
            .collect();

        if interactive {
            BAR_COUNT.store(1, Ordering::SeqCst);
        }

        Self {
            module,
            counters,
            interactive,
        }
    }

    /// Increment the counter with the given name.
    #[inline]
    pub fn inc(&self, name: &str) {
        if let Some(counter) = self.counters.iter().find(|c| c.name == name) {
            counter.current.set(counter.current.get() + 1);
            if self.interactive {
                self.draw(&mut stdout().lock(), false);
            }
        }
    }

    #[cfg(test)]
    fn current(&self, name: &str) -> Option<usize> {
        self.counters
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.current.get())
    }

    fn render(&self) -> String {
        self.counters
            .iter()
            .map(|c| format!("{}({}/{})", c.name, c.current.get(), c.total))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Draw the progress line, with a trailing newline when `keep`.
    fn draw(&self, out: &mut impl Write, keep: bool) {
        let line = self.render();
        let prefix = colorize_prefix(self.module, &self.module.to_ascii_lowercase());

        if self.interactive {
            queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        }
        if keep {
            writeln!(out, "{prefix} {line}").ok();
        } else {
            write!(out, "{prefix} {line}").ok();
        }
        out.flush().ok();
    }

    /// Finish progress display, preserve line and move to next line.
    pub fn finish(self) {
        self.finish_to(&mut stdout().lock());
    }

    fn finish_to(self, out: &mut impl Write) {
        if self.interactive {
            BAR_COUNT.store(0, Ordering::SeqCst);
        }
        self.draw(out, true);
        std::mem::forget(self); // Prevent Drop from clearing
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        if !self.interactive {
            return;
        }
        BAR_COUNT.store(0, Ordering::SeqCst);

        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        stdout.flush().ok();
    }
}

// ============================================================================
// Tests
// ============================================================================
