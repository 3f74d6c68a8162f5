//! Status message functions for terminal output.
//!
//! Styling goes through `if_supports_color`, so `--no-color`, `NO_COLOR` and
//! a non-terminal stderr all produce plain text.

use owo_colors::{OwoColorize, Stream, Style};

fn status(symbol: &str, style: Style, message: &str, tint: Option<Style>) {
    let symbol = symbol.if_supports_color(Stream::Stderr, |s| s.style(style));
    match tint {
        Some(tint) => {
            let message = message.if_supports_color(Stream::Stderr, |m| m.style(tint));
            eprintln!("{symbol} {message}");
        }
        None => eprintln!("{symbol} {message}"),
    }
}

/// Print a success message to stderr.
///
/// ```no_run
/// use knit_cli::ui::success;
///
/// success("Wrote dist/rollup.json");
/// ```
pub fn success(message: &str) {
    status("✓", Style::new().green().bold(), message, None);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    status("ℹ", Style::new().blue().bold(), message, None);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    status(
        "⚠",
        Style::new().yellow().bold(),
        message,
        Some(Style::new().yellow()),
    );
}
