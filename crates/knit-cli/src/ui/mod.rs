//! Terminal status lines.
//!
//! Everything here writes to stderr; stdout is reserved for command output.

mod messages;

pub use messages::{info, success, warning};

/// Whether status lines should be colored.
///
/// Respects `NO_COLOR` and `FORCE_COLOR`, falls back to terminal detection.
pub fn should_use_color() -> bool {
    crate::logger::should_use_colors()
}

/// Apply the color choice to every status line printed afterwards.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(!no_color && should_use_color());
}
