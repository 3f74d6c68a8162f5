//! Command implementations for the knit CLI.
//!
//! - [`compose`] - Write the composed bundler configuration
//! - [`externals`] - List external specifiers
//! - [`check`] - Validate inputs and report drift
//! - [`settings`] - Print effective settings
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod check;
pub mod compose;
pub mod externals;
pub mod settings;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use compose::execute as compose_execute;
pub use externals::execute as externals_execute;
pub use settings::execute as settings_execute;
