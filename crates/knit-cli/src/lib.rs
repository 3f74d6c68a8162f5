//! knit CLI - composes a bundler configuration for a library build.
//!
//! The composition itself lives in `knit-config`; this crate reads the
//! project from disk, reports problems, and writes the result.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - `compose`, `externals`, `check`, `settings`
//! - [`error`] - CLI errors and miette conversion
//! - [`logger`] - tracing setup
//! - [`ui`] - status lines on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use knit_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
