//! Core types shared by every agentdocs module.
//!
//! - [`error`] holds [`DocsError`], [`ErrorContext`] and [`user_friendly_error`],
//!   the pieces every fallible operation and the CLI error display rely on.
//! - [`prompt`] holds the [`Prompter`] seam through which the installer asks
//!   the user for confirmation or an explicit version.

pub mod error;
pub mod prompt;

pub use error::{DocsError, ErrorContext, user_friendly_error};
pub use prompt::{AutoConfirm, Prompter, TerminalPrompter};
