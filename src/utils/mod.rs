//! Cross-platform helpers shared by the fetcher, installer and CLI.

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, safe_write, to_forward_slashes};
pub use platform::{command_exists, get_git_command, resolve_path};
