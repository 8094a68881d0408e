//! End-to-end tests for the `agentdocs` binary.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **list**: `agentdocs list` table and JSON output
//! - **sources**: fetching, indexing and caching for each source
//! - **errors**: user-facing failures and exit codes

#[path = "../common/mod.rs"]
mod common;

mod errors;
mod list;
mod sources;
