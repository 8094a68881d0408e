//! agentdocs - framework documentation indexes for coding agents
//!
//! Downloads the documentation of a web framework into the project and writes
//! a compact, pipe-delimited index of it into `CLAUDE.md` (or `AGENTS.md`)
//! between HTML comment markers, so an agent reading that file knows which
//! local docs exist and where to look.
//!
//! # Flow
//!
//! 1. Pick a [`source::SourceAdapter`] (`rails`, `turbo`, `stimulus`, `alpine`)
//! 2. Resolve the version; for Rails it comes from `Gemfile.lock` ([`version`])
//! 3. Fetch the docs unless cached: zip archive over HTTP or a shallow git
//!    clone ([`fetch`], [`git`])
//! 4. Collect the markdown files and group them ([`markdown`], [`index`])
//! 5. Inject the index between the source's markers ([`markdown::markers`])
//! 6. Add the cache directory to `.gitignore` ([`installer`])
//!
//! Each source owns its own marker pair, so several indexes live side by
//! side in one file and re-running a command replaces only its own block.
//!
//! # Index format
//!
//! ```text
//! <!-- RAILS-AGENTS-MD-START -->
//! [Rails 7.1.3 Docs]|root:.rails-docs/rails-7.1.3/guides/source|...|active_record:{basics,callbacks}|getting_started
//! <!-- RAILS-AGENTS-MD-END -->
//! ```
//!
//! # Modules
//!
//! - [`cli`] - command-line parsing and output
//! - [`config`] - optional `~/.agentdocs/config.toml`
//! - [`core`] - error type, user-facing error formatting, prompts
//! - [`installer`] - the per-source pipeline
//! - [`utils`] - filesystem, platform and progress helpers

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fetch;
pub mod git;
pub mod index;
pub mod installer;
pub mod markdown;
pub mod source;
pub mod utils;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
