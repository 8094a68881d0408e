//! User interaction seam.
//!
//! The installer never talks to the terminal directly; it asks a [`Prompter`].
//! The CLI passes a [`TerminalPrompter`] (or [`AutoConfirm`] under `--yes`),
//! tests pass [`AutoConfirm`] or their own scripted implementation.

use anyhow::Result;
use colored::Colorize;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use regex::Regex;
use std::io::{self, IsTerminal, Write};
use std::sync::LazyLock;
use tokio::io::{AsyncBufReadExt, BufReader};

static VERSION_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+\.\d+").expect("version input pattern is valid")
});

/// Number of times an invalid version answer is re-asked.
const VERSION_ATTEMPTS: usize = 3;

/// Side-effecting user interaction used by the installer.
///
/// Methods return boxed futures so the trait stays usable as `&dyn Prompter`.
pub trait Prompter {
    /// Ask a yes/no question. `true` means proceed.
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<bool>>;

    /// Ask for an explicit framework version. `None` means the user gave up.
    fn version<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<Option<String>>>;
}

/// Prompter that never asks: confirms everything and has no version to offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm<'a>(&'a self, _message: &'a str) -> LocalBoxFuture<'a, Result<bool>> {
        async { Ok(true) }.boxed_local()
    }

    fn version<'a>(&'a self, _message: &'a str) -> LocalBoxFuture<'a, Result<Option<String>>> {
        async { Ok(None) }.boxed_local()
    }
}

/// Prompter reading answers from stdin.
///
/// When stdin is not a terminal nothing is read: confirmations are declined
/// and no version is returned, so scripted runs never block.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    async fn ask(&self, message: &str) -> Result<Option<String>> {
        if !io::stdin().is_terminal() {
            return Ok(None);
        }

        print!("{} ", message.green());
        io::stdout().flush()?;

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Prompter for TerminalPrompter {
    fn confirm<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<bool>> {
        async move {
            let Some(answer) = self.ask(&format!("{message} [Y/n]:")).await? else {
                return Ok(false);
            };
            Ok(parse_confirmation(&answer))
        }
        .boxed_local()
    }

    fn version<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<Option<String>>> {
        async move {
            for _ in 0..VERSION_ATTEMPTS {
                let Some(answer) = self.ask(message).await? else {
                    return Ok(None);
                };
                if answer.is_empty() {
                    return Ok(None);
                }
                if is_valid_version_input(&answer) {
                    return Ok(Some(answer));
                }
                eprintln!("{}", "Enter a valid version (e.g., 7.1.3)".yellow());
            }
            Ok(None)
        }
        .boxed_local()
    }
}

/// Empty answers default to yes.
fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "" | "y" | "yes")
}

/// Whether a typed version starts with three numeric segments.
pub fn is_valid_version_input(input: &str) -> bool {
    VERSION_INPUT.is_match(input)
}
