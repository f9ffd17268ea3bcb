//! Shell completion generation command.
//!
//! Responsibilities:
//! - Generate completion scripts for bash, zsh, fish, powershell and elvish.
//!
//! Does NOT handle:
//! - Installing completions (redirect the output to the shell's completion directory).
//!
//! Invariants:
//! - Output is always written to stdout.
//! - Needs no API key.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

/// Generate shell completions for the specified shell.
pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = crate::args::Cli::command();
    generate(shell, &mut cmd, "oathnet", &mut io::stdout());
    Ok(())
}
