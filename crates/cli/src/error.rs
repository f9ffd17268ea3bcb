//! CLI exit codes.
//!
//! Responsibilities:
//! - Define the process exit codes and map command errors onto them.
//!
//! Does NOT handle:
//! - Error message formatting (anyhow's `Display`, printed by `main()`).
//! - Signal handling (see `cancellation`).
//!
//! Invariants:
//! - Every failure exits 1 so scripts only need one check; Ctrl+C exits 130.

use crate::cancellation::{SIGINT_EXIT_CODE, is_cancelled_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    /// Any client, configuration, argument or I/O failure.
    GeneralError = 1,
    /// SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = SIGINT_EXIT_CODE,
}

impl ExitCode {
    /// Convert the exit code for use with `std::process::exit()`.
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Extension trait to derive an exit code from `anyhow::Error`.
pub trait ExitCodeExt {
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        if is_cancelled_error(self) {
            ExitCode::Interrupted
        } else {
            ExitCode::GeneralError
        }
    }
}
