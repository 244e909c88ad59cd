//! Exit code constants for the ndareview CLI
//!
//! Exit codes are part of the external contract: scripts wrapping the CLI
//! dispatch on them, so the numeric values are stable.

/// Type-safe CLI exit code.
///
/// Use named constants and [`as_i32()`](Self::as_i32) with
/// `std::process::exit()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments or configuration error
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Input file has an unsupported extension
    pub const UNSUPPORTED_FORMAT: ExitCode = ExitCode(3);

    /// Input file could not be read or produced no text
    pub const EXTRACTION_FAILED: ExitCode = ExitCode(4);

    /// Provider call exceeded the configured timeout
    pub const PROVIDER_TIMEOUT: ExitCode = ExitCode(10);

    /// Provider call failed (auth, quota, outage, transport)
    pub const PROVIDER_FAILURE: ExitCode = ExitCode(70);

    /// Get the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}
