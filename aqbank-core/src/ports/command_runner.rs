//! Command runner port - external tool invocation
//!
//! Defines how the profile manager talks to aqhbci-tool4 without knowing
//! whether a real process is spawned.

use std::io;

/// Buffered result of one external tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// True when the tool exited with code zero
    pub success: bool,
    /// Human-readable exit status (e.g. "exit status: 1")
    pub status: String,
    /// Captured stdout followed by stderr
    pub output: String,
}

impl CommandOutput {
    /// Successful run with the given output
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            status: "exit status: 0".to_string(),
            output: output.into(),
        }
    }

    /// Failed run with the given exit code and output
    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            success: false,
            status: format!("exit status: {}", code),
            output: output.into(),
        }
    }
}

/// Runs the external banking tool with a list of arguments
///
/// Implementations block until the tool exits. An `Err` means the tool could
/// not be run at all; a tool that ran and failed is reported through
/// `CommandOutput::success`.
pub trait CommandRunner: Send + Sync {
    /// Program name used in log and error messages
    fn program(&self) -> &str;

    /// Run the tool with `args` and capture its combined output
    fn run(&self, args: &[String]) -> io::Result<CommandOutput>;
}
