//! Process adapter - runs aqhbci-tool4 as a child process

use std::io;
use std::process::Command;

use crate::ports::{CommandOutput, CommandRunner};

/// Default name of the AqBanking HBCI tool
pub const DEFAULT_TOOL: &str = "aqhbci-tool4";

/// Spawns the real external tool and waits for it to exit
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl CommandRunner for ProcessRunner {
    fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(&self.program).args(args).output()?;

        // stdout first, then stderr
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            output: combined,
        })
    }
}
