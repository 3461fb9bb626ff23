use crate::error::{CanYouError, Result};
use colored::*;
use std::process::ExitStatus;
use tokio::process::Command;

pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// 인자 벡터를 직접 실행 (표준 입출력은 터미널에 그대로 연결)
    pub async fn execute(&self, argv: &[String]) -> Result<ExitStatus> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| CanYouError::ExecutionError("empty invocation".to_string()))?;

        eprintln!("{} {}", "▶️  Running:".cyan(), argv.last().map(String::as_str).unwrap_or(""));
        tracing::debug!(program, ?args, "spawning process");

        let status = Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|e| CanYouError::ExecutionError(format!("{}: {}", program, e)))?;

        if !status.success() {
            eprintln!("{} {}", "❌ Exit status:".red(), status);
        }

        Ok(status)
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
