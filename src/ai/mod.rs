pub mod claude;
pub mod client;
pub mod codex;
pub mod factory;
pub mod gemini;
pub mod prompt_template;
pub mod response_processor;

use crate::error::{CanYouError, Result};
use async_trait::async_trait;
use factory::ProviderFactory;
use tokio::process::Command;

pub use client::CliModelClient;

/// AI provider trait for extensible CLI integration
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "claude", "codex")
    fn name(&self) -> &str;

    /// CLI command name (e.g., "gemini", "claude", "codex")
    fn cli_command(&self) -> &str;

    /// Installation instructions shown when the CLI is missing
    fn install_hint(&self) -> &str;

    /// Arguments that make the CLI answer a single prompt non-interactively
    fn build_args(&self, prompt: &str) -> Vec<String>;

    /// Check if the CLI is installed on the system
    async fn check_installation(&self) -> Result<()> {
        // 캐싱된 설치 확인 사용
        ProviderFactory::check_installation(self.cli_command(), self.install_hint())
    }

    /// Send one prompt to the CLI and return its raw stdout
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.check_installation().await?;

        tracing::debug!(provider = self.name(), prompt_len = prompt.len(), "calling AI CLI");

        let output = Command::new(self.cli_command())
            .args(self.build_args(prompt))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CanYouError::AiCliError(e.to_string()))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(CanYouError::AiCliError(error.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// 모델 응답 메시지 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub content: String,
}

/// 모델 응답 (최소 하나의 텍스트 메시지)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
}

impl ChatResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage {
                content: text.into(),
            }],
        }
    }

    /// 첫 번째 메시지 본문
    pub fn content(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}

/// Planner와 Executor가 사용하는 언어 모델 클라이언트
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// 프롬프트 전송. `use_planning_mode`가 true면 계획 수립용 지시문 사용
    async fn chat(&self, prompt: &str, use_planning_mode: bool) -> Result<ChatResponse>;

    /// 이전 대화 맥락 초기화 (여러 번 호출해도 안전)
    fn reset_conversation(&self);
}
