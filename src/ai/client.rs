use crate::ai::{AiProvider, ChatResponse, ModelClient};
use crate::error::{CanYouError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const PLANNING_PREAMBLE: &str = "You are a careful systems administrator planning work on the user's machine. \
Break the task into small ordered steps that can each be turned into a single shell command. \
Respond only with the requested JSON.";

/// 이전 요청/응답 한 쌍
#[derive(Debug, Clone)]
struct Exchange {
    prompt: String,
    response: String,
}

/// AI CLI를 감싸 대화 맥락을 유지하는 모델 클라이언트
///
/// CLI 호출 자체는 상태가 없으므로 이전 대화를 프롬프트 앞에 붙여 맥락을 흉내냅니다.
pub struct CliModelClient {
    provider: Arc<dyn AiProvider>,
    timeout: Duration,
    transcript: Mutex<Vec<Exchange>>,
}

impl CliModelClient {
    pub fn new(provider: Arc<dyn AiProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// 지시문 + 이전 대화 + 새 프롬프트
    fn compose_prompt(&self, prompt: &str, use_planning_mode: bool) -> String {
        let mut full = String::new();

        if use_planning_mode {
            full.push_str(PLANNING_PREAMBLE);
            full.push_str("\n\n");
        }

        let transcript = self.transcript.lock().unwrap_or_else(|e| e.into_inner());
        if !transcript.is_empty() {
            full.push_str("Previous conversation:\n");
            for exchange in transcript.iter() {
                full.push_str(&format!(
                    "User: {}\nAssistant: {}\n",
                    exchange.prompt, exchange.response
                ));
            }
            full.push('\n');
        }

        full.push_str(prompt);
        full
    }

    fn turn_count(&self) -> usize {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl ModelClient for CliModelClient {
    async fn chat(&self, prompt: &str, use_planning_mode: bool) -> Result<ChatResponse> {
        let full_prompt = self.compose_prompt(prompt, use_planning_mode);

        tracing::debug!(
            provider = self.provider.name(),
            planning = use_planning_mode,
            turns = self.turn_count(),
            "sending prompt"
        );

        let response = tokio::time::timeout(self.timeout, self.provider.complete(&full_prompt))
            .await
            .map_err(|_| {
                CanYouError::AiCliError(format!(
                    "{} did not respond within {}s",
                    self.provider.name(),
                    self.timeout.as_secs()
                ))
            })??;

        self.transcript
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Exchange {
                prompt: prompt.to_string(),
                response: response.clone(),
            });

        Ok(ChatResponse::from_text(response))
    }

    fn reset_conversation(&self) {
        self.transcript
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        tracing::debug!("conversation reset");
    }
}
