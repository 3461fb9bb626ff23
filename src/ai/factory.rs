use crate::error::{CanYouError, Result};
use crate::ai::{AiProvider, gemini::GeminiProvider, claude::ClaudeProvider, codex::CodexProvider};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// 설치가 확인된 CLI 목록 (프로세스 수명 동안 캐싱)
static INSTALLED_CLIS: Lazy<Mutex<HashSet<String>>> = Lazy::new(|| Mutex::new(HashSet::new()));

/// Provider factory for creating AI providers based on the provider name
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance based on the provider name
    ///
    /// # Arguments
    /// * `provider_name` - The name of the provider (gemini, claude, codex)
    ///
    /// # Errors
    /// * Returns `CanYouError::AiCliError` if the provider name is unknown
    pub fn create(provider_name: &str) -> Result<Arc<dyn AiProvider>> {
        match provider_name.to_lowercase().as_str() {
            "gemini" => Ok(Arc::new(GeminiProvider::new())),
            "claude" => Ok(Arc::new(ClaudeProvider::new())),
            "codex" => Ok(Arc::new(CodexProvider::new())),
            _ => Err(CanYouError::AiCliError(format!(
                "Unknown AI provider: {}\n\
                 Supported providers: {}",
                provider_name,
                Self::supported_providers().join(", ")
            ))),
        }
    }

    /// Get a list of all supported provider names
    pub fn supported_providers() -> Vec<&'static str> {
        vec!["gemini", "claude", "codex"]
    }

    /// PATH에서 CLI를 찾아 설치 여부 확인 (성공 결과만 캐싱)
    pub fn check_installation(cli_command: &str, install_hint: &str) -> Result<()> {
        let mut installed = INSTALLED_CLIS.lock().unwrap_or_else(|e| e.into_inner());
        if installed.contains(cli_command) {
            return Ok(());
        }

        match which::which(cli_command) {
            Ok(path) => {
                tracing::debug!(cli = cli_command, path = %path.display(), "AI CLI found");
                installed.insert(cli_command.to_string());
                Ok(())
            }
            Err(_) => Err(CanYouError::ProviderNotInstalled {
                command: cli_command.to_string(),
                hint: install_hint.to_string(),
            }),
        }
    }
}
