use crate::ai::AiProvider;

pub struct GeminiProvider;

impl GeminiProvider {
    pub fn new() -> Self {
        Self
    }
}

impl AiProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn cli_command(&self) -> &str {
        "gemini"
    }

    fn install_hint(&self) -> &str {
        "Installation: npm install -g @google/gemini-cli"
    }

    fn build_args(&self, prompt: &str) -> Vec<String> {
        // -p: 비대화형 단일 프롬프트 모드
        vec!["-p".to_string(), prompt.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = GeminiProvider::new();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.cli_command(), "gemini");
    }

    #[test]
    fn test_build_args() {
        let args = GeminiProvider::new().build_args("list files");
        assert_eq!(args, vec!["-p", "list files"]);
    }
}
