use crate::ai::AiProvider;

pub struct ClaudeProvider;

impl ClaudeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl AiProvider for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    fn cli_command(&self) -> &str {
        "claude"
    }

    fn install_hint(&self) -> &str {
        "Installation: npm install -g @anthropic-ai/claude-code"
    }

    fn build_args(&self, prompt: &str) -> Vec<String> {
        // --print: 응답만 출력하고 종료
        vec!["--print".to_string(), prompt.to_string()]
    }
}
