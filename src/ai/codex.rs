use crate::ai::AiProvider;

pub struct CodexProvider;

impl CodexProvider {
    pub fn new() -> Self {
        Self
    }
}

impl AiProvider for CodexProvider {
    fn name(&self) -> &str {
        "codex"
    }

    fn cli_command(&self) -> &str {
        "codex"
    }

    fn install_hint(&self) -> &str {
        "Installation: npm install -g @openai/codex"
    }

    fn build_args(&self, prompt: &str) -> Vec<String> {
        vec!["exec".to_string(), prompt.to_string()]
    }
}
