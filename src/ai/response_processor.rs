use crate::error::{CanYouError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// 사전 컴파일된 정규표현식 (언어 태그가 붙은 코드 블록 포함)
static CODE_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:bash|sh|zsh|fish|shell|console|powershell|pwsh|ps1|cmd|bat)?[ \t]*\r?\n(.*?)\r?\n```").unwrap()
});

/// 모델이 명령어 대신 설명을 돌려줬음을 나타내는 문구
const REFUSAL_PATTERNS: &[&str] = &[
    "I am unable to",
    "I cannot",
    "I can't",
    "I will try to find",
    "I'm sorry",
    "As an AI",
    "I don't have the ability",
];

const EXPLANATION_PREFIXES: &[&str] = &[
    "Here is the command:",
    "The command is:",
    "You can use:",
    "Try this:",
    "Run this:",
    "Execute:",
    "Command:",
];

/// 첫 코드 블록 본문만 남김. ```text 처럼 목록에 없는 언어 태그 줄은 건너뜀
fn strip_fence(text: &str) -> String {
    let body = match text.split_once("```") {
        Some((_, rest)) => rest.split("```").next().unwrap_or_default(),
        None => text,
    };

    let body = match body.split_once('\n') {
        Some((tag, content)) if is_fence_tag(tag) && !content.trim().is_empty() => content,
        _ => body,
    };

    body.replace("```", "").trim().to_string()
}

fn is_fence_tag(line: &str) -> bool {
    let tag = line.trim();
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}

/// 모델 응답에서 실행할 명령어 한 줄만 추출
pub struct ResponseProcessor;

impl ResponseProcessor {
    /// 모델 응답을 후처리하여 실제 명령어만 추출
    ///
    /// # Examples
    /// ```
    /// use canyou::ai::response_processor::ResponseProcessor;
    ///
    /// let result = ResponseProcessor::process("```bash\nls -la\n```");
    /// assert_eq!(result.unwrap(), "ls -la");
    /// ```
    pub fn process(raw: &str) -> Result<String> {
        let mut command = raw.trim().to_string();

        // 1. 메타 응답 감지
        let lowered = command.to_lowercase();
        if REFUSAL_PATTERNS
            .iter()
            .any(|p| lowered.contains(&p.to_lowercase()))
        {
            return Err(CanYouError::AiCliError(format!(
                "AI returned an explanation instead of a command: {}\n\
                 Please try again with a clearer prompt.",
                command
            )));
        }

        // 2. 마크다운 코드 블록 제거
        if command.contains("```") {
            if let Some(caps) = CODE_BLOCK_REGEX.captures(&command) {
                command = caps.get(1).map_or("", |m| m.as_str()).to_string();
            } else {
                command = strip_fence(&command);
            }
        }

        // 3. 설명 프리픽스 제거
        for prefix in EXPLANATION_PREFIXES {
            if command.to_lowercase().starts_with(&prefix.to_lowercase()) {
                command = command[prefix.len()..].trim().to_string();
            }
        }

        // 4. 여러 줄인 경우 첫 번째 유효한 명령어만 추출
        let lines: Vec<&str> = command
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() > 1 {
            // 첫 줄이 설명이면 두 번째 줄 사용
            if lines[0].ends_with(':') || lines[0].len() > 50 {
                command = lines[1].to_string();
            } else {
                command = lines[0].to_string();
            }
        }

        // 5. 프롬프트 기호 및 인라인 코드 표시 제거
        let mut command = command.trim().trim_matches('`').trim().to_string();
        if let Some(stripped) = command.strip_prefix("$ ") {
            command = stripped.trim().to_string();
        }

        if command.is_empty() {
            return Err(CanYouError::AiCliError(
                "AI returned an empty command. Please try again.".to_string(),
            ));
        }

        Ok(command)
    }
}
