use crate::platform::{PlatformContext, ShellType};

/// 명령어 생성/계획 수립 프롬프트 템플릿
///
/// 모든 provider가 같은 형식의 프롬프트를 받도록 템플릿을 한 곳에서 관리합니다.
pub struct PromptTemplate;

impl PromptTemplate {
    /// 단일 명령어 생성을 위한 프롬프트
    ///
    /// # Arguments
    /// * `task` - 사용자 요청 (자연어)
    /// * `platform` - 플랫폼/셸 컨텍스트
    ///
    /// # Examples
    /// ```
    /// use canyou::ai::prompt_template::PromptTemplate;
    /// use canyou::platform;
    ///
    /// let prompt = PromptTemplate::build_command_prompt("파일 목록 보기", &platform::probe());
    /// assert!(prompt.contains("파일 목록 보기"));
    /// ```
    pub fn build_command_prompt(task: &str, platform: &PlatformContext) -> String {
        let shell = Self::shell_label(platform);

        format!(
            "You are a {shell} command generator. Convert natural language to a single {shell} command.\n\n\
             RULES:\n\
             - Output ONLY the command (no explanations, no markdown)\n\
             - Do NOT say \"I cannot\" or similar - just output the command\n\
             - The command must work on {platform} with {shell}\n\
             - Be precise and accurate\n\n\
             {context}\n\n\
             Current directory: {cwd}\n\
             Request: {task}\n\n\
             Command:",
            shell = shell,
            platform = platform.platform_label,
            context = platform.to_prompt_context(),
            cwd = Self::current_dir(),
            task = task,
        )
    }

    /// 다단계 계획 수립을 위한 프롬프트 (JSON 응답 요구)
    pub fn build_planning_prompt(task: &str, platform: &PlatformContext) -> String {
        format!(
            "{context}\n\n\
             Task: {task}\n\n\
             Create a detailed multi-step plan to accomplish this task on the {platform} platform. For each step:\n\
             1. Describe what needs to be done\n\
             2. Specify what information/validation is needed before executing\n\
             3. List potential risks or conflicts\n\n\
             IMPORTANT: All commands should be appropriate for {platform} and {shell}.\n\n\
             Output your plan in this JSON format:\n\
             ```json\n\
             {{\n  \
               \"steps\": [\n    \
                 {{\n      \
                   \"description\": \"Step description\",\n      \
                   \"validation\": \"What to check before executing\",\n      \
                   \"risks\": [\"potential risk 1\", \"potential risk 2\"]\n    \
                 }}\n  \
               ],\n  \
               \"overall_risks\": [\"overall risk 1\"],\n  \
               \"estimated_duration\": \"time estimate\"\n\
             }}\n\
             ```",
            context = platform.to_prompt_context(),
            task = task,
            platform = platform.platform_label,
            shell = platform.display_shell(),
        )
    }

    fn shell_label(platform: &PlatformContext) -> &str {
        match platform.shell_type {
            ShellType::PowerShell => "PowerShell",
            ShellType::Cmd => "Windows cmd",
            ShellType::Unknown => platform.shell_name.as_deref().unwrap_or("shell"),
            _ => platform.shell_type.as_str(),
        }
    }

    fn current_dir() -> String {
        std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::OsFamily;

    fn platform(shell_type: ShellType) -> PlatformContext {
        PlatformContext {
            os_family: OsFamily::Linux,
            platform_label: "Linux".to_string(),
            distro: Some("Debian GNU/Linux 12 (bookworm)".to_string()),
            distro_id: Some("debian".to_string()),
            architecture: "aarch64".to_string(),
            shell_name: Some("bash".to_string()),
            shell_path: Some("/bin/bash".to_string()),
            shell_type,
            shell_version: None,
        }
    }

    #[test]
    fn test_command_prompt() {
        let prompt = PromptTemplate::build_command_prompt("txt 파일 찾기", &platform(ShellType::Bash));

        assert!(prompt.contains("txt 파일 찾기"));
        assert!(prompt.contains("single bash command"));
        assert!(prompt.contains("RULES:"));
        assert!(prompt.contains("Debian GNU/Linux 12"));
        assert!(prompt.contains("Current directory:"));
    }

    #[test]
    fn test_command_prompt_powershell() {
        let prompt = PromptTemplate::build_command_prompt("list services", &platform(ShellType::PowerShell));
        assert!(prompt.contains("single PowerShell command"));
    }

    #[test]
    fn test_planning_prompt() {
        let prompt = PromptTemplate::build_planning_prompt("set up nginx", &platform(ShellType::Bash));

        assert!(prompt.contains("Task: set up nginx"));
        assert!(prompt.contains("- Architecture: aarch64"));
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("\"steps\": ["));
        assert!(prompt.contains("\"estimated_duration\""));
        assert!(prompt.contains("appropriate for Linux and bash"));
    }
}
