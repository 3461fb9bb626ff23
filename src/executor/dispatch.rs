use crate::platform::{PlatformContext, ShellType};
use std::path::PathBuf;

const POWERSHELL_ARGS: &[&str] = &["-NoProfile", "-ExecutionPolicy", "Bypass", "-Command"];

/// 명령어 문자열을 플랫폼에 맞는 프로세스 인자 벡터로 변환
pub struct ShellDispatchBuilder;

impl ShellDispatchBuilder {
    /// PATH 검색으로 셸 실행 파일을 찾아 인자 벡터 생성
    ///
    /// # Examples
    /// ```
    /// use canyou::executor::dispatch::ShellDispatchBuilder;
    /// use canyou::platform;
    ///
    /// let argv = ShellDispatchBuilder::build_invocation("echo hi", &platform::probe());
    /// assert_eq!(argv.last().map(String::as_str), Some("echo hi"));
    /// ```
    pub fn build_invocation(command: &str, context: &PlatformContext) -> Vec<String> {
        Self::build_invocation_with(command, context, |name| which::which(name).ok())
    }

    /// 실행 파일 탐색 함수를 주입받는 버전
    ///
    /// 탐색에 실패하면 리터럴 토큰을 그대로 사용하고, "실행 파일 없음" 보고는
    /// 프로세스 실행 단계에 맡깁니다.
    pub fn build_invocation_with<F>(command: &str, context: &PlatformContext, locate: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let find = |name: &str| locate(name).map(|p| p.display().to_string());

        let argv: Vec<String> = if context.is_windows() {
            if context.shell_type == ShellType::PowerShell {
                let exe = find("pwsh")
                    .or_else(|| find("powershell"))
                    .or_else(|| find("powershell.exe"))
                    .unwrap_or_else(|| "powershell".to_string());

                std::iter::once(exe)
                    .chain(POWERSHELL_ARGS.iter().map(|a| a.to_string()))
                    .chain(std::iter::once(command.to_string()))
                    .collect()
            } else {
                let exe = find("cmd").unwrap_or_else(|| "cmd".to_string());
                vec![exe, "/c".to_string(), command.to_string()]
            }
        } else {
            let shell = context
                .shell_path
                .clone()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| find("bash"))
                .unwrap_or_else(|| "/bin/sh".to_string());
            vec![shell, "-lc".to_string(), command.to_string()]
        };

        tracing::debug!(?argv, "built shell invocation");
        argv
    }
}
