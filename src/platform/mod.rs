pub mod probe;

pub use probe::{probe, probe_with, EnvSource, HostEnv};

use std::fmt;

/// 운영체제 계열
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    MacOs,
    Windows,
    Other,
}

/// 감지된 셸 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Sh,
    PowerShell,
    Cmd,
    Unknown,
}

impl ShellType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::Sh => "sh",
            ShellType::PowerShell => "PowerShell",
            ShellType::Cmd => "cmd",
            ShellType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 호스트 OS/셸 정보 스냅샷
///
/// 계획 세션 또는 명령어 실행마다 한 번 생성되며 이후 변경되지 않습니다.
/// 감지에 실패한 항목은 `None` 또는 `Unknown`으로 남습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformContext {
    pub os_family: OsFamily,
    /// 사람이 읽는 플랫폼 이름 (예: "Linux", "macOS")
    pub platform_label: String,
    /// 배포판/버전 설명 (예: "Ubuntu 22.04.3 LTS")
    pub distro: Option<String>,
    /// /etc/os-release의 ID (Linux 전용)
    pub distro_id: Option<String>,
    pub architecture: String,
    pub shell_name: Option<String>,
    /// $SHELL 원본 값 (명령어 디스패치에 사용)
    pub shell_path: Option<String>,
    pub shell_type: ShellType,
    pub shell_version: Option<String>,
}

impl PlatformContext {
    pub fn is_windows(&self) -> bool {
        self.os_family == OsFamily::Windows
    }

    pub fn display_distro(&self) -> &str {
        self.distro.as_deref().unwrap_or("Unknown")
    }

    pub fn display_shell(&self) -> &str {
        self.shell_name.as_deref().unwrap_or("Unknown")
    }

    /// 셸 버전이 없으면 셸 타입으로 대체
    pub fn display_shell_detail(&self) -> String {
        self.shell_version
            .clone()
            .unwrap_or_else(|| self.shell_type.to_string())
    }

    /// 프롬프트에 삽입할 시스템 컨텍스트 블록
    pub fn to_prompt_context(&self) -> String {
        format!(
            "System Context:\n\
             - Platform: {}\n\
             - OS: {}\n\
             - Architecture: {}\n\
             - Shell: {} ({})",
            self.platform_label,
            self.display_distro(),
            self.architecture,
            self.display_shell(),
            self.display_shell_detail()
        )
    }
}
