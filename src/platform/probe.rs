use super::{OsFamily, PlatformContext, ShellType};
use std::path::Path;
use std::process::Command;

/// 호스트 환경 읽기를 한 곳으로 모으는 인터페이스
///
/// 테스트에서는 가짜 구현으로 교체하여 OS 의존성 없이 감지 로직을 검증합니다.
pub trait EnvSource {
    /// `std::env::consts::OS` 형식의 OS 이름
    fn os(&self) -> String;
    fn arch(&self) -> String;
    fn var(&self, key: &str) -> Option<String>;
    fn read_file(&self, path: &str) -> Option<String>;
    /// macOS/Windows 버전 문자열
    fn os_version(&self) -> Option<String>;
}

/// 실제 호스트 환경
pub struct HostEnv;

impl EnvSource for HostEnv {
    fn os(&self) -> String {
        std::env::consts::OS.to_string()
    }

    fn arch(&self) -> String {
        std::env::consts::ARCH.to_string()
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn read_file(&self, path: &str) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    fn os_version(&self) -> Option<String> {
        let output = match std::env::consts::OS {
            "macos" => Command::new("sw_vers").arg("-productVersion").output(),
            "windows" => Command::new("cmd").args(["/c", "ver"]).output(),
            _ => return None,
        };

        match output {
            Ok(out) if out.status.success() => {
                let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
                (!version.is_empty()).then_some(version)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("OS version lookup failed: {}", e);
                None
            }
        }
    }
}

/// OS 이름 → (계열, 표시 이름)
const OS_TABLE: &[(&str, OsFamily, &str)] = &[
    ("linux", OsFamily::Linux, "Linux"),
    ("macos", OsFamily::MacOs, "macOS"),
    ("windows", OsFamily::Windows, "Windows"),
];

/// $SHELL 경로 부분 문자열 → 셸 타입 (순서 중요: "bash"가 "sh"보다 먼저)
const UNIX_SHELL_TABLE: &[(&str, ShellType)] = &[
    ("bash", ShellType::Bash),
    ("zsh", ShellType::Zsh),
    ("fish", ShellType::Fish),
    ("sh", ShellType::Sh),
];

const OS_RELEASE_PATH: &str = "/etc/os-release";

/// 현재 호스트의 플랫폼 컨텍스트 감지
pub fn probe() -> PlatformContext {
    probe_with(&HostEnv)
}

/// 주어진 환경 소스로 플랫폼 컨텍스트 감지 (실패하지 않음)
pub fn probe_with(env: &dyn EnvSource) -> PlatformContext {
    let os = env.os();
    let (os_family, platform_label) = OS_TABLE
        .iter()
        .find(|(name, _, _)| *name == os)
        .map(|(_, family, label)| (*family, label.to_string()))
        .unwrap_or_else(|| (OsFamily::Other, os.clone()));

    let (distro, distro_id) = match os_family {
        OsFamily::Linux => detect_linux_distro(env),
        OsFamily::MacOs => (env.os_version().map(|v| format!("macOS {}", v)), None),
        OsFamily::Windows => (env.os_version(), None),
        OsFamily::Other => (None, None),
    };

    let shell = if os_family == OsFamily::Windows {
        detect_windows_shell(env)
    } else {
        detect_unix_shell(env)
    };

    let context = PlatformContext {
        os_family,
        platform_label,
        distro,
        distro_id,
        architecture: env.arch(),
        shell_name: shell.name,
        shell_path: shell.path,
        shell_type: shell.shell_type,
        shell_version: shell.version,
    };

    tracing::debug!(?context, "platform probed");
    context
}

struct ShellInfo {
    name: Option<String>,
    path: Option<String>,
    shell_type: ShellType,
    version: Option<String>,
}

fn detect_linux_distro(env: &dyn EnvSource) -> (Option<String>, Option<String>) {
    let Some(content) = env.read_file(OS_RELEASE_PATH) else {
        tracing::debug!("{} not readable, falling back", OS_RELEASE_PATH);
        return (Some("Unknown Linux".to_string()), None);
    };

    let mut pretty_name = None;
    let mut id = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            // 따옴표 제거
            let value = value.trim().trim_matches('"').trim_matches('\'').to_string();
            match key.trim() {
                "PRETTY_NAME" => pretty_name = Some(value),
                "ID" => id = Some(value),
                _ => {}
            }
        }
    }

    (
        Some(pretty_name.unwrap_or_else(|| "Unknown Linux".to_string())),
        id,
    )
}

fn detect_unix_shell(env: &dyn EnvSource) -> ShellInfo {
    let path = env.var("SHELL");

    let name = path.as_deref().and_then(|p| {
        Path::new(p)
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
    });

    let shell_type = path
        .as_deref()
        .and_then(|p| {
            UNIX_SHELL_TABLE
                .iter()
                .find(|(needle, _)| p.contains(needle))
                .map(|(_, t)| *t)
        })
        .unwrap_or(ShellType::Unknown);

    ShellInfo {
        name,
        path,
        shell_type,
        version: None,
    }
}

fn detect_windows_shell(env: &dyn EnvSource) -> ShellInfo {
    if env.var("PSModulePath").is_none() {
        return ShellInfo {
            name: Some("cmd".to_string()),
            path: None,
            shell_type: ShellType::Cmd,
            version: None,
        };
    }

    // PowerShell Core(pwsh)와 Windows PowerShell 구분
    let is_core = env
        .var("PROMPT")
        .map(|p| p.to_lowercase().contains("pwsh"))
        .unwrap_or(false)
        || env.var("POWERSHELL_DISTRIBUTION_CHANNEL").is_some();

    let version = if is_core {
        "PowerShell Core (pwsh)"
    } else {
        "Windows PowerShell"
    };

    ShellInfo {
        name: Some("PowerShell".to_string()),
        path: None,
        shell_type: ShellType::PowerShell,
        version: Some(version.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// 테스트용 가짜 환경
    #[derive(Default)]
    struct FakeEnv {
        os: String,
        arch: String,
        vars: HashMap<String, String>,
        files: HashMap<String, String>,
        version: Option<String>,
    }

    impl FakeEnv {
        fn new(os: &str) -> Self {
            Self {
                os: os.to_string(),
                arch: "x86_64".to_string(),
                ..Default::default()
            }
        }

        fn with_var(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.to_string(), value.to_string());
            self
        }

        fn with_file(mut self, path: &str, content: &str) -> Self {
            self.files.insert(path.to_string(), content.to_string());
            self
        }

        fn with_version(mut self, version: &str) -> Self {
            self.version = Some(version.to_string());
            self
        }
    }

    impl EnvSource for FakeEnv {
        fn os(&self) -> String {
            self.os.clone()
        }

        fn arch(&self) -> String {
            self.arch.clone()
        }

        fn var(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }

        fn read_file(&self, path: &str) -> Option<String> {
            self.files.get(path).cloned()
        }

        fn os_version(&self) -> Option<String> {
            self.version.clone()
        }
    }

    const UBUNTU_OS_RELEASE: &str = r#"NAME="Ubuntu"
VERSION="22.04.3 LTS (Jammy Jellyfish)"
ID=ubuntu
ID_LIKE=debian
PRETTY_NAME="Ubuntu 22.04.3 LTS"
"#;

    #[test]
    fn test_linux_with_os_release() {
        let env = FakeEnv::new("linux")
            .with_file(OS_RELEASE_PATH, UBUNTU_OS_RELEASE)
            .with_var("SHELL", "/bin/bash");

        let ctx = probe_with(&env);
        assert_eq!(ctx.os_family, OsFamily::Linux);
        assert_eq!(ctx.platform_label, "Linux");
        assert_eq!(ctx.distro.as_deref(), Some("Ubuntu 22.04.3 LTS"));
        assert_eq!(ctx.distro_id.as_deref(), Some("ubuntu"));
        assert_eq!(ctx.architecture, "x86_64");
        assert_eq!(ctx.shell_name.as_deref(), Some("bash"));
        assert_eq!(ctx.shell_path.as_deref(), Some("/bin/bash"));
        assert_eq!(ctx.shell_type, ShellType::Bash);
    }

    #[test]
    fn test_linux_without_os_release() {
        let env = FakeEnv::new("linux");

        let ctx = probe_with(&env);
        assert_eq!(ctx.distro.as_deref(), Some("Unknown Linux"));
        assert_eq!(ctx.distro_id, None);
        assert_eq!(ctx.shell_name, None);
        assert_eq!(ctx.shell_type, ShellType::Unknown);
    }

    #[test]
    fn test_os_release_without_pretty_name() {
        let env = FakeEnv::new("linux").with_file(OS_RELEASE_PATH, "# comment\nID='arch'\n\n");

        let ctx = probe_with(&env);
        assert_eq!(ctx.distro.as_deref(), Some("Unknown Linux"));
        assert_eq!(ctx.distro_id.as_deref(), Some("arch"));
    }

    #[test]
    fn test_unix_shell_table() {
        let cases = [
            ("/usr/bin/zsh", ShellType::Zsh),
            ("/usr/local/bin/fish", ShellType::Fish),
            ("/bin/sh", ShellType::Sh),
            ("/bin/dash", ShellType::Sh),
            ("/usr/bin/bash", ShellType::Bash),
            ("/usr/bin/nu", ShellType::Unknown),
        ];

        for (shell, expected) in cases {
            let env = FakeEnv::new("macos").with_var("SHELL", shell);
            assert_eq!(probe_with(&env).shell_type, expected, "shell: {}", shell);
        }
    }

    #[test]
    fn test_macos_distro_label() {
        let env = FakeEnv::new("macos")
            .with_version("14.2.1")
            .with_var("SHELL", "/bin/zsh");

        let ctx = probe_with(&env);
        assert_eq!(ctx.os_family, OsFamily::MacOs);
        assert_eq!(ctx.platform_label, "macOS");
        assert_eq!(ctx.distro.as_deref(), Some("macOS 14.2.1"));
    }

    #[test]
    fn test_windows_cmd() {
        let env = FakeEnv::new("windows").with_version("Microsoft Windows [Version 10.0.22631]");

        let ctx = probe_with(&env);
        assert_eq!(ctx.os_family, OsFamily::Windows);
        assert_eq!(ctx.shell_type, ShellType::Cmd);
        assert_eq!(ctx.shell_name.as_deref(), Some("cmd"));
        assert!(ctx.distro.unwrap().contains("10.0.22631"));
    }

    #[test]
    fn test_windows_powershell_variants() {
        let legacy = FakeEnv::new("windows").with_var("PSModulePath", "C:\\modules");
        let ctx = probe_with(&legacy);
        assert_eq!(ctx.shell_type, ShellType::PowerShell);
        assert_eq!(ctx.shell_version.as_deref(), Some("Windows PowerShell"));

        let core = FakeEnv::new("windows")
            .with_var("PSModulePath", "C:\\modules")
            .with_var("POWERSHELL_DISTRIBUTION_CHANNEL", "MSI:Windows 10 Pro");
        let ctx = probe_with(&core);
        assert_eq!(ctx.shell_version.as_deref(), Some("PowerShell Core (pwsh)"));

        let prompt = FakeEnv::new("windows")
            .with_var("PSModulePath", "C:\\modules")
            .with_var("PROMPT", "PWSH $P$G");
        let ctx = probe_with(&prompt);
        assert_eq!(ctx.shell_version.as_deref(), Some("PowerShell Core (pwsh)"));
    }

    #[test]
    fn test_windows_ignores_shell_var() {
        // Git Bash 등이 SHELL을 설정해도 Windows에서는 무시
        let env = FakeEnv::new("windows").with_var("SHELL", "/usr/bin/bash");
        let ctx = probe_with(&env);
        assert_eq!(ctx.shell_type, ShellType::Cmd);
        assert_eq!(ctx.shell_path, None);
    }

    #[test]
    fn test_other_os() {
        let env = FakeEnv::new("freebsd").with_var("SHELL", "/usr/local/bin/bash");

        let ctx = probe_with(&env);
        assert_eq!(ctx.os_family, OsFamily::Other);
        assert_eq!(ctx.platform_label, "freebsd");
        assert_eq!(ctx.distro, None);
        assert_eq!(ctx.shell_type, ShellType::Bash);
    }

    #[test]
    fn test_probe_idempotent() {
        assert_eq!(probe(), probe());

        let env = FakeEnv::new("linux").with_file(OS_RELEASE_PATH, UBUNTU_OS_RELEASE);
        assert_eq!(probe_with(&env), probe_with(&env));
    }
}
