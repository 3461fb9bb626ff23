use crate::error::{CanYouError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// 차단 규칙 (패턴, 설명)
struct BlockRule {
    pattern: Regex,
    description: &'static str,
}

/// 절대 금지 패턴. 순서대로 검사하며 하나라도 매칭되면 차단
static BLOCK_RULES: Lazy<Vec<BlockRule>> = Lazy::new(|| {
    [
        (
            r"\brm\s+(-rf|-fr|-r\s+-f|-f\s+-r)\s+/",
            "recursive delete from an absolute path",
        ),
        (r"\brm\s+.*--no-preserve-root", "recursive delete of the root filesystem"),
        (r"\bdd\s+if=/dev/zero\s+of=/dev/", "raw write of zeros to a block device"),
        (r":\(\)\s*\{\s*:\|:&\s*\};:", "fork bomb"),
        (r">\s*/dev/sd[a-z]", "redirect into a disk device"),
        (r"\bmkfs(\.|\s)", "filesystem formatting"),
        (r"\b(s?fdisk|parted)\b", "partition table manipulation"),
        (r"\bcryptsetup\b", "disk encryption setup"),
        (r"\bchmod\s+-R\s+777\s+/", "recursive world-writable permissions from /"),
        (r"\bchown\s+-R.*\s+/", "recursive ownership change from /"),
    ]
    .into_iter()
    .map(|(pattern, description)| BlockRule {
        pattern: Regex::new(&format!("(?i){}", pattern)).unwrap(),
        description,
    })
    .collect()
});

static ELEVATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(sudo|su\s)").unwrap());

/// 변경 작업 시 주의가 필요한 시스템 디렉토리
const SYSTEM_DIRS: &[&str] = &["/etc", "/sys", "/proc", "/boot", "/usr/bin", "/usr/sbin"];

/// 변경을 암시하는 토큰 (단순 부분 문자열 검사)
const MUTATING_TOKENS: &[&str] = &["rm", "delete", "write", ">"];

/// 명령어 하나에 대한 안전성 판정
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafetyVerdict {
    /// false면 실행 금지
    pub safe: bool,
    /// 차단 사유 (차단된 경우에만 존재)
    pub reason: Option<String>,
    pub warning: Option<String>,
    pub requires_elevation: bool,
    pub requires_caution: bool,
}

impl SafetyVerdict {
    fn allowed() -> Self {
        Self {
            safe: true,
            ..Default::default()
        }
    }

    fn blocked(reason: String) -> Self {
        Self {
            safe: false,
            reason: Some(reason),
            ..Default::default()
        }
    }
}

/// 권고 규칙. 차단 규칙에 걸리지 않은 경우에만 순서대로 검사
type AdvisoryRule = fn(&str) -> Option<SafetyVerdict>;

const ADVISORY_RULES: &[AdvisoryRule] = &[elevation_rule, system_dir_rule];

fn elevation_rule(command: &str) -> Option<SafetyVerdict> {
    ELEVATION_REGEX.is_match(command).then(|| SafetyVerdict {
        requires_elevation: true,
        warning: Some("Command requires elevated privileges".to_string()),
        ..SafetyVerdict::allowed()
    })
}

fn system_dir_rule(command: &str) -> Option<SafetyVerdict> {
    let lowered = command.to_lowercase();
    if !MUTATING_TOKENS.iter().any(|t| lowered.contains(t)) {
        return None;
    }

    SYSTEM_DIRS
        .iter()
        .find(|dir| lowered.contains(*dir))
        .map(|dir| SafetyVerdict {
            requires_caution: true,
            warning: Some(format!("Command modifies system directory: {}", dir)),
            ..SafetyVerdict::allowed()
        })
}

/// 규칙 테이블 기반 명령어 안전성 분류기
///
/// 완전한 보안 정책이 아니라 알려진 위험 패턴을 막는 최선 노력 차단 목록입니다.
pub struct SafetyClassifier;

impl SafetyClassifier {
    pub fn classify(command: &str) -> SafetyVerdict {
        if let Some(rule) = BLOCK_RULES.iter().find(|r| r.pattern.is_match(command)) {
            tracing::warn!(command, rule = rule.description, "command blocked");
            return SafetyVerdict::blocked(format!(
                "Command matches a blocked pattern: {}",
                rule.description
            ));
        }

        ADVISORY_RULES
            .iter()
            .find_map(|rule| rule(command))
            .unwrap_or_else(SafetyVerdict::allowed)
    }

    /// 명령어의 기본 동사로 작업 종류 분류 (실행 차단에는 사용하지 않음)
    pub fn classify_intent(command: &str) -> Result<CommandIntent> {
        let base = command
            .split_whitespace()
            .next()
            .ok_or(CanYouError::EmptyCommand)?;

        let category = INTENT_TABLE
            .iter()
            .find(|(_, verbs)| verbs.contains(&base))
            .map(|(category, _)| *category)
            .unwrap_or(IntentCategory::Other);

        Ok(CommandIntent {
            command: base.to_string(),
            category,
            requires_confirmation: category == IntentCategory::Destructive,
            may_require_sudo: matches!(
                category,
                IntentCategory::PackageManagement | IntentCategory::SystemManagement
            ),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentCategory {
    Destructive,
    FileOperation,
    Network,
    PackageManagement,
    SystemManagement,
    Other,
}

impl IntentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::Destructive => "destructive",
            IntentCategory::FileOperation => "file_operation",
            IntentCategory::Network => "network",
            IntentCategory::PackageManagement => "package_management",
            IntentCategory::SystemManagement => "system_management",
            IntentCategory::Other => "other",
        }
    }
}

const INTENT_TABLE: &[(IntentCategory, &[&str])] = &[
    (
        IntentCategory::Destructive,
        &["rm", "rmdir", "dd", "mkfs", "fdisk", "shred"],
    ),
    (
        IntentCategory::FileOperation,
        &["cp", "mv", "touch", "mkdir", "cat", "less", "more", "head", "tail"],
    ),
    (
        IntentCategory::Network,
        &["curl", "wget", "ping", "netstat", "ss", "nmap"],
    ),
    (
        IntentCategory::PackageManagement,
        &["apt", "yum", "dnf", "pacman", "pip", "npm"],
    ),
    (
        IntentCategory::SystemManagement,
        &["systemctl", "service", "chmod", "chown", "useradd", "usermod"],
    ),
];

/// 명령어 의도 분류 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandIntent {
    /// 기본 동사 (첫 번째 토큰)
    pub command: String,
    pub category: IntentCategory,
    pub requires_confirmation: bool,
    pub may_require_sudo: bool,
}
