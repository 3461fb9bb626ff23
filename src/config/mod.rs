use crate::error::{CanYouError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// canyou 사용자 설정
///
/// 설정 파일은 ~/.canyou/config.toml에 저장됩니다. CLI 플래그가 설정보다 우선합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 기본 AI provider (gemini, claude, codex)
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// 모든 확인을 자동 승인 (-y와 동일)
    #[serde(default)]
    pub auto_confirm: bool,

    /// RUST_LOG가 없을 때 사용할 로그 레벨
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// AI CLI 응답 대기 시간 (초)
    #[serde(default = "default_timeout")]
    pub provider_timeout_secs: u64,
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            auto_confirm: false,
            log_level: default_log_level(),
            provider_timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// 설정 디렉토리 경로
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".canyou")
    }

    /// 설정 파일 경로 가져오기
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// 기본 위치에서 로드 (없으면 기본값 사용)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// 지정한 파일에서 로드
    pub fn load_from(path: &Path) -> Result<Self> {
        // 설정 파일이 없으면 기본값 반환
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CanYouError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// 설정을 파일에 저장
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| CanYouError::ConfigError(e.to_string()))?;
        fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_provider, "gemini");
        assert!(!config.auto_confirm);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.provider_timeout_secs, 120);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_provider = \"claude\"\nprovider_timeout_secs = 30\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_provider, "claude");
        assert_eq!(config.provider_timeout_secs, 30);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_provider = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(CanYouError::ConfigError(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            default_provider: "codex".to_string(),
            auto_confirm: true,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
