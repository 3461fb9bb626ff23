use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "canyou")]
#[command(version)]
#[command(about = "AI-powered shell command helper: describe a task, get safety-checked commands")]
#[command(after_help = "Examples:\n  \
    canyou find all pdf files in current directory\n  \
    canyou -l set up a python web server with nginx\n  \
    canyou --dry-run show disk usage for home directory\n  \
    canyou -y compress all log files older than 30 days")]
pub struct Cli {
    /// 하고 싶은 작업 (자연어)
    #[arg(required_unless_present = "init_config")]
    pub task: Vec<String>,

    /// 다단계 계획 모드 (복잡한 작업용)
    #[arg(short = 'l', long)]
    pub long: bool,

    /// 확인 없이 바로 실행 (위험)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// 명령어만 출력하고 실행하지 않음
    #[arg(long)]
    pub dry_run: bool,

    /// AI 제공자 선택 (gemini, claude, codex). 미지정시 설정 파일의 default_provider 사용
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// 디버그 로그 출력
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// 기본 설정 파일 생성 (~/.canyou/config.toml)
    #[arg(long)]
    pub init_config: bool,
}

impl Cli {
    pub fn task_text(&self) -> String {
        self.task.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_words_joined() {
        let cli = Cli::parse_from(["canyou", "find", "all", "pdf", "files"]);
        assert_eq!(cli.task_text(), "find all pdf files");
        assert!(!cli.long);
        assert!(!cli.yes);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["canyou", "-l", "-y", "--dry-run", "-p", "claude", "set", "up", "nginx"]);
        assert!(cli.long);
        assert!(cli.yes);
        assert!(cli.dry_run);
        assert_eq!(cli.provider.as_deref(), Some("claude"));
        assert_eq!(cli.task_text(), "set up nginx");
    }

    #[test]
    fn test_task_required() {
        assert!(Cli::try_parse_from(["canyou"]).is_err());
        assert!(Cli::try_parse_from(["canyou", "--init-config"]).is_ok());
    }
}
