pub mod dispatch;
pub mod planner;
pub mod quick;
pub mod runner;
pub mod validator;

use crate::error::Result;
use async_trait::async_trait;

// Re-exports for convenience (used in main.rs and ui module)
pub use dispatch::ShellDispatchBuilder;
pub use planner::{LongTaskPlanner, Plan, PlanOutcome, PlannerState, Step};
pub use quick::QuickTaskExecutor;
pub use validator::{CommandIntent, IntentCategory, SafetyClassifier, SafetyVerdict};

/// 단일 작업 실행 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// 명령어 실행 성공
    Executed,
    /// dry-run: 명령어만 출력
    DryRun,
    /// 사용자가 실행을 거부
    Declined,
    /// 안전성 검사에서 차단
    Blocked(String),
    /// 명령어 생성 또는 실행 실패
    Failed(String),
}

impl TaskOutcome {
    /// 명령어가 실행(또는 dry-run 출력)까지 진행되었는지
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Executed | TaskOutcome::DryRun)
    }
}

/// 자연어 작업 하나를 명령어로 바꿔 실행하는 실행기
///
/// 구현체는 `dry_run`이면 아무것도 실행하지 않고, `auto_confirm`이면 확인을 생략해야 합니다.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute_quick_task(
        &self,
        description: &str,
        auto_confirm: bool,
        dry_run: bool,
    ) -> Result<TaskOutcome>;
}
