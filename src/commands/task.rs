use crate::ai::ModelClient;
use crate::error::Result;
use crate::executor::planner::{LongTaskPlanner, PlanApproval, PlanOutcome};
use crate::executor::{TaskExecutor, TaskOutcome};
use crate::platform::PlatformContext;
use colored::*;
use std::sync::Arc;

/// CLI에서 넘어온 작업 요청
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub description: String,
    /// 다단계 계획 모드
    pub long: bool,
    pub auto_confirm: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunSummary {
    Quick(TaskOutcome),
    Planned(PlanOutcome),
}

/// 요청 모드에 따라 단일 실행기 또는 Planner로 분기
pub async fn run_task(
    request: &TaskRequest,
    model: Arc<dyn ModelClient>,
    executor: Arc<dyn TaskExecutor>,
    approval: Arc<dyn PlanApproval>,
    platform: PlatformContext,
) -> Result<RunSummary> {
    tracing::info!(long = request.long, dry_run = request.dry_run, "running task");

    if request.long {
        let mut planner = LongTaskPlanner::new(model, executor, approval, platform);
        let outcome = planner
            .execute(&request.description, request.auto_confirm, request.dry_run)
            .await?;
        return Ok(RunSummary::Planned(outcome));
    }

    eprintln!("{} {}", "🔍 Task:".cyan(), request.description);
    let outcome = executor
        .execute_quick_task(&request.description, request.auto_confirm, request.dry_run)
        .await?;
    Ok(RunSummary::Quick(outcome))
}
