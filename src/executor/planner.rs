use crate::ai::prompt_template::PromptTemplate;
use crate::ai::ModelClient;
use crate::error::{CanYouError, Result};
use crate::executor::{TaskExecutor, TaskOutcome};
use crate::platform::PlatformContext;
use crate::ui::create_spinner;
use colored::*;
use serde::Deserialize;
use std::sync::Arc;

/// 계획의 한 단계
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    /// 수행할 작업 설명
    pub description: String,
    /// 실행 전 확인할 사항
    #[serde(default)]
    pub validation: Option<String>,
    #[serde(default)]
    pub risks: Vec<String>,
}

/// 모델이 만든 실행 계획. 단계는 순서대로만 실행됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Plan {
    pub steps: Vec<Step>,
    #[serde(default)]
    pub overall_risks: Vec<String>,
    #[serde(default)]
    pub estimated_duration: Option<String>,
}

/// 응답 텍스트에서 JSON 후보를 꺼내는 전략
type ExtractStrategy = fn(&str) -> Option<&str>;

/// 순서대로 시도하며 처음으로 파싱에 성공한 결과 사용
const EXTRACT_STRATEGIES: &[(&str, ExtractStrategy)] = &[
    ("fenced json", fenced_json),
    ("fenced block", fenced_any),
    ("raw response", raw_text),
];

fn fenced_json(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("```json")?;
    let body = rest.split("```").next()?;
    Some(body.trim())
}

fn fenced_any(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("```")?;
    let body = rest.split("```").next()?;
    // ```JSON 같은 언어 태그 줄 건너뛰기
    let body = match body.split_once('\n') {
        Some((tag, content)) if !tag.contains('{') => content,
        _ => body,
    };
    Some(body.trim())
}

fn raw_text(text: &str) -> Option<&str> {
    Some(text.trim())
}

/// 모델 응답에서 계획 파싱
pub fn parse_plan(text: &str) -> Result<Plan> {
    let mut last_error = None;

    for (name, extract) in EXTRACT_STRATEGIES {
        let Some(candidate) = extract(text) else {
            continue;
        };

        match serde_json::from_str::<Plan>(candidate) {
            Ok(plan) if plan.steps.is_empty() => {
                return Err(CanYouError::PlanningError("plan contains no steps".to_string()));
            }
            Ok(plan) => {
                tracing::debug!(strategy = name, steps = plan.steps.len(), "plan parsed");
                return Ok(plan);
            }
            Err(e) => {
                tracing::debug!(strategy = name, error = %e, "plan extraction failed");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => CanYouError::JsonError(e),
        None => CanYouError::PlanningError("no plan found in response".to_string()),
    })
}

/// 계획 승인 게이트
pub trait PlanApproval: Send + Sync {
    /// true면 실행 진행
    fn approve(&self, plan: &Plan) -> Result<bool>;
}

/// Planner 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    Idle,
    Planning,
    AwaitingApproval,
    Executing,
    Completed,
    Aborted,
    PlanningFailed,
    RejectedByUser,
}

/// 계획 실행의 최종 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// `blocked_steps`는 안전성 검사로 건너뛴 단계 번호
    Completed {
        steps: usize,
        blocked_steps: Vec<usize>,
    },
    /// `step`은 1부터 시작하는 실패 단계 번호
    Aborted { step: usize, reason: String },
    PlanningFailed(String),
    RejectedByUser,
}

/// 다단계 작업 Planner
///
/// 단계마다 모델 대화를 초기화한 뒤 실행기에 위임하며, 첫 실패에서 남은 단계를 중단합니다.
/// 안전성 검사에 막힌 단계는 그 명령어만 건너뛰고 다음 단계로 넘어갑니다.
/// 이미 실행된 단계는 되돌리지 않습니다.
pub struct LongTaskPlanner {
    model: Arc<dyn ModelClient>,
    executor: Arc<dyn TaskExecutor>,
    approval: Arc<dyn PlanApproval>,
    platform: PlatformContext,
    state: PlannerState,
}

impl LongTaskPlanner {
    pub fn new(
        model: Arc<dyn ModelClient>,
        executor: Arc<dyn TaskExecutor>,
        approval: Arc<dyn PlanApproval>,
        platform: PlatformContext,
    ) -> Self {
        Self {
            model,
            executor,
            approval,
            platform,
            state: PlannerState::Idle,
        }
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    fn transition(&mut self, next: PlannerState) {
        tracing::debug!(from = ?self.state, to = ?next, "planner transition");
        self.state = next;
    }

    pub async fn execute(
        &mut self,
        task_description: &str,
        auto_confirm: bool,
        dry_run: bool,
    ) -> Result<PlanOutcome> {
        println!("\n{} {}\n", "🎯 Long Task Mode:".cyan().bold(), task_description);
        println!("{}\n", "📊 Planning phase...".cyan());

        self.transition(PlannerState::Planning);
        let plan = match self.create_plan(task_description).await {
            Some(plan) => plan,
            None => {
                self.transition(PlannerState::PlanningFailed);
                println!("{}", "❌ Failed to create a plan".red());
                return Ok(PlanOutcome::PlanningFailed(
                    "model response could not be turned into a plan".to_string(),
                ));
            }
        };

        self.display_plan(&plan);

        self.transition(PlannerState::AwaitingApproval);
        if !auto_confirm && !self.approval.approve(&plan)? {
            self.transition(PlannerState::RejectedByUser);
            println!("{}", "❌ Plan rejected by user".red());
            return Ok(PlanOutcome::RejectedByUser);
        }

        self.transition(PlannerState::Executing);
        println!("\n{}\n", "🚀 Executing plan...".cyan().bold());

        let total = plan.steps.len();
        let mut blocked_steps = Vec::new();
        for (index, step) in plan.steps.iter().enumerate() {
            let number = index + 1;
            let outcome = self.execute_step(number, total, step, auto_confirm, dry_run).await?;

            if let TaskOutcome::Blocked(reason) = &outcome {
                tracing::warn!(step = number, %reason, "step blocked, skipping");
                println!(
                    "\n{} Step {} blocked by safety check ({}). Skipping to next step.",
                    "🛑".red(),
                    number,
                    reason
                );
                blocked_steps.push(number);
                continue;
            }

            if !outcome.is_success() {
                let reason = Self::failure_reason(&outcome);
                if dry_run {
                    println!(
                        "{} Step {} would not complete ({}), continuing dry run",
                        "⚠️ ".yellow(),
                        number,
                        reason
                    );
                    continue;
                }

                self.transition(PlannerState::Aborted);
                tracing::warn!(step = number, %reason, "step failed, aborting plan");
                println!(
                    "\n{} Step {} failed: {}. Aborting remaining steps.",
                    "❌".red(),
                    number,
                    reason
                );
                return Ok(PlanOutcome::Aborted { step: number, reason });
            }

            if number < total {
                println!("\n{} Step {} completed. Moving to next step...\n", "✅".green(), number);
            }
        }

        self.transition(PlannerState::Completed);
        if blocked_steps.is_empty() {
            println!("\n{}", "✨ Long task completed!".green().bold());
        } else {
            println!(
                "\n{} (blocked steps skipped: {:?})",
                "✨ Long task completed".yellow().bold(),
                blocked_steps
            );
        }
        Ok(PlanOutcome::Completed {
            steps: total,
            blocked_steps,
        })
    }

    /// 모델에 계획 요청. 전송 실패나 파싱 실패는 None (재시도 없음)
    pub async fn create_plan(&self, task_description: &str) -> Option<Plan> {
        let prompt = PromptTemplate::build_planning_prompt(task_description, &self.platform);

        let spinner = create_spinner("Asking the model for a plan...");
        let response = self.model.chat(&prompt, true).await;
        spinner.finish_and_clear();

        let parsed = response.and_then(|r| parse_plan(r.content()));
        match parsed {
            Ok(plan) => Some(plan),
            Err(e) => {
                tracing::warn!(error = %e, "planning failed");
                println!("{} {}", "❌ Planning error:".red(), e);
                None
            }
        }
    }

    async fn execute_step(
        &self,
        number: usize,
        total: usize,
        step: &Step,
        auto_confirm: bool,
        dry_run: bool,
    ) -> Result<TaskOutcome> {
        println!("\n{}", "=".repeat(60));
        println!("Step {}/{}: {}", number, total, step.description.bold());
        println!("{}\n", "=".repeat(60));

        if let Some(validation) = &step.validation {
            println!("{} {}\n", "🔍 Validation:".cyan(), validation);
        }

        if !step.risks.is_empty() {
            println!("{}", "⚠️  Risks for this step:".yellow());
            for risk in &step.risks {
                println!("  - {}", risk);
            }
            println!();
        }

        // 단계마다 독립된 대화로 명령어 생성
        self.model.reset_conversation();

        match self
            .executor
            .execute_quick_task(&step.description, auto_confirm, dry_run)
            .await
        {
            Ok(outcome) => Ok(outcome),
            // 확인 프롬프트 중단은 계획 실패가 아니라 프로그램 종료
            Err(CanYouError::UserCancelled) => Err(CanYouError::UserCancelled),
            Err(e) => Ok(TaskOutcome::Failed(e.to_string())),
        }
    }

    fn display_plan(&self, plan: &Plan) {
        println!("{}", "📋 Execution Plan:".cyan().bold());
        for (i, step) in plan.steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step.description);
            if let Some(validation) = &step.validation {
                println!("     Validation: {}", validation.dimmed());
            }
        }

        if !plan.overall_risks.is_empty() {
            println!("\n{}", "Overall risks:".yellow());
            for risk in &plan.overall_risks {
                println!("  - {}", risk);
            }
        }

        if let Some(duration) = &plan.estimated_duration {
            println!("\n{} {}", "Estimated duration:".bold(), duration);
        }
        println!();
    }

    fn failure_reason(outcome: &TaskOutcome) -> String {
        match outcome {
            TaskOutcome::Blocked(reason) => format!("blocked ({})", reason),
            TaskOutcome::Failed(reason) => reason.clone(),
            TaskOutcome::Declined => "declined by user".to_string(),
            TaskOutcome::Executed | TaskOutcome::DryRun => String::new(),
        }
    }
}
