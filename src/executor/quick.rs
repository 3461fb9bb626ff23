use crate::ai::prompt_template::PromptTemplate;
use crate::ai::response_processor::ResponseProcessor;
use crate::ai::ModelClient;
use crate::error::Result;
use crate::executor::dispatch::ShellDispatchBuilder;
use crate::executor::runner::CommandRunner;
use crate::executor::validator::{CommandIntent, SafetyClassifier, SafetyVerdict};
use crate::executor::{TaskExecutor, TaskOutcome};
use crate::platform::PlatformContext;
use crate::ui::create_spinner;
use async_trait::async_trait;
use colored::*;
use std::sync::Arc;

/// 실행 전 사용자 확인
pub trait CommandConfirmation: Send + Sync {
    fn confirm(
        &self,
        command: &str,
        verdict: &SafetyVerdict,
        intent: Option<&CommandIntent>,
    ) -> Result<bool>;
}

/// 작업 하나를 명령어로 생성 → 안전성 검사 → 확인 → 실행
pub struct QuickTaskExecutor {
    model: Arc<dyn ModelClient>,
    platform: PlatformContext,
    confirmation: Arc<dyn CommandConfirmation>,
    runner: CommandRunner,
}

impl QuickTaskExecutor {
    pub fn new(
        model: Arc<dyn ModelClient>,
        platform: PlatformContext,
        confirmation: Arc<dyn CommandConfirmation>,
    ) -> Self {
        Self {
            model,
            platform,
            confirmation,
            runner: CommandRunner::new(),
        }
    }

    /// 모델에 명령어 요청 후 한 줄로 정제
    async fn generate_command(&self, description: &str) -> Result<String> {
        let prompt = PromptTemplate::build_command_prompt(description, &self.platform);

        let spinner = create_spinner("Generating command...");
        let response = self.model.chat(&prompt, false).await;
        spinner.finish_and_clear();

        ResponseProcessor::process(response?.content())
    }
}

#[async_trait]
impl TaskExecutor for QuickTaskExecutor {
    async fn execute_quick_task(
        &self,
        description: &str,
        auto_confirm: bool,
        dry_run: bool,
    ) -> Result<TaskOutcome> {
        let command = self.generate_command(description).await?;

        let verdict = SafetyClassifier::classify(&command);
        let intent = SafetyClassifier::classify_intent(&command).ok();
        tracing::debug!(%command, ?verdict, ?intent, "command classified");

        if !verdict.safe {
            let reason = verdict.reason.clone().unwrap_or_default();
            eprintln!("\n{} {}", "[>] Generated command:".cyan().bold(), command.red());
            eprintln!("{} {}", "⛔ Blocked:".red().bold(), reason);
            return Ok(TaskOutcome::Blocked(reason));
        }

        if dry_run {
            eprintln!("\n{} {}", "[>] Generated command:".cyan().bold(), command);
            if let Some(warning) = &verdict.warning {
                eprintln!("{} {}", "⚠️ ".yellow(), warning);
            }
            println!("{}", command);
            eprintln!("{}", "(dry run: command was not executed)".dimmed());
            return Ok(TaskOutcome::DryRun);
        }

        if auto_confirm {
            eprintln!("\n{} {}", "[>] Generated command:".cyan().bold(), command);
            if let Some(warning) = &verdict.warning {
                eprintln!("{} {}", "⚠️ ".yellow(), warning);
            }
        } else if !self.confirmation.confirm(&command, &verdict, intent.as_ref())? {
            eprintln!("{}", "Skipped.".yellow());
            return Ok(TaskOutcome::Declined);
        }

        let argv = ShellDispatchBuilder::build_invocation(&command, &self.platform);
        match self.runner.execute(&argv).await {
            Ok(status) if status.success() => Ok(TaskOutcome::Executed),
            Ok(status) => Ok(TaskOutcome::Failed(format!("command exited with {}", status))),
            Err(e) => Ok(TaskOutcome::Failed(e.to_string())),
        }
    }
}
