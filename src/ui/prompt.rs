use crate::error::{CanYouError, Result};
use crate::executor::planner::{Plan, PlanApproval};
use crate::executor::quick::CommandConfirmation;
use crate::executor::validator::{CommandIntent, SafetyVerdict};
use colored::*;
use dialoguer::Confirm;

/// 생성된 명령어 실행 확인
pub struct ConfirmPrompt;

impl ConfirmPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandConfirmation for ConfirmPrompt {
    fn confirm(
        &self,
        command: &str,
        verdict: &SafetyVerdict,
        intent: Option<&CommandIntent>,
    ) -> Result<bool> {
        // Output to stderr so stdout stays clean for piping
        eprintln!("\n{}", "[>] Generated command:".cyan().bold());

        let colored_command = if verdict.requires_elevation || verdict.requires_caution {
            command.yellow()
        } else if intent.map_or(false, |i| i.requires_confirmation) {
            command.red().bold()
        } else {
            command.green()
        };
        eprintln!("  {}", colored_command);

        if let Some(intent) = intent {
            eprintln!("{} {}", "Category:".bold(), intent.category.as_str());
        }

        if let Some(warning) = &verdict.warning {
            eprintln!("{} {}", "[!]".yellow().bold(), warning);
        }

        if intent.map_or(false, |i| i.may_require_sudo) && !verdict.requires_elevation {
            eprintln!("{}", "[i] This command may need elevated privileges".dimmed());
        }

        Confirm::new()
            .with_prompt("Execute this command?")
            .default(false)
            .interact()
            .map_err(|_| CanYouError::UserCancelled)
    }
}

/// 계획 승인 프롬프트
pub struct PlanPrompt;

impl PlanApproval for PlanPrompt {
    fn approve(&self, plan: &Plan) -> Result<bool> {
        Confirm::new()
            .with_prompt(format!("Proceed with this plan? ({} steps)", plan.steps.len()))
            .default(false)
            .interact()
            .map_err(|_| CanYouError::UserCancelled)
    }
}
