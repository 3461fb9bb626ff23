use anyhow::Context;
use clap::Parser;
use colored::*;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use canyou::ai::{factory::ProviderFactory, CliModelClient, ModelClient};
use canyou::cli::Cli;
use canyou::commands::{run_task, TaskRequest};
use canyou::config::Config;
use canyou::error::CanYouError;
use canyou::executor::{QuickTaskExecutor, TaskExecutor};
use canyou::platform;
use canyou::ui::{ConfirmPrompt, PlanPrompt};

type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

/// RUST_LOG > --debug > 설정 파일 순으로 로그 레벨 결정
///
/// 설정 파일보다 먼저 초기화합니다. 설정의 레벨을 적용할 수 있으면 핸들을 돌려줍니다.
fn init_logging(debug: bool) -> Option<LogFilterHandle> {
    let (filter, configurable) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, false),
        Err(_) if debug => (EnvFilter::new("canyou=debug"), false),
        Err(_) => (EnvFilter::new("canyou=warn"), true),
    };

    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    configurable.then_some(handle)
}

fn apply_config_log_level(handle: &LogFilterHandle, level: &str) {
    match EnvFilter::try_new(format!("canyou={}", level)) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                tracing::warn!(error = %e, "failed to apply configured log level");
            }
        }
        Err(e) => {
            tracing::warn!(configured = level, error = %e, "invalid log_level in config, keeping warn")
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let log_handle = init_logging(cli.debug);
    tracing::debug!(?cli, "starting");

    // 설정 파일이 깨져 있어도 다시 생성할 수 있도록 로드 전에 처리
    if cli.init_config {
        let path = Config::config_path();
        Config::default()
            .save_to(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{} {}", "✓ Wrote default configuration to".green(), path.display());
        return Ok(());
    }

    let config = Config::load().context("failed to load configuration")?;
    if let Some(handle) = &log_handle {
        apply_config_log_level(handle, &config.log_level);
    }
    tracing::debug!(?config, "configuration loaded");

    let provider_name = cli.provider.as_deref().unwrap_or(&config.default_provider);
    let provider = ProviderFactory::create(provider_name)?;

    let model: Arc<dyn ModelClient> = Arc::new(CliModelClient::new(
        provider,
        Duration::from_secs(config.provider_timeout_secs),
    ));
    let platform = platform::probe();
    let executor: Arc<dyn TaskExecutor> = Arc::new(QuickTaskExecutor::new(
        model.clone(),
        platform.clone(),
        Arc::new(ConfirmPrompt::new()),
    ));

    let request = TaskRequest {
        description: cli.task_text(),
        long: cli.long,
        auto_confirm: cli.yes || config.auto_confirm,
        dry_run: cli.dry_run,
    };

    let summary = run_task(&request, model, executor, Arc::new(PlanPrompt), platform).await?;
    tracing::debug!(?summary, "task finished");

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e.downcast_ref::<CanYouError>(), Some(CanYouError::UserCancelled)) {
                eprintln!("\n\n{}", "⚠️  Interrupted by user".yellow());
            } else {
                eprintln!("\n{} {:#}", "❌ Error:".red(), e);
            }
            ExitCode::FAILURE
        }
    }
}
