//! Renders the configured templates into per-locale HTML pages.

use std::process::ExitCode;

use clap::Parser;
use locale_html::cli::CliArgs;
use locale_html::config::TaskConfig;
use locale_html::pipeline::{
    Pipeline,
    PipelineError,
    RunReport,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_directive())),
        )
        .with_target(false)
        .init();

    match run(&args) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(args: &CliArgs) -> Result<RunReport, PipelineError> {
    let mut config = TaskConfig::load(&args.config)?;
    let settings = args.apply_overrides(config.settings().clone());
    config.update_settings(settings)?;

    let report = Pipeline::new(config).run()?;
    for failure in &report.failures {
        tracing::debug!(path = %failure.path.display(), reason = %failure.reason, "Skipped");
    }
    Ok(report)
}
