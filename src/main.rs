use anyhow::Context;
use clap::Parser;
use fair_registry::config::{Command, ReportKind};
use fair_registry::utils::{logger, validation::Validate};
use fair_registry::{reports, CliConfig, FairConfig, FairRegistry, Shell};
use serde::Serialize;
use std::fmt::Display;
use std::io;

fn render<T: Serialize + Display>(report: &T, json: bool) -> fair_registry::Result<String> {
    if json {
        reports::to_json(report)
    } else {
        Ok(report.to_string())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if let Err(e) = cli.validate() {
        eprintln!("❌ {}", e);
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let file_config = match &cli.config {
        Some(path) => {
            let config = FairConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            if let Err(e) = config.validate() {
                eprintln!("❌ {}", e);
                eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
                std::process::exit(1);
            }
            Some(config)
        }
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose_logging());
    let format = match &file_config {
        Some(c) => c.log_format()?,
        None => logger::LogFormat::default(),
    };
    logger::init_cli_logger(verbose, format);

    let mut registry = FairRegistry::new();
    if let Some(config) = &file_config {
        tracing::info!("Loading fair '{}'", config.fair.name);
        config
            .seed_registry(&mut registry)
            .context("failed to seed registry from config")?;
    }

    match cli.command() {
        Command::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(registry, stdin.lock(), io::stdout());
            shell.run()?;
        }
        Command::Report { kind, json } => {
            let text = match kind {
                ReportKind::Companies => render(&reports::companies_and_stands(&registry), json)?,
                ReportKind::Visits => render(&reports::visitors_and_visits(&registry), json)?,
                ReportKind::Ratings => render(&reports::ratings_by_stand(&registry), json)?,
            };
            println!("{}", text);
        }
    }

    Ok(())
}
