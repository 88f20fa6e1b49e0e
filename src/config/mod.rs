pub mod toml_config;

pub use toml_config::FairConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ReportKind};

#[cfg(feature = "cli")]
mod cli {
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "fair-registry")]
    #[command(about = "Business fair registry: companies, stands, visitors and ratings")]
    pub struct CliConfig {
        /// Path to a TOML configuration file (fair name, logging, seed data)
        #[arg(short, long)]
        pub config: Option<String>,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Interactive console menu (default)
        Shell,
        /// Print one report over the seeded registry and exit
        Report {
            #[arg(value_enum)]
            kind: ReportKind,

            /// Emit JSON instead of text
            #[arg(long)]
            json: bool,
        },
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum ReportKind {
        Companies,
        Visits,
        Ratings,
    }

    impl CliConfig {
        pub fn command(&self) -> Command {
            self.command.clone().unwrap_or(Command::Shell)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(path) = &self.config {
                validate_path("config", path)?;
            }
            Ok(())
        }
    }

}
