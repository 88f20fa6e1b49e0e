use crate::core::registry::FairRegistry;
use crate::domain::model::{Company, StandSize, Visitor};
use crate::domain::ports::Clock;
use crate::utils::error::{FairError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{require_non_blank, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairConfig {
    pub fair: FairSection,
    pub logging: Option<LoggingConfig>,
    pub seed: Option<SeedConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairSection {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

/// Records loaded into the registry at start-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub companies: Vec<CompanySeed>,
    #[serde(default)]
    pub stands: Vec<StandSeed>,
    #[serde(default)]
    pub visitors: Vec<VisitorSeed>,
    #[serde(default)]
    pub assignments: Vec<AssignmentSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySeed {
    pub name: String,
    pub sector: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandSeed {
    pub number: String,
    pub location: String,
    pub size: StandSize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorSeed {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentSeed {
    pub stand: String,
    pub company: String,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl FairConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| FairError::Config {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        let format = self.logging.as_ref().and_then(|l| l.format.as_deref());
        match format.map(str::to_lowercase).as_deref() {
            None | Some("compact") => Ok(LogFormat::Compact),
            Some("json") => Ok(LogFormat::Json),
            Some(other) => Err(FairError::Config {
                field: "logging.format".to_string(),
                message: format!("unsupported format '{}', expected compact or json", other),
            }),
        }
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .is_some_and(|level| level.eq_ignore_ascii_case("debug"))
    }

    /// Replays the seed through the public registry operations, so every
    /// uniqueness and reference rule applies. Stops at the first failure.
    pub fn seed_registry<C: Clock>(&self, registry: &mut FairRegistry<C>) -> Result<()> {
        let Some(seed) = &self.seed else {
            return Ok(());
        };

        for c in &seed.companies {
            registry.register_company(Company::new(&c.name, &c.sector, &c.email)?)?;
        }
        for s in &seed.stands {
            registry.create_stand(&s.number, &s.location, s.size)?;
        }
        for v in &seed.visitors {
            registry.register_visitor(Visitor::new(&v.id, &v.name, &v.email)?)?;
        }
        for a in &seed.assignments {
            registry.assign_stand(&a.stand, &a.company)?;
        }

        tracing::info!(
            "Seeded {} companies, {} stands, {} visitors, {} assignments",
            seed.companies.len(),
            seed.stands.len(),
            seed.visitors.len(),
            seed.assignments.len()
        );
        Ok(())
    }
}

impl Validate for FairConfig {
    fn validate(&self) -> Result<()> {
        require_non_blank("fair.name", &self.fair.name).map_err(|_| FairError::Config {
            field: "fair.name".to_string(),
            message: "fair name cannot be blank".to_string(),
        })?;
        self.log_format()?;
        Ok(())
    }
}
