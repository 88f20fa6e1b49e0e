pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::Shell;
pub use crate::config::FairConfig;
pub use crate::core::{registry::FairRegistry, reports};
pub use crate::domain::model::{Assignment, Comment, Company, Rating, Stand, StandSize, Visitor};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::{FairError, Result};
