pub mod registry;
pub mod reports;

pub use crate::domain::model::{Comment, Company, Stand, StandSize, Visitor};
pub use crate::domain::ports::{Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
pub use registry::FairRegistry;
