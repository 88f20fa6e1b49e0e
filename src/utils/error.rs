use std::fmt;
use thiserror::Error;

/// Kind of record a natural key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Company,
    Stand,
    Visitor,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Company => write!(f, "company"),
            Entity::Stand => write!(f, "stand"),
            Entity::Visitor => write!(f, "visitor"),
        }
    }
}

#[derive(Error, Debug)]
pub enum FairError {
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("A {entity} with key '{key}' already exists")]
    DuplicateKey { entity: Entity, key: String },

    #[error("No {entity} found for '{key}'")]
    NotFound { entity: Entity, key: String },

    #[error("Stand {stand} is already assigned to {company}")]
    Conflict { stand: String, company: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Lookup,
    State,
    System,
}

impl FairError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FairError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: Entity, key: &str) -> Self {
        FairError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: Entity, key: &str) -> Self {
        FairError::DuplicateKey {
            entity,
            key: key.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FairError::InvalidArgument { .. } | FairError::Config { .. } => {
                ErrorCategory::Validation
            }
            FairError::NotFound { .. } => ErrorCategory::Lookup,
            FairError::DuplicateKey { .. } | FairError::Conflict { .. } => ErrorCategory::State,
            FairError::Io(_) | FairError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FairError::InvalidArgument { .. } => "Check the value and try again",
            FairError::DuplicateKey { .. } => "Pick a different name, number or id",
            FairError::NotFound { .. } => "List the registered records to find the right key",
            FairError::Conflict { .. } => "Unassign the stand first or choose an available one",
            FairError::Io(_) => "Check file permissions and that the path exists",
            FairError::Serialization(_) => "Report output could not be encoded",
            FairError::Config { .. } => "Fix the configuration file and restart",
        }
    }
}

pub type Result<T> = std::result::Result<T, FairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_entity() {
        let err = FairError::not_found(Entity::Stand, "A1");
        assert_eq!(err.to_string(), "No stand found for 'A1'");

        let err = FairError::duplicate(Entity::Visitor, "v1");
        assert_eq!(err.to_string(), "A visitor with key 'v1' already exists");
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            FairError::invalid("rating", "out of range").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            FairError::Conflict {
                stand: "A1".into(),
                company: "Acme".into()
            }
            .category(),
            ErrorCategory::State
        );
        assert_eq!(
            FairError::not_found(Entity::Company, "x").category(),
            ErrorCategory::Lookup
        );
    }
}
