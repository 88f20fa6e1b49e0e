use crate::utils::error::{FairError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Returns the trimmed value, rejecting empty or whitespace-only input.
pub fn require_non_blank(field_name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FairError::invalid(
            field_name,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(trimmed.to_string())
}

/// Inclusive range check.
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FairError::invalid(
            field_name,
            format!("{} is not between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FairError::Config {
            field: field_name.to_string(),
            message: "path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FairError::Config {
            field: field_name.to_string(),
            message: "path contains null bytes".to_string(),
        });
    }

    Ok(())
}
