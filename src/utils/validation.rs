use crate::utils::error::{FilterError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }

    Err(FilterError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
    })
}

/// 運算子需要屬性；輸入需要運算子
pub fn validate_filter_selection(
    property: Option<u64>,
    operator: Option<&str>,
    input: &[String],
) -> Result<()> {
    if operator.is_some() && property.is_none() {
        return Err(FilterError::MissingConfigError {
            field: "property".to_string(),
        });
    }

    if !input.is_empty() && operator.is_none() {
        return Err(FilterError::MissingConfigError {
            field: "operator".to_string(),
        });
    }

    Ok(())
}
