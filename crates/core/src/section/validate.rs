/// Validation for section keys and registry payloads.
use std::collections::HashSet;

use thiserror::Error;

use super::model::{NewSectionEntry, ReorderRequest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("section key cannot be empty")]
    EmptyKey,
    #[error("section key may only contain lowercase letters, digits and '-'")]
    InvalidKey,
    #[error("section name cannot be empty")]
    EmptyName,
    #[error("reorder payload cannot be empty")]
    EmptyReorder,
    #[error("reorder payload contains duplicate section ids")]
    DuplicateReorderIds,
}

/// Section keys are slugs: `hero`, `features-block`, ...
pub fn validate_section_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey);
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidKey);
    }
    Ok(())
}

pub fn validate_new_entry(entry: &NewSectionEntry) -> Result<(), ValidationError> {
    validate_section_key(&entry.key)?;
    if entry.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

pub fn validate_reorder(request: &ReorderRequest) -> Result<(), ValidationError> {
    if request.new_order.is_empty() {
        return Err(ValidationError::EmptyReorder);
    }
    let mut seen = HashSet::new();
    for item in &request.new_order {
        if !seen.insert(item.id) {
            return Err(ValidationError::DuplicateReorderIds);
        }
    }
    Ok(())
}
