use crate::roster::{PreferenceRow, SectionRoster};
use std::fmt;

pub(crate) const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct RosterValidationError {
    message: String,
}

impl RosterValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RosterValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RosterValidationError {}

/// Fast-fail checks on a single input row, before it reaches the engine.
pub fn validate_row(row: &PreferenceRow) -> Result<(), RosterValidationError> {
    if row.employee_id.trim().is_empty() {
        return Err(RosterValidationError::new("row has empty employee id"));
    }
    if row.section.trim().is_empty() {
        return Err(RosterValidationError::new(format!(
            "employee {} has empty section name",
            row.employee_id
        )));
    }
    if row.activity.trim().is_empty() {
        return Err(RosterValidationError::new(format!(
            "employee {} in section {} has empty activity name",
            row.employee_id, row.section
        )));
    }
    if !row.weight.is_finite() {
        return Err(RosterValidationError::new(format!(
            "employee {} has non-finite weight for activity {}",
            row.employee_id, row.activity
        )));
    }
    if row.weight < -WEIGHT_EPSILON {
        return Err(RosterValidationError::new(format!(
            "employee {} has negative weight {} for activity {}",
            row.employee_id, row.weight, row.activity
        )));
    }
    Ok(())
}

/// A section must carry at least one employee and one activity before any
/// quota or score computation runs.
pub fn validate_section(section: &SectionRoster) -> Result<(), RosterValidationError> {
    if section.employees.is_empty() {
        return Err(RosterValidationError::new(format!(
            "section {} has no employees",
            section.name
        )));
    }
    if section.activities.is_empty() {
        return Err(RosterValidationError::new(format!(
            "section {} has no activities",
            section.name
        )));
    }
    Ok(())
}
