//! Table payload validation.

use super::{TablePayload, ValidatedTable, ValidationError};

/// Checks a table payload.
///
/// The name must be longer than one character and the capacity a positive
/// integer.
///
/// # Errors
///
/// Returns [`ValidationError::MissingData`] for an absent payload, otherwise
/// [`ValidationError::MissingField`] naming `table_name` or `capacity`.
pub fn validate_table_fields(
    payload: Option<&TablePayload>,
) -> Result<ValidatedTable, ValidationError> {
    let payload = payload.ok_or(ValidationError::MissingData)?;

    let name = payload
        .table_name
        .as_deref()
        .filter(|name| name.chars().count() > 1)
        .ok_or(ValidationError::MissingField {
            field: "table_name",
        })?;

    let capacity = payload
        .capacity
        .filter(|c| *c > 0)
        .and_then(|c| u32::try_from(c).ok())
        .ok_or(ValidationError::MissingField { field: "capacity" })?;

    Ok(ValidatedTable {
        name: name.to_string(),
        capacity,
    })
}
