use serde_json::Value;

use crate::error::ApiError;

use super::schema::OnboardingSchema;
use super::ProfileFields;

/// Validate a raw POST body down to the `(name, value)` pairs it carries.
///
/// Runs the whole pipeline before anything touches a user record: body must
/// be JSON, `steps` must be an array, every item must be a `{name, value}`
/// object naming a schema field with a value of that field's shape. The
/// first offending item aborts the batch.
pub fn parse_submission(
    schema: &OnboardingSchema,
    body: &[u8],
) -> Result<Vec<(String, Value)>, ApiError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let items = payload
        .get("steps")
        .and_then(Value::as_array)
        .ok_or(ApiError::InvalidShape)?;

    let mut fields = Vec::with_capacity(items.len());
    for item in items {
        let (name, value) = match (item.get("name"), item.get("value")) {
            (Some(name), Some(value)) => (name, value),
            _ => return Err(ApiError::InvalidItem),
        };
        // A non-string name cannot resolve to a field either way.
        let Some(name) = name.as_str() else {
            return Err(ApiError::UnknownField(name.to_string()));
        };
        let Some(field) = schema.lookup(name) else {
            return Err(ApiError::UnknownField(name.to_string()));
        };
        if !field.kind.accepts(value) {
            return Err(ApiError::TypeMismatch {
                name: name.to_string(),
                expected: field.kind.expected(),
            });
        }
        fields.push((name.to_string(), value.clone()));
    }
    Ok(fields)
}

/// Apply an already-validated submission and mark onboarding completed.
///
/// Names the record does not expose are skipped silently. Only applied
/// after `parse_submission` accepted the full batch, so a rejected request
/// never leaves a half-mutated record behind.
pub fn apply_submission<U: ProfileFields>(user: &mut U, fields: Vec<(String, Value)>) {
    for (name, value) in fields {
        if user.has_field(&name) {
            user.set_field(&name, value);
        }
    }
    if user.has_field("completedOnboarding") {
        user.set_field("completedOnboarding", Value::Bool(true));
    }
}
