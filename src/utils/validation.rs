use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::dto::user_dto::{CreateUserPayload, FieldError};
use crate::models::user::NewUser;

/// Checks a decoded JSON object field by field.
///
/// A present field that is not a string is reported as that field's error;
/// the remaining fields still go through `validate_new_user`.
pub fn validate_user_body(body: &Map<String, Value>) -> Result<NewUser, Vec<FieldError>> {
    let mut type_errors = Vec::new();
    let payload = CreateUserPayload {
        name: string_field(body, "name", "Name must be a string", &mut type_errors),
        email: string_field(body, "email", "Email must be a string", &mut type_errors),
    };

    match validate_new_user(&payload) {
        Ok(user) if type_errors.is_empty() => Ok(user),
        Ok(_) => Err(type_errors),
        Err(errors) => {
            let mut merged = type_errors;
            for error in errors {
                if !merged.iter().any(|e| e.field == error.field) {
                    merged.push(error);
                }
            }
            merged.sort_by(|a, b| a.field.cmp(&b.field));
            Err(merged)
        }
    }
}

fn string_field(
    body: &Map<String, Value>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

/// Checks a create-user request without touching the store.
///
/// Every violated field is reported, ordered by field name.
pub fn validate_new_user(payload: &CreateUserPayload) -> Result<NewUser, Vec<FieldError>> {
    let payload = payload.trimmed();
    payload.validate().map_err(|e| field_errors(&e))?;

    match (payload.name, payload.email) {
        (Some(name), Some(email)) => Ok(NewUser { name, email }),
        (name, email) => {
            let mut missing = Vec::new();
            if email.is_none() {
                missing.push(FieldError::new("email", "Valid email is required"));
            }
            if name.is_none() {
                missing.push(FieldError::new("name", "Name is required"));
            }
            Err(missing)
        }
    }
}

pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("Invalid {}", field));
            FieldError::new(field.to_string(), message)
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}
