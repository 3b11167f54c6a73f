//! Validation Utilities

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let field_errors = field_errors(&errors);
    let message = summary(&field_errors);

    AppError::Validation {
        message,
        errors: field_errors,
    }
}

/// Flattened, field-sorted list of validation failures.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors = Vec::new();
    collect_field_errors(String::new(), errors, &mut field_errors);
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// One-line description naming the first failing field.
pub fn summary(errors: &[FieldError]) -> String {
    errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into())
}

/// Flatten nested struct and list errors into dotted field paths (`tags[1].name`).
fn collect_field_errors(prefix: String, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// Rejects strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::from("must not be blank")));
    }
    Ok(())
}

/// Accepts non-blank text made of ASCII letters, digits, underscores and whitespace.
pub fn word_characters(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;

    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace());
    if !valid {
        return Err(ValidationError::new("pattern").with_message(Cow::from(
            "must contain only letters, digits, underscores and spaces",
        )));
    }
    Ok(())
}
