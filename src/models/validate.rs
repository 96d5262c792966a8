use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use super::ModelError;

pub use validator::Validate;

/// Handles are stored lowercase with no spaces
pub fn lowercase_handle(handle: &str) -> Result<(), ValidationError> {
    if handle.chars().any(|c| c.is_uppercase() || c.is_whitespace()) {
        return Err(ValidationError::new("lowercase"));
    }
    Ok(())
}

pub fn http_url(value: &str) -> Result<(), ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::new("http_url"))
    }
}

/// Equity is a fraction of the company: 0 <= value <= 1
pub fn fraction(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE {
        return Err(ValidationError::new("fraction"));
    }
    Ok(())
}

/// One line per failed rule, grouped by field name
fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out: Vec<String> = Vec::new();
    for (field, errs) in fields {
        for err in errs.iter() {
            let message = match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            };
            // url and http_url share one message
            if !out.contains(&message) {
                out.push(message);
            }
        }
    }
    out
}

impl From<ValidationErrors> for ModelError {
    fn from(errors: ValidationErrors) -> Self {
        ModelError::InvalidInput(messages(&errors).join(", "))
    }
}
