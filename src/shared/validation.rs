//! Validation Utilities

use validator::{Validate, ValidationErrors};

use super::error::{AppError, FieldError};

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    if field_errors.is_empty() {
        return AppError::Validation("Validation failed".into());
    }
    AppError::InvalidFields(field_errors)
}

/// Run `validator` rules on a request body.
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(validation_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Signup {
        #[validate(email(message = "Invalid email format"))]
        email: String,

        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn test_validate_reports_field_and_message() {
        let err = validate(&Signup {
            email: "nope".into(),
            name: "Ada".into(),
        })
        .unwrap_err();

        match err {
            AppError::InvalidFields(fields) => assert_eq!(
                fields,
                vec![FieldError {
                    field: "email".into(),
                    message: "Invalid email format".into(),
                }]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_reports_every_failing_field() {
        let err = validate(&Signup {
            email: "nope".into(),
            name: String::new(),
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Validation error: email: Invalid email format; name: Name is required"
        );
        match err {
            AppError::InvalidFields(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["email", "name"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_valid_value() {
        assert!(validate(&Signup {
            email: "a@x.com".into(),
            name: "Ada".into(),
        })
        .is_ok());
    }
}
