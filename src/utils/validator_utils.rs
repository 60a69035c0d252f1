use validator::ValidationError;

use crate::utils::app_error::{AppError, AppResult};

/// Width of the `name` columns of `posts` and `tags`.
pub const MAX_NAME_LENGTH: usize = 255;

pub fn validate_required(value: &String) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("is_required");
        error.message = Some(std::borrow::Cow::from("This field is required"));
        Err(error)
    } else {
        Ok(())
    }
}

/// Length limit applied to the value as it will be stored, i.e. trimmed.
pub fn validate_name_length(value: &String) -> Result<(), ValidationError> {
    if exceeds_name_length(value) {
        let mut error = ValidationError::new("length");
        error.message = Some(std::borrow::Cow::from(format!(
            "Must be at most {MAX_NAME_LENGTH} characters"
        )));
        Err(error)
    } else {
        Ok(())
    }
}

pub fn exceeds_name_length(value: &str) -> bool {
    value.trim().chars().count() > MAX_NAME_LENGTH
}

/// Parses a path identifier; only positive integers name a row.
pub fn parse_id(raw: &str) -> AppResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidId(format!("Invalid id: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert!(validate_required(&"  \n".to_string()).is_err());
        assert!(validate_required(&" hello ".to_string()).is_ok());
    }

    #[test]
    fn name_length_counts_trimmed_characters() {
        let padded = format!("{}x", " ".repeat(300));
        assert!(validate_name_length(&padded).is_ok());
        assert!(validate_name_length(&"é".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_name_length(&"a".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn parse_id_accepts_positive_integers_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        for bad in ["0", "-1", "abc", "", "1.5", "99999999999"] {
            assert!(matches!(parse_id(bad), Err(AppError::InvalidId(_))), "{bad}");
        }
    }
}
