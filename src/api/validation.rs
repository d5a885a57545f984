use time::macros::format_description;
use time::Date;

use crate::api::errors::ApiError;
use crate::services::accounts::{self, MIN_PASSWORD_LEN};

pub(crate) fn validate_password_len(password: &str) -> Result<(), ApiError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )))
    }
}

pub(crate) fn validate_username(username: &str) -> Result<&str, ApiError> {
    accounts::normalize_username(username).map_err(ApiError::from)
}

/// `YYYY-YYYY` with consecutive years, e.g. `2024-2025`.
pub(crate) fn validate_academic_year(value: &str) -> Result<(), ApiError> {
    let invalid = || {
        ApiError::BadRequest(format!(
            "Invalid academic year '{value}', expected consecutive years like 2024-2025"
        ))
    };

    let (start, end) = value.split_once('-').ok_or_else(invalid)?;
    let is_year = |part: &str| part.len() == 4 && part.chars().all(|c| c.is_ascii_digit());
    if !is_year(start) || !is_year(end) {
        return Err(invalid());
    }

    let start: u16 = start.parse().map_err(|_| invalid())?;
    let end: u16 = end.parse().map_err(|_| invalid())?;
    if end == start + 1 {
        Ok(())
    } else {
        Err(invalid())
    }
}

pub(crate) fn parse_date(value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::BadRequest(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}
