//! Submission validation.
//!
//! Validation runs before any network call; a failure blocks the submission
//! locally (taxonomy class "validation error").

use validator::Validate;

use crate::error::AppError;
use crate::form::HotelForm;

/// Validate a form for submission. Returns the first problem as
/// `InvalidInput`.
pub fn validate_submission(form: &HotelForm) -> Result<(), AppError> {
    if let Err(errors) = form.validate() {
        return Err(AppError::InvalidInput(first_message(&errors)));
    }
    if form.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Hotel name is required".to_string()));
    }
    if form.city.trim().is_empty() {
        return Err(AppError::InvalidInput("City is required".to_string()));
    }
    if form.address.trim().is_empty() {
        return Err(AppError::InvalidInput("Address is required".to_string()));
    }
    if form.star.is_none() {
        return Err(AppError::InvalidInput("Star rating is required".to_string()));
    }
    match form.base_price {
        None => {
            return Err(AppError::InvalidInput("Base price is required".to_string()));
        }
        Some(price) if price < 0.0 => {
            return Err(AppError::InvalidInput(
                "Base price must be non-negative".to_string(),
            ));
        }
        _ => {}
    }
    if form.room_types.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one room type is required".to_string(),
        ));
    }
    for (index, row) in form.room_types.iter().enumerate() {
        if row.name.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Room type {} needs a name",
                index + 1
            )));
        }
        if let Some(price) = row.price {
            if price < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "Room type {} price must be non-negative",
                    index + 1
                )));
            }
        }
    }
    Ok(())
}

/// Validate a rejection reason; blank reasons never reach the API.
pub fn validate_reject_reason(reason: &str) -> Result<String, AppError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "A rejection reason is required".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, field_errors)| field_errors.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid form input".to_string())
}
