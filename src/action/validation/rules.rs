//! Individual field rules.
//!
//! Each rule checks one field, records any failure in the shared
//! [`FieldErrors`] and returns the parsed value when it is usable.

use super::FieldErrors;
use crate::action::{
    config::ActionRules,
    domain::{ActionStatus, DelayCategory, ProfileId},
};
use chrono::NaiveDate;
use uuid::Uuid;

/// Message recorded for a missing required field.
pub const REQUIRED: &str = "Required";

/// Checks description length.
pub fn description(
    value: &str,
    rules: &ActionRules,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let count = value.chars().count();
    if count < rules.min_description_chars {
        errors.push(
            field,
            format!(
                "Description must be at least {} characters",
                rules.min_description_chars
            ),
        );
        return None;
    }
    if count > rules.max_description_chars {
        errors.push(
            field,
            format!(
                "Description must not exceed {} characters",
                rules.max_description_chars
            ),
        );
        return None;
    }
    Some(value.to_owned())
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn iso_date(value: &str, field: &str, errors: &mut FieldErrors) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, "Invalid date format, expected YYYY-MM-DD");
            None
        }
    }
}

/// Parses a due date that must not precede `today`.
pub fn due_date_from(
    value: &str,
    today: NaiveDate,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    let date = iso_date(value, field, errors)?;
    if date < today {
        errors.push(field, "Due date cannot be in the past");
        return None;
    }
    Some(date)
}

/// Checks notes length.
pub fn notes(
    value: &str,
    rules: &ActionRules,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    if value.chars().count() > rules.max_notes_chars {
        errors.push(
            field,
            format!(
                "Notes must not exceed {} characters",
                rules.max_notes_chars
            ),
        );
        return None;
    }
    Some(value.to_owned())
}

/// Parses a status name.
pub fn status(value: &str, field: &str, errors: &mut FieldErrors) -> Option<ActionStatus> {
    ActionStatus::try_from(value)
        .inspect_err(|_| errors.push(field, "Invalid status"))
        .ok()
}

/// Parses a profile UUID.
pub fn profile_id(value: &str, field: &str, errors: &mut FieldErrors) -> Option<ProfileId> {
    Uuid::parse_str(value.trim())
        .map(ProfileId::from_uuid)
        .inspect_err(|_| errors.push(field, "Invalid owner id"))
        .ok()
}

/// Checks delay reason length.
pub fn reason(
    value: &str,
    rules: &ActionRules,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let count = value.chars().count();
    if count < rules.min_reason_chars {
        errors.push(
            field,
            format!(
                "Reason must be at least {} characters",
                rules.min_reason_chars
            ),
        );
        return None;
    }
    if count > rules.max_reason_chars {
        errors.push(
            field,
            format!(
                "Reason must not exceed {} characters",
                rules.max_reason_chars
            ),
        );
        return None;
    }
    Some(value.to_owned())
}

/// Parses a delay category name.
pub fn category(value: &str, field: &str, errors: &mut FieldErrors) -> Option<DelayCategory> {
    DelayCategory::try_from(value)
        .inspect_err(|_| errors.push(field, "Invalid delay category"))
        .ok()
}

/// Records [`REQUIRED`] when `value` is absent.
pub fn required<'a>(
    value: Option<&'a String>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    if value.is_none() {
        errors.push(field, REQUIRED);
    }
    value.map(String::as_str)
}
