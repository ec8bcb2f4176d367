//! Structured handler result.

use crate::action::validation::FieldErrors;
use serde::Serialize;

/// Outcome of a handler call, serialised as
/// `{ data?, error?, fieldErrors?, autoBacklogged? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult<T> {
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
    /// Set on create to report whether the WIP limit applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_backlogged: Option<bool>,
}

impl<T> ActionResult<T> {
    /// Successful result carrying `data`.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            field_errors: None,
            auto_backlogged: None,
        }
    }

    /// Failed result with a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
            field_errors: None,
            auto_backlogged: None,
        }
    }

    /// Failed result for rejected fields.
    #[must_use]
    pub fn invalid(field_errors: FieldErrors) -> Self {
        Self {
            field_errors: Some(field_errors),
            ..Self::failure("Validation failed")
        }
    }

    /// Attaches the auto-backlog flag.
    #[must_use]
    pub const fn with_auto_backlogged(mut self, auto_backlogged: bool) -> Self {
        self.auto_backlogged = Some(auto_backlogged);
        self
    }

    /// Returns `true` when no error was reported.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
