//! Schema-level validation of action payloads.
//!
//! Payloads arrive loosely typed in [`payload`], individual field checks
//! live in [`rules`], and [`ActionValidator`] combines them into validated
//! inputs or a full set of [`FieldErrors`].

mod field_errors;
pub mod payload;
pub mod rules;
mod service;

pub use field_errors::FieldErrors;
pub use payload::{
    ActionsQueryPayload, CreateActionPayload, DelayReasonPayload, UpdateActionPayload,
};
pub use service::{ActionValidator, CreateActionInput, DelayReasonInput, UpdateActionInput};
