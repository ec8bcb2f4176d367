//! Payload validator combining the field rules.

use super::{
    ActionsQueryPayload, CreateActionPayload, DelayReasonPayload, FieldErrors,
    UpdateActionPayload, rules,
};
use crate::action::{
    config::ActionRules,
    domain::{
        ActionChanges, ActionQuery, ActionStatus, ActionTab, DelayCategory, ProfileId, SortField,
        SortOrder,
    },
};
use chrono::NaiveDate;

/// Validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateActionInput {
    /// What needs doing.
    pub description: String,
    /// Due date, not before the day of validation.
    pub due_date: NaiveDate,
    /// Optional notes.
    pub notes: Option<String>,
    /// Requested owner, if any.
    pub owner_id: Option<ProfileId>,
}

/// Validated delay explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayReasonInput {
    /// Free-text explanation.
    pub reason: String,
    /// Optional category.
    pub category: Option<DelayCategory>,
}

/// Validated update request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateActionInput {
    /// Field changes to apply.
    pub changes: ActionChanges,
    /// Delay explanation; only present when the target status is delayed.
    pub delay_reason: Option<DelayReasonInput>,
}

/// Validates request payloads against [`ActionRules`].
///
/// Every field is checked so callers receive all failures at once.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use misekai::action::validation::{ActionValidator, CreateActionPayload};
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
/// let validator = ActionValidator::default();
/// let errors = validator
///     .validate_create(&CreateActionPayload::new("Test", "2024-12-31"), today)
///     .expect_err("payload should be rejected");
///
/// assert!(errors.contains("description"));
/// assert!(errors.contains("due_date"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ActionValidator {
    rules: ActionRules,
}

impl ActionValidator {
    /// Creates a validator with custom rules.
    #[must_use]
    pub const fn with_rules(rules: ActionRules) -> Self {
        Self { rules }
    }

    /// Returns the rules in force.
    #[must_use]
    pub const fn rules(&self) -> &ActionRules {
        &self.rules
    }

    /// Validates a create payload. `today` bounds the due date.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FieldErrors`] when any field is invalid.
    pub fn validate_create(
        &self,
        payload: &CreateActionPayload,
        today: NaiveDate,
    ) -> Result<CreateActionInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let description = rules::required(payload.description.as_ref(), "description", &mut errors)
            .and_then(|value| rules::description(value, &self.rules, "description", &mut errors));
        let due_date = rules::required(payload.due_date.as_ref(), "due_date", &mut errors)
            .and_then(|value| rules::due_date_from(value, today, "due_date", &mut errors));
        let notes = payload
            .notes
            .as_deref()
            .map(|value| rules::notes(value, &self.rules, "notes", &mut errors));
        let owner_id = payload
            .owner_id
            .as_deref()
            .map(|value| rules::profile_id(value, "owner_id", &mut errors));

        if !errors.is_empty() {
            return Err(errors);
        }
        match (description, due_date) {
            (Some(valid_description), Some(valid_due_date)) => Ok(CreateActionInput {
                description: valid_description,
                due_date: valid_due_date,
                notes: notes.flatten(),
                owner_id: owner_id.flatten(),
            }),
            _ => Err(errors),
        }
    }

    /// Validates an update payload.
    ///
    /// A delay reason is validated, and kept, only when the target status is
    /// `delayed`.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FieldErrors`] when any field is invalid.
    pub fn validate_update(
        &self,
        payload: &UpdateActionPayload,
    ) -> Result<UpdateActionInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let description = payload
            .description
            .as_deref()
            .and_then(|value| rules::description(value, &self.rules, "description", &mut errors));
        let due_date = payload
            .due_date
            .as_deref()
            .and_then(|value| rules::iso_date(value, "due_date", &mut errors));
        let notes = payload.notes.as_ref().map(|maybe_notes| {
            maybe_notes
                .as_deref()
                .and_then(|value| rules::notes(value, &self.rules, "notes", &mut errors))
        });
        let status = payload
            .status
            .as_deref()
            .and_then(|value| rules::status(value, "status", &mut errors));
        let owner_id = payload
            .owner_id
            .as_deref()
            .and_then(|value| rules::profile_id(value, "owner_id", &mut errors));
        let delay_reason = match (status, payload.delay_reason.as_ref()) {
            (Some(ActionStatus::Delayed), Some(reason_payload)) => {
                self.delay_reason(reason_payload, &mut errors)
            }
            _ => None,
        };

        errors.into_result(UpdateActionInput {
            changes: ActionChanges {
                description,
                due_date,
                notes,
                status,
                owner_id,
            },
            delay_reason,
        })
    }

    /// Validates a listing query.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FieldErrors`] when any parameter is invalid.
    pub fn validate_query(&self, payload: &ActionsQueryPayload) -> Result<ActionQuery, FieldErrors> {
        let mut errors = FieldErrors::new();

        let status = match payload.status.as_deref().map(str::trim) {
            None | Some("all") => None,
            Some(value) => ActionStatus::try_from(value)
                .inspect_err(|_| errors.push("status", "Invalid status filter"))
                .ok(),
        };
        let tab = payload.tab.as_deref().and_then(|value| {
            ActionTab::try_from(value)
                .inspect_err(|_| errors.push("tab", "Invalid tab"))
                .ok()
        });
        let sort_by = payload.sort_by.as_deref().map_or(Some(SortField::default()), |value| {
            SortField::try_from(value)
                .inspect_err(|_| errors.push("sortBy", "Invalid sort field"))
                .ok()
        });
        let sort_order = payload
            .sort_order
            .as_deref()
            .map_or(Some(SortOrder::default()), |value| {
                SortOrder::try_from(value)
                    .inspect_err(|_| errors.push("sortOrder", "Invalid sort order"))
                    .ok()
            });
        let page = parse_page(payload.page, &mut errors);
        let limit = self.limit(payload.limit, &mut errors);
        let owner = payload
            .owner_id
            .as_deref()
            .and_then(|value| rules::profile_id(value, "ownerId", &mut errors));

        if !errors.is_empty() {
            return Err(errors);
        }
        match (sort_by, sort_order, page, limit) {
            (Some(field), Some(order), Some(page_number), Some(page_size)) => Ok(ActionQuery::new()
                .with_status(status)
                .with_tab(tab)
                .with_owner(owner)
                .sorted_by(field, order)
                .paged(page_number, page_size)),
            _ => Err(errors),
        }
    }

    fn delay_reason(
        &self,
        payload: &DelayReasonPayload,
        errors: &mut FieldErrors,
    ) -> Option<DelayReasonInput> {
        let reason = rules::required(payload.reason.as_ref(), "delayReason.reason", errors)
            .and_then(|value| rules::reason(value, &self.rules, "delayReason.reason", errors));
        let category = match payload.category.as_deref() {
            None => Some(None),
            Some(value) => rules::category(value, "delayReason.category", errors).map(Some),
        };
        Some(DelayReasonInput {
            reason: reason?,
            category: category?,
        })
    }

    fn limit(&self, requested: Option<i64>, errors: &mut FieldErrors) -> Option<u32> {
        match requested {
            None => Some(self.rules.default_page_limit),
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|limit| (1..=self.rules.max_page_limit).contains(limit))
                .or_else(|| {
                    errors.push(
                        "limit",
                        format!(
                            "Limit must be between 1 and {}",
                            self.rules.max_page_limit
                        ),
                    );
                    None
                }),
        }
    }
}

fn parse_page(requested: Option<i64>, errors: &mut FieldErrors) -> Option<u32> {
    match requested {
        None => Some(1),
        Some(value) => u32::try_from(value)
            .ok()
            .filter(|page| *page >= 1)
            .or_else(|| {
                errors.push("page", "Page must be a positive integer");
                None
            }),
    }
}
