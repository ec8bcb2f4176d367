//! Diesel row models for action persistence.

use super::schema::{actions, delay_reasons, due_date_history, profiles};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for actions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = actions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActionRow {
    /// Action identifier.
    pub id: uuid::Uuid,
    /// Description.
    pub description: String,
    /// Owning profile.
    pub owner_id: uuid::Uuid,
    /// Due date.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Notes.
    pub notes: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for actions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = actions)]
pub struct NewActionRow {
    /// Action identifier.
    pub id: uuid::Uuid,
    /// Description.
    pub description: String,
    /// Owning profile.
    pub owner_id: uuid::Uuid,
    /// Due date.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Notes.
    pub notes: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-row changeset for action updates. Cleared optionals are written as
/// `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = actions)]
#[diesel(treat_none_as_null = true)]
pub struct ActionUpdateRow {
    /// Description.
    pub description: String,
    /// Owning profile.
    pub owner_id: uuid::Uuid,
    /// Due date.
    pub due_date: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Notes.
    pub notes: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row shared by reads and inserts of due-date history.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = due_date_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Rescheduled action.
    pub action_id: uuid::Uuid,
    /// Previous due date.
    pub old_due_date: NaiveDate,
    /// New due date.
    pub new_due_date: NaiveDate,
    /// Profile that made the change.
    pub changed_by: uuid::Uuid,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row shared by reads and inserts of delay reasons.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = delay_reasons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DelayReasonRow {
    /// Reason identifier.
    pub id: uuid::Uuid,
    /// Delayed action.
    pub action_id: uuid::Uuid,
    /// Free-text explanation.
    pub reason: String,
    /// Reporting category.
    pub category: Option<String>,
    /// Recording profile.
    pub created_by: uuid::Uuid,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProfileRow {
    /// Profile identifier.
    pub id: uuid::Uuid,
    /// Sign-in email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Assigned role.
    pub role: String,
    /// Account status.
    pub status: String,
}
