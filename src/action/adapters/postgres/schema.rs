//! Diesel schema for action lifecycle persistence.

diesel::table! {
    /// Actions tracked on the board.
    actions (id) {
        /// Action identifier.
        id -> Uuid,
        /// What needs to be done.
        description -> Text,
        /// Owning profile.
        owner_id -> Uuid,
        /// Target completion date.
        due_date -> Date,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional free-text notes.
        notes -> Nullable<Text>,
        /// Set while the status is `complete`.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only delay reasons.
    delay_reasons (id) {
        /// Reason identifier.
        id -> Uuid,
        /// Delayed action.
        action_id -> Uuid,
        /// Free-text explanation.
        reason -> Text,
        /// Optional reporting category.
        #[max_length = 20]
        category -> Nullable<Varchar>,
        /// Profile that recorded the reason.
        created_by -> Uuid,
        /// Recording timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only due-date change log.
    due_date_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Rescheduled action.
        action_id -> Uuid,
        /// Previous due date.
        old_due_date -> Date,
        /// New due date.
        new_due_date -> Date,
        /// Profile that made the change.
        changed_by -> Uuid,
        /// Recording timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Team member profiles.
    profiles (id) {
        /// Profile identifier.
        id -> Uuid,
        /// Sign-in email.
        #[max_length = 255]
        email -> Varchar,
        /// Display name.
        #[max_length = 255]
        full_name -> Nullable<Varchar>,
        /// Assigned role.
        #[max_length = 20]
        role -> Varchar,
        /// Account status.
        #[max_length = 20]
        status -> Varchar,
    }
}
