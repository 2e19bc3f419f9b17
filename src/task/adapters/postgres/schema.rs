//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with checklist and latest-completion payloads.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent asset identifier.
        asset_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Ordered checklist items.
        checklist -> Jsonb,
        /// Current assignee email, if any.
        #[max_length = 255]
        assigned_to -> Nullable<Varchar>,
        /// Task lifecycle state.
        #[max_length = 50]
        state -> Varchar,
        /// Latest completion snapshot, if any.
        last_completion -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only completion history records.
    task_history (id) {
        /// Record identifier.
        id -> Uuid,
        /// Completed task's identifier.
        task_id -> Uuid,
        /// Task name at completion time.
        #[max_length = 255]
        task_name -> Varchar,
        /// Completing worker's email.
        #[max_length = 255]
        completed_by -> Varchar,
        /// Completion timestamp.
        completed_at -> Timestamptz,
        /// Checked-off steps, in checklist order.
        checked_items -> Jsonb,
        /// Photo evidence data URL, if any.
        evidence -> Nullable<Text>,
    }
}
