//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with status, priority, and assignment information.
    tasks (id) {
        /// Store-assigned surrogate identifier.
        id -> Int4,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority level.
        #[max_length = 20]
        priority -> Varchar,
        /// Creator, immutable after creation.
        created_by -> Int4,
        /// Assignee, if any.
        assigned_to -> Nullable<Int4>,
        /// Due date, if any.
        due_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit trail of task mutations.
    task_audit_logs (id) {
        /// Store-assigned surrogate identifier.
        id -> Int4,
        /// Task the entry records a mutation of.
        task_id -> Int4,
        /// Acting user.
        user_id -> Int4,
        /// Kind of mutation.
        #[max_length = 50]
        action -> Varchar,
        /// Serialized pre-change snapshot.
        old_value -> Nullable<Text>,
        /// Serialized submitted-change snapshot.
        new_value -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Multi-assignee extension. Declared for forward compatibility; no
    /// operation in this core touches it.
    task_assignments (id) {
        /// Store-assigned surrogate identifier.
        id -> Int4,
        /// Assigned task.
        task_id -> Int4,
        /// Assigned user.
        user_id -> Int4,
        /// Assignment timestamp.
        assigned_at -> Timestamptz,
        /// User who made the assignment.
        assigned_by -> Int4,
    }
}
