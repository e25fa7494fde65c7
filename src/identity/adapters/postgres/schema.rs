//! Diesel schema for user persistence.

diesel::table! {
    /// User records backing the login flow.
    users (id) {
        /// Store-assigned surrogate identifier.
        id -> Int4,
        /// External OAuth identity, unique per user.
        #[max_length = 64]
        open_id -> Varchar,
        /// Display name.
        name -> Nullable<Text>,
        /// Contact email.
        #[max_length = 320]
        email -> Nullable<Varchar>,
        /// Login method label.
        #[max_length = 64]
        login_method -> Nullable<Varchar>,
        /// Access role.
        #[max_length = 20]
        role -> Varchar,
        /// Timestamp of the latest login.
        last_signed_in -> Timestamptz,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
