//! Diesel schema for user role records.

diesel::table! {
    /// User records created at signup.
    users (id) {
        /// Credential-provider user identifier.
        id -> Uuid,
        /// Login email address, lowercased.
        #[max_length = 255]
        email -> Varchar,
        /// Signup role.
        #[max_length = 50]
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
