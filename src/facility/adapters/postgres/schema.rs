//! Diesel schema for facility persistence.

diesel::table! {
    /// Location records owned by admin users.
    locations (id) {
        /// Location identifier.
        id -> Uuid,
        /// Owning admin's user identifier.
        owner_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Street address.
        address -> Text,
        /// Free-form description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Asset records, each under exactly one location.
    assets (id) {
        /// Asset identifier.
        id -> Uuid,
        /// Parent location identifier.
        location_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}
