//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Title with macros already extracted.
        title -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Status snapshot.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Nullable<Timestamptz>,
        /// Completion flag.
        is_completed -> Bool,
    }
}
