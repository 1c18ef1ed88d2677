//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    task (id) {
        /// Store-generated task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Completion flag.
        is_completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Timestamp of the first completion.
        completed_at -> Nullable<Timestamptz>,
    }
}
