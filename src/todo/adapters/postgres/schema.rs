//! Diesel schema for todo item persistence.

diesel::table! {
    /// Todo item records.
    todo_items (id) {
        /// Store-assigned item identifier.
        id -> Int8,
        /// Item description.
        description -> Text,
        /// Item lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Due timestamp.
        due_at -> Timestamptz,
        /// Completion timestamp, set only while done.
        done_at -> Nullable<Timestamptz>,
    }
}
