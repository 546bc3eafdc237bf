//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations`. Regenerate with `diesel print-schema`
//! when a migration changes a table.

diesel::table! {
    /// Principals that may log in.
    users (id) {
        id -> Int8,
        /// Lowercase login email, unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password_digest -> Varchar,
        created_at -> Timestamptz,
    }
}
