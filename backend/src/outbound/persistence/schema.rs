//! Diesel table definitions for the owners schema.
//!
//! Kept in step with `backend/migrations` by hand; the migration is the
//! source of truth.

diesel::table! {
    /// Pet owners.
    ///
    /// `name` is unique and non-blank; `age` is at least 18.
    owners (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Owner name (max 255 characters).
        name -> Varchar,
        /// Owner age in years.
        age -> Int4,
    }
}

diesel::table! {
    /// Pets, each belonging to exactly one owner.
    ///
    /// `(owner_id, name)` is unique.
    pets (id) {
        /// Primary key assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Pet name (max 255 characters).
        name -> Varchar,
        /// Owning owner.
        owner_id -> Int8,
        /// `VACCINATED` or `REQUIRES_VACCINATION`.
        health -> Varchar,
    }
}

diesel::joinable!(pets -> owners (owner_id));
diesel::allow_tables_to_appear_in_same_query!(owners, pets);
