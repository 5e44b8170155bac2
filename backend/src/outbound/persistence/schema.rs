//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered donors, keyed by their normalised mobile number.
    donors (phone) {
        /// `+91` followed by ten digits.
        phone -> Varchar,
        name -> Varchar,
        area -> Varchar,
        /// One of the eight ABO/Rh labels, e.g. `AB-`.
        blood_group -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blood-bank directory. `(name, address)` is unique.
    blood_banks (id) {
        id -> Uuid,
        name -> Varchar,
        address -> Varchar,
        phone -> Varchar,
        latitude -> Float8,
        longitude -> Float8,
        area -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(donors, blood_banks);
