//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{blood_banks, donors};

/// Row struct for reading from the donors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonorRow {
    pub phone: String,
    pub name: String,
    pub area: String,
    pub blood_group: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating donor records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = donors)]
pub(crate) struct NewDonorRow<'a> {
    pub phone: &'a str,
    pub name: &'a str,
    pub area: &'a str,
    pub blood_group: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the blood_banks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = blood_banks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BloodBankRow {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub area: String,
}

/// Insertable struct for creating blood-bank records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = blood_banks)]
pub(crate) struct NewBloodBankRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub area: &'a str,
}
