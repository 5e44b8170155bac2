//! PostgreSQL-backed `DonorRepository` implementation using Diesel ORM.
//!
//! Rows are rebuilt through the validated domain constructors, so a donor
//! that was written by hand with a malformed phone or blood group surfaces as
//! a query error instead of leaking into alert dispatch.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DonorQuery, DonorRepository, DonorRepositoryError};
use crate::domain::{Area, BloodGroup, Donor, DonorName, PhoneNumber};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_unique_diesel_error,
};
use super::models::{DonorRow, NewDonorRow};
use super::pool::{DbPool, PoolError};
use super::schema::donors;

/// Diesel-backed implementation of the donor repository port.
#[derive(Clone)]
pub struct DieselDonorRepository {
    pool: DbPool,
}

impl DieselDonorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DonorRepositoryError {
    map_basic_pool_error(error, DonorRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DonorRepositoryError {
    map_basic_diesel_error(
        error,
        DonorRepositoryError::query,
        DonorRepositoryError::connection,
    )
}

fn row_to_donor(row: DonorRow) -> Result<Donor, DonorRepositoryError> {
    let DonorRow {
        phone,
        name,
        area,
        blood_group,
        created_at,
    } = row;

    let corrupt = |err: &dyn std::fmt::Display| {
        DonorRepositoryError::query(format!("corrupt donor row {phone}: {err}"))
    };
    let name = DonorName::new(name).map_err(|err| corrupt(&err))?;
    let area = Area::new(area).map_err(|err| corrupt(&err))?;
    let blood_group = blood_group
        .parse::<BloodGroup>()
        .map_err(|err| corrupt(&err))?;
    let phone = PhoneNumber::new(phone.clone()).map_err(|err| corrupt(&err))?;

    Ok(Donor {
        name,
        area,
        phone,
        blood_group,
        created_at,
    })
}

#[async_trait]
impl DonorRepository for DieselDonorRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Donor>, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = donors::table
            .filter(donors::phone.eq(phone.as_ref()))
            .select(DonorRow::as_select())
            .first::<DonorRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_donor).transpose()
    }

    async fn insert(&self, donor: &Donor) -> Result<(), DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewDonorRow {
            phone: donor.phone.as_ref(),
            name: donor.name.as_ref(),
            area: donor.area.as_ref(),
            blood_group: donor.blood_group.as_str(),
            created_at: donor.created_at,
        };

        diesel::insert_into(donors::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                map_unique_diesel_error(
                    error,
                    || DonorRepositoryError::duplicate_phone(donor.phone.as_ref()),
                    DonorRepositoryError::query,
                    DonorRepositoryError::connection,
                )
            })
    }

    async fn list(&self, query: &DonorQuery) -> Result<Vec<Donor>, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = donors::table.into_boxed();
        if let Some(area) = query.area.area() {
            statement = statement.filter(donors::area.eq(area.as_ref().to_owned()));
        }
        if let Some(group) = query.blood_group.group() {
            statement = statement.filter(donors::blood_group.eq(group.as_str()));
        }

        let rows: Vec<DonorRow> = statement
            .order((donors::created_at.desc(), donors::phone.asc()))
            .select(DonorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_donor).collect()
    }

    async fn delete(&self, phone: &PhoneNumber) -> Result<bool, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(donors::table.filter(donors::phone.eq(phone.as_ref())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
