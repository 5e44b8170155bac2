//! PostgreSQL-backed `BloodBankRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{BloodBankRepository, BloodBankRepositoryError};
use crate::domain::{Area, AreaFilter, BloodBank};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_unique_diesel_error,
};
use super::models::{BloodBankRow, NewBloodBankRow};
use super::pool::{DbPool, PoolError};
use super::schema::blood_banks;

/// Diesel-backed implementation of the blood-bank repository port.
#[derive(Clone)]
pub struct DieselBloodBankRepository {
    pool: DbPool,
}

impl DieselBloodBankRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BloodBankRepositoryError {
    map_basic_pool_error(error, BloodBankRepositoryError::connection)
}

fn map_write_error(error: diesel::result::Error, name: &str) -> BloodBankRepositoryError {
    map_unique_diesel_error(
        error,
        || BloodBankRepositoryError::duplicate(name),
        BloodBankRepositoryError::query,
        BloodBankRepositoryError::connection,
    )
}

fn map_read_error(error: diesel::result::Error) -> BloodBankRepositoryError {
    map_basic_diesel_error(
        error,
        BloodBankRepositoryError::query,
        BloodBankRepositoryError::connection,
    )
}

fn row_to_blood_bank(row: BloodBankRow) -> Result<BloodBank, BloodBankRepositoryError> {
    let area = Area::new(row.area).map_err(|err| {
        BloodBankRepositoryError::query(format!("corrupt blood bank row {}: {err}", row.id))
    })?;
    Ok(BloodBank {
        id: row.id,
        name: row.name,
        address: row.address,
        phone: row.phone,
        latitude: row.latitude,
        longitude: row.longitude,
        area,
    })
}

fn to_new_row(bank: &BloodBank) -> NewBloodBankRow<'_> {
    NewBloodBankRow {
        id: bank.id,
        name: bank.name.as_str(),
        address: bank.address.as_str(),
        phone: bank.phone.as_str(),
        latitude: bank.latitude,
        longitude: bank.longitude,
        area: bank.area.as_ref(),
    }
}

#[async_trait]
impl BloodBankRepository for DieselBloodBankRepository {
    async fn list(&self, area: &AreaFilter) -> Result<Vec<BloodBank>, BloodBankRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut statement = blood_banks::table.into_boxed();
        if let Some(area) = area.area() {
            statement = statement.filter(blood_banks::area.eq(area.as_ref().to_owned()));
        }

        let rows: Vec<BloodBankRow> = statement
            .order((blood_banks::name.asc(), blood_banks::id.asc()))
            .select(BloodBankRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_blood_bank).collect()
    }

    async fn exists(&self, name: &str, address: &str) -> Result<bool, BloodBankRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            blood_banks::table.filter(
                blood_banks::name
                    .eq(name)
                    .and(blood_banks::address.eq(address)),
            ),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_read_error)
    }

    async fn insert(&self, bank: &BloodBank) -> Result<(), BloodBankRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(blood_banks::table)
            .values(&to_new_row(bank))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_write_error(error, &bank.name))
    }

    async fn count(&self) -> Result<u64, BloodBankRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = blood_banks::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_read_error)?;

        u64::try_from(total)
            .map_err(|_| BloodBankRepositoryError::query(format!("negative row count {total}")))
    }

    async fn insert_all(&self, banks: &[BloodBank]) -> Result<(), BloodBankRepositoryError> {
        if banks.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewBloodBankRow<'_>> = banks.iter().map(to_new_row).collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(blood_banks::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|error| map_write_error(error, "seed batch"))
    }
}
