//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) never
//! leave this module, and every database failure is mapped onto the port's
//! error enum.
//!
//! ```ignore
//! use bloodlink::outbound::persistence::{DbPool, DieselDonorRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let donors = DieselDonorRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_blood_bank_repository;
mod diesel_donor_repository;
mod diesel_store_health;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_blood_bank_repository::DieselBloodBankRepository;
pub use diesel_donor_repository::DieselDonorRepository;
pub use diesel_store_health::DieselStoreHealth;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
