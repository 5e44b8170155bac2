//! Startup wiring for blood-bank seeding.

mod config;
mod startup;

pub use config::BloodBankSeedSettings;
pub use startup::{SeedOutcome, StartupSeedingError, load_seed_file, seed_blood_banks_on_startup};
