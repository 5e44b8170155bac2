//! Startup seeding orchestration.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::BloodBankRepository;
use crate::domain::{
    Area, BloodBankService, BloodBankValidationError, Coordinates, EmptyAreaError, NewBloodBank,
};
use crate::seeding::config::{BUNDLED_SEED, BloodBankSeedSettings};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed file could not be read.
    #[error("failed to read seed file at {path}: {source}")]
    SeedRead {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a JSON list of blood banks.
    #[error("seed file parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// An entry failed validation.
    #[error("seed entry {index} is invalid: {source}")]
    InvalidEntry {
        /// Zero-based position in the seed list.
        index: usize,
        #[source]
        source: BloodBankValidationError,
    },
    /// An entry has a blank area.
    #[error("seed entry {index} is invalid: {source}")]
    BlankArea {
        /// Zero-based position in the seed list.
        index: usize,
        #[source]
        source: EmptyAreaError,
    },
    /// Counting or inserting failed.
    #[error("blood bank seeding error: {0}")]
    Seeding(#[from] crate::domain::Error),
}

/// Result of a startup seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seeding is switched off.
    Disabled,
    /// The store already held blood banks.
    AlreadyPopulated,
    /// The store was empty and `count` banks were written.
    Seeded { count: usize },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedEntry {
    name: String,
    address: String,
    phone: String,
    lat: f64,
    lng: f64,
    area: String,
}

impl SeedEntry {
    fn into_new_blood_bank(self, index: usize) -> Result<NewBloodBank, StartupSeedingError> {
        let invalid = |source| StartupSeedingError::InvalidEntry { index, source };
        let coordinates = Coordinates::new(self.lat, self.lng).map_err(invalid)?;
        let area = Area::new(self.area)
            .map_err(|source| StartupSeedingError::BlankArea { index, source })?;
        NewBloodBank::new(self.name, self.address, self.phone, coordinates, area).map_err(invalid)
    }
}

/// Seed the blood-bank store on startup when enabled and empty.
///
/// Without a `registry_path` override the list compiled into the binary is
/// used, so a deployed binary seeds without access to its source tree.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use bloodlink::domain::BloodBankService;
/// use bloodlink::outbound::persistence::{DbPool, DieselBloodBankRepository};
/// use bloodlink::seeding::{BloodBankSeedSettings, seed_blood_banks_on_startup};
///
/// # async fn run(pool: DbPool) -> Result<(), Box<dyn std::error::Error>> {
/// let settings = BloodBankSeedSettings {
///     enabled: true,
///     registry_path: None,
/// };
/// let service = BloodBankService::new(Arc::new(DieselBloodBankRepository::new(pool)));
/// let outcome = seed_blood_banks_on_startup(&settings, &service).await?;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
pub async fn seed_blood_banks_on_startup<R>(
    settings: &BloodBankSeedSettings,
    service: &BloodBankService<R>,
) -> Result<SeedOutcome, StartupSeedingError>
where
    R: BloodBankRepository,
{
    if !settings.enabled {
        info!(reason = "disabled", "blood bank seeding skipped");
        return Ok(SeedOutcome::Disabled);
    }

    let banks = match settings.registry_path() {
        Some(path) => load_seed_file(path)?,
        None => parse_seed_list(BUNDLED_SEED.as_bytes())?,
    };
    let count = banks.len();
    if service.seed_if_empty(banks).await? {
        Ok(SeedOutcome::Seeded { count })
    } else {
        Ok(SeedOutcome::AlreadyPopulated)
    }
}

/// Read and validate a JSON list of blood banks.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the file cannot be read, is not a
/// list of blood banks, or holds an entry that fails validation.
pub fn load_seed_file(path: &Path) -> Result<Vec<NewBloodBank>, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::SeedRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    parse_seed_list(&payload)
}

fn parse_seed_list(payload: &[u8]) -> Result<Vec<NewBloodBank>, StartupSeedingError> {
    let entries: Vec<SeedEntry> = serde_json::from_slice(payload)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_new_blood_bank(index))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Unit tests for seed loading and startup orchestration.

    use super::*;
    use std::io::Write as _;
    use std::sync::Arc;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use crate::domain::ports::{BloodBankRepositoryError, MockBloodBankRepository};

    fn bundled() -> BloodBankSeedSettings {
        BloodBankSeedSettings {
            enabled: true,
            registry_path: None,
        }
    }

    fn seed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write seed");
        file
    }

    #[rstest]
    fn bundled_list_holds_eight_pune_banks() {
        let banks = parse_seed_list(BUNDLED_SEED.as_bytes()).expect("bundled seed parses");

        assert_eq!(banks.len(), 8);
        assert!(banks.iter().any(|bank| bank.area().as_ref() == "Pimpri"));
        assert_eq!(banks[0].name(), "Ruby Hall Clinic Blood Bank");
    }

    #[rstest]
    fn override_file_replaces_the_bundled_list() {
        let file = seed_file(
            r#"[{"name": "Sassoon Blood Bank", "address": "Station Rd", "phone": "020-26128000", "lat": 18.52, "lng": 73.87, "area": "Camp"}]"#,
        );

        let banks = load_seed_file(file.path()).expect("override seed loads");

        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].name(), "Sassoon Blood Bank");
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        let file = seed_file("{\"name\": \"not a list\"}");

        let error = load_seed_file(file.path()).expect_err("parse error");

        assert!(matches!(error, StartupSeedingError::Parse(_)));
    }

    #[rstest]
    fn out_of_range_entry_reports_its_index() {
        let file = seed_file(
            r#"[
                {"name": "A", "address": "B", "phone": "1", "lat": 18.5, "lng": 73.8, "area": "Kothrud"},
                {"name": "C", "address": "D", "phone": "2", "lat": 95.0, "lng": 73.8, "area": "Kothrud"}
            ]"#,
        );

        let error = load_seed_file(file.path()).expect_err("invalid entry");

        assert!(matches!(
            error,
            StartupSeedingError::InvalidEntry {
                index: 1,
                source: BloodBankValidationError::Latitude { .. }
            }
        ));
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let error = load_seed_file(Path::new("/nonexistent/blood-banks.json"))
            .expect_err("missing file");

        assert!(matches!(error, StartupSeedingError::SeedRead { .. }));
    }

    #[tokio::test]
    async fn disabled_seeding_leaves_the_store_alone() {
        let mut repo = MockBloodBankRepository::new();
        repo.expect_count().times(0);
        let settings = BloodBankSeedSettings {
            enabled: false,
            registry_path: Some(PathBuf::from("/nonexistent.json")),
        };

        let outcome = seed_blood_banks_on_startup(&settings, &BloodBankService::new(Arc::new(repo)))
            .await
            .expect("disabled seeding succeeds");

        assert_eq!(outcome, SeedOutcome::Disabled);
    }

    #[tokio::test]
    async fn empty_store_receives_the_bundled_list() {
        let mut repo = MockBloodBankRepository::new();
        repo.expect_count().times(1).return_once(|| Ok(0));
        repo.expect_insert_all()
            .withf(|banks| banks.len() == 8)
            .times(1)
            .return_once(|_| Ok(()));

        let outcome = seed_blood_banks_on_startup(&bundled(), &BloodBankService::new(Arc::new(repo)))
            .await
            .expect("seeding succeeds");

        assert_eq!(outcome, SeedOutcome::Seeded { count: 8 });
    }

    #[tokio::test]
    async fn bundled_list_needs_no_file_on_disk() {
        let mut repo = MockBloodBankRepository::new();
        repo.expect_count().times(1).return_once(|| Ok(0));
        repo.expect_insert_all()
            .withf(|banks| banks.iter().any(|bank| bank.area.as_ref() == "Pimpri"))
            .times(1)
            .return_once(|_| Ok(()));

        let outcome = seed_blood_banks_on_startup(&bundled(), &BloodBankService::new(Arc::new(repo)))
            .await
            .expect("bundled seeding succeeds");

        assert_eq!(outcome, SeedOutcome::Seeded { count: 8 });
    }

    #[tokio::test]
    async fn populated_store_is_not_reseeded() {
        let mut repo = MockBloodBankRepository::new();
        repo.expect_count().times(1).return_once(|| Ok(3));
        repo.expect_insert_all().times(0);

        let outcome = seed_blood_banks_on_startup(&bundled(), &BloodBankService::new(Arc::new(repo)))
            .await
            .expect("seed check succeeds");

        assert_eq!(outcome, SeedOutcome::AlreadyPopulated);
    }

    #[tokio::test]
    async fn store_outage_surfaces_as_seeding_error() {
        let mut repo = MockBloodBankRepository::new();
        repo.expect_count()
            .times(1)
            .return_once(|| Err(BloodBankRepositoryError::connection("refused")));

        let error = seed_blood_banks_on_startup(&bundled(), &BloodBankService::new(Arc::new(repo)))
            .await
            .expect_err("store outage");

        assert!(matches!(error, StartupSeedingError::Seeding(_)));
    }
}
