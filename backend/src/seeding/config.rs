//! Blood-bank seed configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// The eight Pune blood banks, compiled into the binary.
pub(crate) const BUNDLED_SEED: &str = include_str!("../../fixtures/blood-banks.json");

/// Configuration values controlling blood-bank seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOOD_BANK_SEED")]
pub struct BloodBankSeedSettings {
    /// Seed an empty blood-bank store on startup.
    #[ortho_config(default = true)]
    pub enabled: bool,
    /// Seed file to read instead of the bundled list.
    pub registry_path: Option<PathBuf>,
}

impl BloodBankSeedSettings {
    /// The override seed file, or `None` for the bundled list.
    pub fn registry_path(&self) -> Option<&Path> {
        self.registry_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for seed configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> BloodBankSeedSettings {
        BloodBankSeedSettings::load_from_iter([OsString::from("bloodlink")])
            .expect("config should load")
    }

    #[rstest]
    fn seeding_is_enabled_by_default() {
        let _guard = lock_env([
            ("BLOOD_BANK_SEED_ENABLED", None::<String>),
            ("BLOOD_BANK_SEED_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.enabled);
        assert_eq!(settings.registry_path(), None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BLOOD_BANK_SEED_ENABLED", Some("false".to_owned())),
            (
                "BLOOD_BANK_SEED_REGISTRY_PATH",
                Some("/tmp/blood-banks.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.enabled);
        assert_eq!(
            settings.registry_path(),
            Some(Path::new("/tmp/blood-banks.json"))
        );
    }

    #[rstest]
    fn bundled_seed_is_a_json_list() {
        assert!(BUNDLED_SEED.trim_start().starts_with('['));
    }
}
