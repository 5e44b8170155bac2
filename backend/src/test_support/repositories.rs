//! In-memory repositories with the same ordering and uniqueness rules as the
//! PostgreSQL adapters.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    BloodBankRepository, BloodBankRepositoryError, DonorQuery, DonorRepository,
    DonorRepositoryError,
};
use crate::domain::{AreaFilter, BloodBank, Donor, PhoneNumber};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Donor store keyed by phone number.
#[derive(Default)]
pub struct InMemoryDonorRepository {
    donors: Mutex<BTreeMap<PhoneNumber, Donor>>,
    unavailable: Mutex<bool>,
}

impl InMemoryDonorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `donors`; later duplicates replace earlier ones.
    pub fn with_donors(donors: impl IntoIterator<Item = Donor>) -> Self {
        let repo = Self::new();
        {
            let mut stored = lock(&repo.donors);
            for donor in donors {
                stored.insert(donor.phone.clone(), donor);
            }
        }
        repo
    }

    /// Make every subsequent call fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        *lock(&self.unavailable) = unavailable;
    }

    pub fn contains(&self, phone: &str) -> bool {
        lock(&self.donors).keys().any(|stored| stored.as_ref() == phone)
    }

    pub fn len(&self) -> usize {
        lock(&self.donors).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), DonorRepositoryError> {
        if *lock(&self.unavailable) {
            return Err(DonorRepositoryError::connection("in-memory store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl DonorRepository for InMemoryDonorRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Donor>, DonorRepositoryError> {
        self.check_available()?;
        Ok(lock(&self.donors).get(phone).cloned())
    }

    async fn insert(&self, donor: &Donor) -> Result<(), DonorRepositoryError> {
        self.check_available()?;
        let mut donors = lock(&self.donors);
        if donors.contains_key(&donor.phone) {
            return Err(DonorRepositoryError::duplicate_phone(donor.phone.as_ref()));
        }
        donors.insert(donor.phone.clone(), donor.clone());
        Ok(())
    }

    async fn list(&self, query: &DonorQuery) -> Result<Vec<Donor>, DonorRepositoryError> {
        self.check_available()?;
        let mut matched: Vec<Donor> = lock(&self.donors)
            .values()
            .filter(|donor| query.matches(donor))
            .cloned()
            .collect();
        matched.sort_by(|lhs, rhs| {
            rhs.created_at
                .cmp(&lhs.created_at)
                .then_with(|| lhs.phone.cmp(&rhs.phone))
        });
        Ok(matched)
    }

    async fn delete(&self, phone: &PhoneNumber) -> Result<bool, DonorRepositoryError> {
        self.check_available()?;
        Ok(lock(&self.donors).remove(phone).is_some())
    }
}

/// Blood-bank store with `(name, address)` uniqueness.
#[derive(Default)]
pub struct InMemoryBloodBankRepository {
    banks: Mutex<Vec<BloodBank>>,
}

impl InMemoryBloodBankRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banks(&self) -> Vec<BloodBank> {
        lock(&self.banks).clone()
    }

    fn is_duplicate(stored: &[BloodBank], bank: &BloodBank) -> bool {
        stored
            .iter()
            .any(|existing| existing.name == bank.name && existing.address == bank.address)
    }
}

#[async_trait]
impl BloodBankRepository for InMemoryBloodBankRepository {
    async fn list(&self, area: &AreaFilter) -> Result<Vec<BloodBank>, BloodBankRepositoryError> {
        let mut matched: Vec<BloodBank> = lock(&self.banks)
            .iter()
            .filter(|bank| area.matches(&bank.area))
            .cloned()
            .collect();
        matched.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name).then_with(|| lhs.id.cmp(&rhs.id)));
        Ok(matched)
    }

    async fn exists(&self, name: &str, address: &str) -> Result<bool, BloodBankRepositoryError> {
        Ok(lock(&self.banks)
            .iter()
            .any(|bank| bank.name == name && bank.address == address))
    }

    async fn insert(&self, bank: &BloodBank) -> Result<(), BloodBankRepositoryError> {
        let mut banks = lock(&self.banks);
        if Self::is_duplicate(&banks, bank) {
            return Err(BloodBankRepositoryError::duplicate(bank.name.clone()));
        }
        banks.push(bank.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64, BloodBankRepositoryError> {
        let count = lock(&self.banks).len();
        u64::try_from(count).map_err(|err| BloodBankRepositoryError::query(err.to_string()))
    }

    async fn insert_all(&self, banks: &[BloodBank]) -> Result<(), BloodBankRepositoryError> {
        let mut stored = lock(&self.banks);
        let mut staged = stored.clone();
        for bank in banks {
            if Self::is_duplicate(&staged, bank) {
                return Err(BloodBankRepositoryError::duplicate(bank.name.clone()));
            }
            staged.push(bank.clone());
        }
        *stored = staged;
        Ok(())
    }
}
