//! Test utilities for the backend crate.
//!
//! In-memory adapters shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled for tests and behind the `test-support` feature.

pub mod clock;
pub mod repositories;
pub mod sms;

pub use clock::MutableClock;
pub use repositories::{InMemoryBloodBankRepository, InMemoryDonorRepository};
pub use sms::{ScriptedSmsGateway, SentMessage};
