//! End-to-end test support for subvocab
//!
//! - `harness`: isolated on-disk databases
//! - `mocks`: a call-counting dictionary and subtitle fixtures


pub use harness::TestDatabaseManager;
pub use mocks::{MockLookup, TestDataFactory};
