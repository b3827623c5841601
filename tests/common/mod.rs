//! Common test utilities shared across integration tests

pub mod fixture;

pub use fixture::TestRepo;
