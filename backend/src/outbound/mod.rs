//! Outbound adapters implementing the principal store port.
//!
//! - [`InMemoryUserRepository`]: read-only store seeded from a JSON file.
//! - [`persistence`]: PostgreSQL store built on Diesel.

pub mod in_memory;
pub mod persistence;

pub use in_memory::{InMemoryUserRepository, SeedError};
