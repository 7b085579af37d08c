//! SQLite storage implementation for filingscope.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `filingscope-core` and contains:
//! - Database connection pooling and pragmas
//! - Embedded Diesel migrations
//! - A single writer task that serializes every write transaction
//! - Repository implementations and their Diesel row types
//!
//! # Architecture
//!
//! ```text
//!      core (domain, traits)
//!               │
//!               ▼
//!   storage-sqlite (this crate) ── reads ──► r2d2 pool ─┐
//!               │                                       ├──► SQLite DB
//!               └──────────── writes ──► writer task ───┘
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod batch;
pub mod companies;
pub mod filings;
pub mod financials;
pub mod prices;
pub mod valuation;

#[cfg(test)]
mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, open, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use batch::BatchRunRepository;
pub use companies::CompanyRepository;
pub use filings::FilingRepository;
pub use financials::FinancialRepository;
pub use prices::PriceRepository;
pub use valuation::{PeerMapRepository, ValuationRepository};

// Re-export from filingscope-core for convenience
pub use filingscope_core::errors::{DatabaseError, Error, Result};
