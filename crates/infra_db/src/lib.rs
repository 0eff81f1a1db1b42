//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the training center
//! service: connection pooling, embedded migrations, and repository
//! implementations on PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access
//! abstractions that hide SQL details from the domain layer. Derived
//! financial state (invoice status, enrollment paid totals) is maintained
//! inside explicit transactions with row-level locking, so concurrent
//! payment mutations against the same invoice serialize instead of racing.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig};
//! use infra_db::repositories::BillingRepository;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/training")).await?;
//! let billing = BillingRepository::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
