//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the listing repository and user directory
//! ports backed by PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! - Adapters only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never
//!   leave this module.
//! - Database failures are folded into the ports' `Connection` / `Query`
//!   error variants.
//!
//! # Example
//!
//! ```ignore
//! use marketplace::outbound::persistence::{DbPool, DieselListingRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/marketplace")).await?;
//! let repo = DieselListingRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_listing_repository;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_listing_repository::DieselListingRepository;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::run_migrations;
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
