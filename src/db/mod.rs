//! Storage module for event and catalog data.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, CLI, etc.)                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Business Logic             │
//! │  - Pricing computation                                   │
//! │  - Availability checking                                 │
//! │  - Event lifecycle state machine                         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository.rs) - Abstract Interface │
//! │  - EventRepository (find/insert/update shapes)          │
//! │  - CatalogLookup (price/rate snapshots)                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The repository, not the advisory availability check, is the final
//! authority on the booking constraint: `insert`/`update_fields` must
//! reject conflicting writes with [`RepositoryError::Conflict`].

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::{
    CatalogLookup, DateSort, EventFilter, EventRepository, FullRepository, RepositoryError,
    RepositoryResult,
};
