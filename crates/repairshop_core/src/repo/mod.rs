//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract of the repair store.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories only operate on connections at the latest schema version.
//! - Repository APIs return semantic errors (`MissingRequiredTable`,
//!   `InvalidData`) in addition to DB transport errors.

pub mod repair_repo;
