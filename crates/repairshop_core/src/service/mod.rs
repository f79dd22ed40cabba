//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate input validation, clock reads and repository calls.
//! - Keep the console front end decoupled from storage details.

pub mod clock;
pub mod repair_service;
