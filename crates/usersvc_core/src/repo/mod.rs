//! Repository layer abstractions and store implementations.
//!
//! # Responsibility
//! - Define the user data access contract.
//! - Isolate SQL details from service/HTTP orchestration.
//! - Provide a store-free sample implementation for mock mode.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   store transport errors.
//! - The implementation is chosen once at startup and shared by reference.

pub mod pg_repo;
pub mod sample_repo;
pub mod user_repo;
