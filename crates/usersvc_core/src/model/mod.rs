//! Domain model for the users resource.
//!
//! # Responsibility
//! - Define data structures shared by repositories, services and the HTTP
//!   layer.
//!
//! # Invariants
//! - Every persisted user is identified by a store-assigned `UserId`.

pub mod user;
