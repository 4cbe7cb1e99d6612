//! Domain rules for the maternal-health backend.
//!
//! Everything here is free of I/O so it can be shared by the repository
//! layer, the HTTP layer and their tests.

pub mod booklet;
pub mod codes;
pub mod error;
pub mod messages;
pub mod pregnancy;
pub mod qr;
pub mod roles;
pub mod search;
pub mod stats;
pub mod types;
