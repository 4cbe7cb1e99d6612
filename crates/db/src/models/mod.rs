//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO carrying the client-supplied fields
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Server-assigned values (owner ids, authors, sequence numbers) are passed
//! to the repositories as separate arguments, never through the DTOs.

pub mod appointment;
pub mod birth_plan;
pub mod child;
pub mod consultation;
pub mod evolution;
pub mod exam;
pub mod health_center;
pub mod health_record;
pub mod medical_history;
pub mod mother;
pub mod pregnancy;
pub mod prevention_message;
pub mod qr_card;
pub mod session;
pub mod spouse_info;
pub mod stats;
pub mod treatment;
pub mod user;
pub mod vaccination;
