//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- staff user from a JWT Bearer token.
//! - [`auth::MotherAuth`] -- mother from her own token.
//! - [`auth::MotherIdentity`] -- mother from a token or a `?qr_code=` parameter.
//! - [`rbac::RequireMinistry`] -- requires the `MINISTRY` role.
//! - [`rbac::RequireHealthWorker`] -- requires the `HEALTH_WORKER` role.
//! - [`rbac::RequireAuth`] -- requires any authenticated staff user.

pub mod auth;
pub mod rbac;
