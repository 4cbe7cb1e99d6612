//! JWT-based authentication extractors for Axum handlers.
//!
//! Staff users and mothers carry different token kinds; each extractor only
//! accepts its own.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use esante_core::error::CoreError;
use esante_core::types::DbId;
use esante_db::models::mother::Mother;
use esante_db::repositories::{MotherRepo, UserRepo};

use crate::auth::jwt::{validate_token, Claims, KIND_MOTHER, KIND_STAFF};
use crate::error::AppError;
use crate::handlers::booklet::lookup_by_code;
use crate::query::QrCodeParam;
use crate::state::AppState;

/// Decode the Bearer token of a request, if it has an `Authorization` header.
fn bearer_claims(parts: &Parts, state: &AppState) -> Result<Option<Claims>, AppError> {
    let Some(auth_header) = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(None);
    };

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;
    Ok(Some(claims))
}

/// Authenticated staff user extracted from a JWT Bearer token.
///
/// The account must still exist and be active: a deactivated user's
/// unexpired token is refused with 403.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// `MINISTRY` or `HEALTH_WORKER`.
    pub role: String,
    pub health_center_id: Option<DbId>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

        if claims.kind != KIND_STAFF {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff account required".into(),
            )));
        }

        match UserRepo::is_active(&state.pool, claims.sub).await? {
            Some(true) => {}
            Some(false) => {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Account is deactivated".into(),
                )))
            }
            None => {
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Account no longer exists".into(),
                )))
            }
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role.unwrap_or_default(),
            health_center_id: claims.health_center_id,
        })
    }
}

/// A mother authenticated by her own access token.
///
/// Used by the endpoints that modify her data, where a bare QR code is not
/// enough.
#[derive(Debug, Clone)]
pub struct MotherAuth {
    pub mother_id: DbId,
    pub qr_code: String,
}

impl FromRequestParts<AppState> for MotherAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?.ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or missing token".into()))
        })?;
        mother_claims(claims)
    }
}

fn mother_claims(claims: Claims) -> Result<MotherAuth, AppError> {
    match (claims.kind.as_str(), claims.mother_id) {
        (KIND_MOTHER, Some(mother_id)) => Ok(MotherAuth {
            mother_id,
            qr_code: claims.qr_code.unwrap_or_default(),
        }),
        _ => Err(AppError::Core(CoreError::Unauthorized(
            "Mother token required".into(),
        ))),
    }
}

/// The mother behind a mobile read request.
///
/// Resolved from a mother token when one is presented, otherwise from the
/// `?qr_code=` query parameter. Neither gives 401.
#[derive(Debug, Clone)]
pub struct MotherIdentity {
    pub mother: Mother,
    /// Whether the identity came from a token rather than a bare QR code.
    pub via_token: bool,
}

impl FromRequestParts<AppState> for MotherIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = bearer_claims(parts, state)? {
            let auth = mother_claims(claims)?;
            let mother = MotherRepo::find_by_id(&state.pool, auth.mother_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Mother",
                    id: auth.mother_id,
                }))?;
            return Ok(MotherIdentity {
                mother,
                via_token: true,
            });
        }

        let Query(params) = Query::<QrCodeParam>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let code = params
            .qr_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Token or QR code required".into()))
            })?;

        let mother = lookup_by_code(&state.pool, code).await?.into_mother()?;
        Ok(MotherIdentity {
            mother,
            via_token: false,
        })
    }
}
