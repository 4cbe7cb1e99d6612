//! Handlers for the `/auth` resource (login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use esante_core::error::CoreError;
use esante_core::types::DbId;
use esante_db::models::session::{CreateSession, SessionOwner};
use esante_db::models::user::User;
use esante_db::repositories::{MotherRepo, QrCardRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{
    generate_refresh_token, generate_staff_token, hash_refresh_token, StaffIdentity,
};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::handlers::mobile::{issue_mother_tokens, MotherAuthResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub badge_id: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Access + refresh token pair returned by every login flow.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Successful staff authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub badge_id: String,
    pub full_name: String,
    pub role: String,
    pub email: String,
    pub health_center_id: Option<DbId>,
}

/// A refreshed session keeps the shape of the login that created it.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RefreshResponse {
    Staff(AuthResponse),
    Mother(MotherAuthResponse),
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with badge id + password. The badge lookup ignores case.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid badge id or password".into(),
        ))
    };

    let user = UserRepo::find_by_badge(&state.pool, input.badge_id.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(badge_id = %user.badge_id, "Rejected login: wrong password");
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, role = %user.role, "Staff login");

    Ok(Json(issue_staff_tokens(&state, &user).await?))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. Works for staff and
/// mother sessions; the old session is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<RefreshResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Only the request that flips the session to revoked may rotate it.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        )));
    }

    match session.owner() {
        Some(SessionOwner::User(user_id)) => {
            let user = UserRepo::find_by_id(&state.pool, user_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized("User no longer exists".into()))
                })?;
            if !user.is_active {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Account is deactivated".into(),
                )));
            }
            Ok(Json(RefreshResponse::Staff(
                issue_staff_tokens(&state, &user).await?,
            )))
        }
        Some(SessionOwner::Mother(mother_id)) => {
            let mother = MotherRepo::find_by_id(&state.pool, mother_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized("Profile no longer exists".into()))
                })?;
            let card = QrCardRepo::find_by_id(&state.pool, mother.qr_card_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized("Card no longer exists".into()))
                })?;
            Ok(Json(RefreshResponse::Mother(
                issue_mother_tokens(&state, mother, &card.code).await?,
            )))
        }
        None => Err(AppError::InternalError(format!(
            "Session {} has no owner",
            session.id
        ))),
    }
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::debug!(user_id = auth_user.user_id, revoked, "Staff logout");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Persist a session for `owner` and return the plaintext token pair.
pub(crate) async fn create_session(
    state: &AppState,
    owner: SessionOwner,
    access_token: String,
) -> AppResult<TokenPair> {
    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            owner,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(TokenPair {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    })
}

async fn issue_staff_tokens(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let full_name = user.full_name();
    let identity = StaffIdentity {
        user_id: user.id,
        role: &user.role,
        full_name: &full_name,
        health_center_id: user.health_center_id,
    };
    let access_token = generate_staff_token(&identity, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let tokens = create_session(state, SessionOwner::User(user.id), access_token).await?;

    Ok(AuthResponse {
        tokens,
        user: UserInfo {
            id: user.id,
            badge_id: user.badge_id.clone(),
            full_name,
            role: user.role.clone(),
            email: user.email.clone(),
            health_center_id: user.health_center_id,
        },
    })
}
