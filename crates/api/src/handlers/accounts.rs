//! Handlers for the `/accounts` resource: the caller's own profile and the
//! ministry-managed staff directory.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use esante_core::codes::{generate_badge_id, MAX_CODE_ATTEMPTS};
use esante_core::error::CoreError;
use esante_core::roles::validate_role;
use esante_core::search::{normalize_search, PageRequest};
use esante_core::types::DbId;
use esante_db::models::user::{CreateUser, UpdateUser, User, UserFilter, UserResponse, UserStats};
use esante_db::repositories::UserRepo;
use esante_events::{welcome_email, EmailDelivery, WelcomeRecipient};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMinistry;
use crate::response::{DetailResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /accounts/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Generated when absent.
    pub badge_id: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub role: String,
    pub health_center_id: Option<DbId>,
    pub password: String,
}

/// Request body for `PATCH /accounts/me`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Request body for `PATCH /accounts/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub health_center_id: Option<DbId>,
    pub is_active: Option<bool>,
    /// Replaces the password when present.
    pub password: Option<String>,
}

/// Query parameters for `GET /accounts/users`.
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

// ---------------------------------------------------------------------------
// Own profile
// ---------------------------------------------------------------------------

/// GET /api/v1/accounts/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, auth.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /api/v1/accounts/me
///
/// Staff may edit their own name, phone and e-mail, nothing else.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    let update = UpdateUser {
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        phone: input.phone,
        ..Default::default()
    };
    let user = UserRepo::update(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(UserResponse::from(&user)))
}

// ---------------------------------------------------------------------------
// Staff directory (ministry only)
// ---------------------------------------------------------------------------

/// GET /api/v1/accounts/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<PageResponse<UserResponse, UserStats>>> {
    let page = PageRequest::new(params.page, params.page_size);
    let filter = UserFilter {
        role: params.role,
        is_active: params.is_active,
        search: normalize_search(params.search.as_deref()),
    };

    let users = UserRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = UserRepo::count(&state.pool, &filter).await?;
    let stats = UserRepo::stats(&state.pool).await?;

    Ok(Json(PageResponse {
        data: users.iter().map(UserResponse::from).collect(),
        pagination: page.meta(total),
        stats,
    }))
}

/// POST /api/v1/accounts/users
///
/// Create a staff account. A welcome e-mail is sent after the insert; its
/// failure never fails the request.
pub async fn create_user(
    State(state): State<AppState>,
    RequireMinistry(admin): RequireMinistry,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;
    validate_role(&input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let email = input.email.trim().to_lowercase();
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with email '{email}' already exists"
        ))));
    }

    let badge_id = match input.badge_id.as_deref().map(str::trim) {
        Some(badge) if !badge.is_empty() => {
            if UserRepo::badge_exists(&state.pool, badge).await? {
                return Err(AppError::Core(CoreError::Conflict(format!(
                    "Badge '{badge}' is already in use"
                ))));
            }
            badge.to_string()
        }
        _ => unique_badge_id(&state).await?,
    };

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            badge_id,
            email,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            role: input.role,
            health_center_id: input.health_center_id,
            password_hash,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        badge_id = %user.badge_id,
        role = %user.role,
        created_by = admin.user_id,
        "Staff account created",
    );

    if let Some(email) = state.email.clone() {
        send_welcome(email, &user);
    }

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/v1/accounts/users/{id}
///
/// Deactivated users remain retrievable.
pub async fn get_user(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PATCH /api/v1/accounts/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    if let Some(role) = &input.role {
        validate_role(role)?;
    }

    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            let hash = hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            Some(hash)
        }
        None => None,
    };

    let update = UpdateUser {
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        phone: input.phone,
        role: input.role,
        health_center_id: input.health_center_id,
        is_active: input.is_active,
        password_hash,
    };
    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/v1/accounts/users/{id}
///
/// Soft delete: the account is deactivated, never removed.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireMinistry(admin): RequireMinistry,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetailResponse>> {
    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(user_id = id, by = admin.user_id, "Staff account deactivated");
    Ok(Json(DetailResponse::new("User deactivated")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// Draw badge ids until one is free.
async fn unique_badge_id(state: &AppState) -> AppResult<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let candidate = generate_badge_id();
        if !UserRepo::badge_exists(&state.pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::InternalError(
        "Could not generate a unique badge id".into(),
    ))
}

/// Fire-and-forget welcome e-mail.
fn send_welcome(delivery: Arc<EmailDelivery>, user: &User) {
    let recipient = WelcomeRecipient {
        email: user.email.clone(),
        full_name: user.full_name(),
        badge_id: user.badge_id.clone(),
        role: user.role.clone(),
    };
    let user_id = user.id;
    tokio::spawn(async move {
        let Some(message) = welcome_email(&recipient, &delivery.config().app_url) else {
            return;
        };
        match delivery.deliver(&message).await {
            Ok(()) => tracing::info!(user_id, "Welcome e-mail sent"),
            Err(e) => tracing::warn!(user_id, error = %e, "Welcome e-mail failed"),
        }
    });
}
