use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest},
        extractors::AuthUser,
        password::{hash_password, verify_password},
    },
    error::{ApiError, ErrorBody},
    state::AppState,
    users::{PublicUser, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

type Rejection = (StatusCode, Json<ErrorBody>);

fn reject(status: StatusCode, message: &str) -> Rejection {
    (status, Json(ErrorBody::new(message)))
}

fn internal<E: std::fmt::Display>(e: E) -> Rejection {
    error!(error = %e, "unexpected server error");
    reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected server error occurred.",
    )
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, Rejection> {
    payload.email = payload.email.trim().to_lowercase();
    payload.username = payload.username.trim().to_string();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(reject(StatusCode::BAD_REQUEST, "Invalid email"));
    }
    if payload.username.len() < 3 {
        warn!("username too short");
        return Err(reject(StatusCode::BAD_REQUEST, "Username too short"));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(reject(StatusCode::BAD_REQUEST, "Password too short"));
    }

    if let Ok(Some(_)) = User::find_by_email(&state.db, &payload.email).await {
        warn!(email = %payload.email, "email already registered");
        return Err(reject(StatusCode::CONFLICT, "Email already registered"));
    }
    if let Ok(Some(_)) = User::find_by_username(&state.db, &payload.username).await {
        warn!(username = %payload.username, "username already taken");
        return Err(reject(StatusCode::CONFLICT, "Username already taken"));
    }

    let hash = hash_password(&payload.password).map_err(internal)?;
    let user = User::create(&state.db, &payload.username, &payload.email, &hash)
        .await
        .map_err(internal)?;

    let access_token = state.jwt.sign_access(user.id).map_err(internal)?;
    let refresh_token = state.jwt.sign_refresh(user.id).map_err(internal)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, Rejection> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(reject(StatusCode::BAD_REQUEST, "Invalid email"));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(reject(StatusCode::UNAUTHORIZED, "Invalid credentials"));
        }
        Err(e) => return Err(internal(e)),
    };

    let ok = verify_password(&payload.password, &user.password_hash).map_err(internal)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(reject(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }

    let access_token = state.jwt.sign_access(user.id).map_err(internal)?;
    let refresh_token = state.jwt.sign_refresh(user.id).map_err(internal)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, Rejection> {
    let claims = state
        .jwt
        .verify_refresh(&payload.refresh_token)
        .map_err(|_| reject(StatusCode::UNAUTHORIZED, "Invalid or expired token"))?;

    let user = User::find_by_id(&state.db, claims.sub)
        .await
        .map_err(internal)?
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "User not found"))?;

    let access_token = state.jwt.sign_access(user.id).map_err(internal)?;
    let refresh_token = state.jwt.sign_refresh(user.id).map_err(internal)?;

    Ok(Json(AuthResponse {
        access_token,
        refresh_token,
        user: PublicUser::from(user),
    }))
}

/// GET /me — the authenticated user's profile, onboarding flag included.
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::unexpected)?
        .ok_or(ApiError::AuthRequired)?;

    Ok(Json(PublicUser::from(user)))
}
