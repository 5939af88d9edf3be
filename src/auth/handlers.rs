use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            CheckUserResponse, ForgotPasswordRequest, LoginRequest, LoginResponse,
            MessageResponse, RegisterRequest, ResetPasswordRequest,
        },
        jwt::{AuthUser, JwtKeys},
        otp, password,
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
};

const FORGOT_PASSWORD_GENERIC: &str = "If that email exists, an OTP has been sent to your inbox";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/checkUser", get(check_user))
        .route("/forgot-Password", post(forgot_password))
        .route("/reset-Password", post(reset_password))
}

/// All validation runs before any store lookup, so a short password fails
/// the same way regardless of conflicts. No email-format check: any
/// non-empty string is an acceptable address.
fn validate_registration(payload: &RegisterRequest) -> Result<(), ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::Validation("Please Enter Your User Name".into()));
    }
    if payload.firstname.is_empty() {
        return Err(ApiError::Validation("Please Enter Your firstname".into()));
    }
    if payload.lastname.is_empty() {
        return Err(ApiError::Validation("Please Enter Your lastname".into()));
    }
    if payload.email.is_empty() {
        return Err(ApiError::Validation("Please Enter Your email".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("Please Enter Your password".into()));
    }
    if payload.password.chars().count() <= 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    validate_registration(&payload)?;

    // Two independent lookups; both must be clean.
    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already exists");
        return Err(ApiError::Conflict("Username Already Exists".into()));
    }
    if User::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already in use");
        return Err(ApiError::Conflict("Email Already in Use".into()));
    }

    let hash = password::hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.firstname,
        &payload.lastname,
        &payload.email,
        &hash,
    )
    .await?;

    info!(userid = %user.userid, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() {
        return Err(ApiError::Validation("Email is empty".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("password is empty".into()));
    }

    // Unknown email and wrong password collapse into one outcome.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !password::verify_password(&payload.password, &user.user_password)? {
        warn!(userid = %user.userid, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.userid, &user.username, payload.remember_me)?;

    info!(userid = %user.userid, remember = payload.remember_me, "user logged in");
    Ok(Json(LoginResponse {
        msg: "user login successful",
        token,
        username: user.username,
        userid: user.userid,
    }))
}

#[instrument(skip_all)]
pub async fn check_user(AuthUser(principal): AuthUser) -> Json<CheckUserResponse> {
    Json(CheckUserResponse {
        message: "user is logged in",
        username: principal.username,
        userid: principal.userid,
    })
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::Validation("Email is required".into()));
    }

    // Unknown emails get the exact same response as known ones.
    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            return Ok(Json(MessageResponse {
                message: FORGOT_PASSWORD_GENERIC.into(),
            }))
        }
    };

    let code = otp::generate();
    let otp_hash = password::hash_password(&code)?;
    let expires_at = OffsetDateTime::now_utc() + otp::OTP_VALIDITY;
    User::set_reset_challenge(&state.db, &email, &otp_hash, expires_at).await?;

    let body = format!(
        "<p>Your OTP code is: <b>{code}</b></p>\n\
         <p>This code will expire in 5 minutes.</p>\n\
         <p>If you didn't request this, please ignore this email.</p>"
    );
    if let Err(e) = state
        .mailer
        .send(&email, "Your Password Reset Code", &body)
        .await
    {
        error!(error = %e, "otp email send failed");
        return Err(ApiError::EmailDelivery);
    }

    info!(userid = %user.userid, "password reset otp issued");
    Ok(Json(MessageResponse {
        message: FORGOT_PASSWORD_GENERIC.into(),
    }))
}

/// Challenge check for reset-password. A missing challenge (never requested,
/// or already consumed), a hash mismatch and an expired window all collapse
/// into the single InvalidOrExpiredOtp outcome. `now == expiration` is still
/// inside the window.
fn verify_reset_challenge(
    otp: &str,
    otp_hash: Option<&str>,
    expiration: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let (Some(otp_hash), Some(expiration)) = (otp_hash, expiration) else {
        return Err(ApiError::InvalidOrExpiredOtp);
    };
    if !password::verify_password(otp, otp_hash)? {
        return Err(ApiError::InvalidOrExpiredOtp);
    }
    if now > expiration {
        return Err(ApiError::InvalidOrExpiredOtp);
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.otp.is_empty() || payload.new_password.is_empty() {
        return Err(ApiError::Validation("All fields are required".into()));
    }

    // Unknown user, missing challenge, wrong code and expired code are all
    // the same outcome.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or(ApiError::InvalidOrExpiredOtp)?;

    if let Err(e) = verify_reset_challenge(
        &payload.otp,
        user.reset_otp.as_deref(),
        user.otp_expiration,
        OffsetDateTime::now_utc(),
    ) {
        warn!(userid = %user.userid, "reset challenge rejected");
        return Err(e);
    }

    let new_hash = password::hash_password(&payload.new_password)?;
    User::reset_password(&state.db, &email, &new_hash).await?;

    info!(userid = %user.userid, "password reset completed");
    Ok(Json(MessageResponse {
        message: "Password reset successful! You can now login.".into(),
    }))
}
