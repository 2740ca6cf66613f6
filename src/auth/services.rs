use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::dto::{
    AuthResponse, LoginRequest, PublicUser, RegisterRequest, UpdateUserRequest,
};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::policy::{can_modify, Identity, Role};
use crate::auth::repo;
use crate::error::{on_constraint, ApiError};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Register a new user: validate, hash the password, persist with the
/// regular user role and issue a token for the fresh identity.
pub async fn register(
    db: &PgPool,
    keys: &JwtKeys,
    mut input: RegisterRequest,
) -> Result<AuthResponse, ApiError> {
    input.email = input.email.trim().to_lowercase();

    if !is_valid_email(&input.email) {
        return Err(ApiError::validation("Invalid email"));
    }
    if input.password.len() < 8 {
        return Err(ApiError::validation("Password must be at least 8 characters"));
    }
    if input.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }

    let hash = hash_password(&input.password)?;

    let role = Role::User;
    let user = repo::create(
        db,
        &input.email,
        input.name.trim(),
        &hash,
        input.profile_image.as_deref(),
        input.bio.as_deref(),
        role.id(),
    )
    .await
    .map_err(on_constraint("Email already registered"))?;

    let token = keys.sign(user.id, role)?;

    info!(user_id = user.id, "user registered");
    Ok(AuthResponse {
        token,
        user: PublicUser::try_from(user)?,
    })
}

/// Log a user in. Unknown email and wrong password produce the same
/// authentication error so callers cannot enumerate accounts.
pub async fn login(
    db: &PgPool,
    keys: &JwtKeys,
    mut input: LoginRequest,
) -> Result<AuthResponse, ApiError> {
    input.email = input.email.trim().to_lowercase();

    let user = match repo::find_by_email(db, &input.email).await? {
        Some(u) => u,
        None => {
            warn!("login with unknown email");
            return Err(ApiError::Authentication);
        }
    };

    if !verify_password(&input.password, &user.password_hash)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::Authentication);
    }

    let role = Role::try_from(user.role_id).map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
    let token = keys.sign(user.id, role)?;

    info!(user_id = user.id, "user logged in");
    Ok(AuthResponse {
        token,
        user: PublicUser::try_from(user)?,
    })
}

/// Public profile lookup.
pub async fn get_user(db: &PgPool, user_id: i64) -> Result<PublicUser, ApiError> {
    let user = repo::find_by_id(db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    PublicUser::try_from(user)
}

/// Partial profile update, permitted for the user themselves or an admin.
pub async fn update_user(
    db: &PgPool,
    caller: &Identity,
    target_id: i64,
    input: UpdateUserRequest,
) -> Result<PublicUser, ApiError> {
    if !can_modify(caller, target_id) {
        return Err(ApiError::Authorization);
    }

    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(ApiError::validation("Name cannot be empty"));
        }
    }

    let user = repo::update_profile(
        db,
        target_id,
        input.name.as_deref().map(str::trim),
        input.profile_image.as_deref(),
        input.bio.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("User"))?;

    PublicUser::try_from(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("traveler+tag@blog.example.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("nope"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("@x.com"));
    }
}
