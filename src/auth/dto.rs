use serde::{Deserialize, Serialize};

use crate::auth::policy::Role;
use crate::auth::repo_types::User;
use crate::error::ApiError;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for a partial profile update.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

/// Role summary attached to user responses.
#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub id: i64,
    pub name: &'static str,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub role: RoleSummary,
}

impl TryFrom<User> for PublicUser {
    type Error = ApiError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        // A role id outside the fixed set means corrupted data, not bad input.
        let role = Role::try_from(user.role_id)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
        Ok(Self {
            id: user.id,
            email: user.email,
            name: user.name,
            profile_image: user.profile_image,
            bio: user.bio,
            role: RoleSummary {
                id: role.id(),
                name: role.name(),
            },
        })
    }
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_user() -> User {
        User {
            id: 3,
            email: "trail@x.com".into(),
            name: "Trail Writer".into(),
            password_hash: "$argon2id$hidden".into(),
            profile_image: Some("https://img.example/p.png".into()),
            bio: None,
            role_id: 2,
            created_at: datetime!(2024-01-01 00:00:00 UTC),
        }
    }

    #[test]
    fn public_user_carries_role_summary() {
        let public = PublicUser::try_from(sample_user()).unwrap();
        assert_eq!(public.role.id, 2);
        assert_eq!(public.role.name, "user");
    }

    #[test]
    fn public_user_never_exposes_password_hash() {
        let public = PublicUser::try_from(sample_user()).unwrap();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
        assert!(json.contains("trail@x.com"));
    }

    #[test]
    fn unknown_role_id_is_an_internal_error() {
        let mut user = sample_user();
        user.role_id = 99;
        assert!(PublicUser::try_from(user).is_err());
    }
}
