use sqlx::PgPool;

use crate::auth::repo_types::User;

const USER_COLUMNS: &str =
    "id, email, name, password_hash, profile_image, bio, role_id, created_at";

/// Find a user by email.
pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
}

/// Find a user by id.
pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Create a new user with an already-hashed password.
pub async fn create(
    db: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
    profile_image: Option<&str>,
    bio: Option<&str>,
    role_id: i64,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, name, password_hash, profile_image, bio, role_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .bind(profile_image)
    .bind(bio)
    .bind(role_id)
    .fetch_one(db)
    .await
}

/// Partial profile update; omitted fields keep their current values.
pub async fn update_profile(
    db: &PgPool,
    id: i64,
    name: Option<&str>,
    profile_image: Option<&str>,
    bio: Option<&str>,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            profile_image = COALESCE($3, profile_image),
            bio = COALESCE($4, bio)
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(name)
    .bind(profile_image)
    .bind(bio)
    .fetch_optional(db)
    .await
}
