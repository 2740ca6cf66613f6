use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

impl JwtConfig {
    /// True when the configured secret is obviously a dev placeholder.
    /// Such a value must never reach a production deployment.
    pub fn secret_looks_placeholder(&self) -> bool {
        self.secret.len() < 16
            || matches!(
                self.secret.as_str(),
                "secret" | "change-me" | "super-secret-key-change-in-production"
            )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "wayfarer".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "wayfarer-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 7),
        };
        Ok(Self { database_url, jwt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_secrets_are_flagged() {
        let mut cfg = JwtConfig {
            secret: "super-secret-key-change-in-production".into(),
            issuer: "t".into(),
            audience: "t".into(),
            ttl_minutes: 5,
        };
        assert!(cfg.secret_looks_placeholder());
        cfg.secret = "short".into();
        assert!(cfg.secret_looks_placeholder());
        cfg.secret = "9f8e7d6c5b4a39281706f5e4d3c2b1a0".into();
        assert!(!cfg.secret_looks_placeholder());
    }
}
