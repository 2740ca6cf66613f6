use serde::{Deserialize, Serialize};

use crate::auth::policy::{Identity, Role};

/// JWT payload used for authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,    // user ID
    pub role: Role,  // role id, decoded to the enum
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.sub,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_claim_serializes_as_integer() {
        let claims = Claims {
            sub: 42,
            role: Role::Admin,
            iat: 0,
            exp: 0,
            iss: "i".into(),
            aud: "a".into(),
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], 1);
        assert_eq!(json["sub"], 42);
    }

    #[test]
    fn unknown_role_id_fails_to_deserialize() {
        let json = r#"{"sub":1,"role":9,"iat":0,"exp":0,"iss":"i","aud":"a"}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
