use serde::{Deserialize, Serialize};

/// Fixed role set. Stored and transmitted as the role table's integer ids
/// so database rows and token claims stay compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn id(self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::User => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> i64 {
        role.id()
    }
}

impl TryFrom<i64> for Role {
    type Error = String;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Role::Admin),
            2 => Ok(Role::User),
            other => Err(format!("unknown role id {other}")),
        }
    }
}

/// The `{user_id, role}` pair asserted by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

/// Ownership policy: a caller may mutate a resource iff they own it or hold
/// the admin role.
pub fn can_modify(caller: &Identity, owner_id: i64) -> bool {
    caller.user_id == owner_id || caller.role.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_modify_own_resource() {
        let caller = Identity { user_id: 5, role: Role::User };
        assert!(can_modify(&caller, 5));
    }

    #[test]
    fn admin_may_modify_any_resource() {
        let caller = Identity { user_id: 5, role: Role::Admin };
        assert!(can_modify(&caller, 7));
    }

    #[test]
    fn non_owner_non_admin_is_denied() {
        let caller = Identity { user_id: 5, role: Role::User };
        assert!(!can_modify(&caller, 7));
    }

    #[test]
    fn role_ids_round_trip() {
        assert_eq!(Role::try_from(1), Ok(Role::Admin));
        assert_eq!(Role::try_from(2), Ok(Role::User));
        assert!(Role::try_from(3).is_err());
        assert_eq!(i64::from(Role::Admin), 1);
        assert_eq!(i64::from(Role::User), 2);
    }

    #[test]
    fn only_admin_role_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }
}
