use serde::{Deserialize, Serialize};

/// Roles an admin account can hold. Roles are additive flags, not a
/// hierarchy: holding `SuperAdmin` does not imply `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
    #[serde(rename = "Super Admin")]
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Admin, Role::SuperAdmin];
}

/// The two kinds of principal the backend authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Admin,
}

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal id)
    pub sub: i32,

    /// Principal kind the token was issued for
    pub kind: PrincipalKind,

    /// Roles granted at issuance
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// The verified identity attached to a request after the guard has run.
/// Handlers use `id` to scope queries to the caller's own resources.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPrincipal {
    pub id: i32,
    pub kind: PrincipalKind,
    pub roles: Vec<Role>,
}

/// Per-route declaration of which roles may proceed.
///
/// An empty policy admits any authenticated principal of the expected kind.
/// A non-empty policy admits tokens whose role set intersects it - a set
/// membership test, never an ordinal comparison between roles.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
    roles: Vec<Role>,
}

impl RolePolicy {
    /// Any authenticated principal may proceed.
    pub fn authenticated() -> Self {
        Self { roles: Vec::new() }
    }

    /// Only principals holding at least one of the given roles may proceed.
    pub fn allow(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// Every role is acceptable - authenticated, any role.
    pub fn any_role() -> Self {
        Self::allow(Role::ALL)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Membership test against the granted role set.
    pub fn admits(&self, granted: &[Role]) -> bool {
        self.roles.is_empty() || granted.iter().any(|role| self.roles.contains(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_policy_admits_any_authenticated_principal() {
        let policy = RolePolicy::authenticated();

        assert!(policy.admits(&[]));
        assert!(policy.admits(&[Role::User]));
        assert!(policy.admits(&[Role::SuperAdmin]));
    }

    #[test]
    fn admin_policy_rejects_user_only_role_set() {
        let policy = RolePolicy::allow([Role::Admin]);

        assert!(!policy.admits(&[Role::User]));
        assert!(!policy.admits(&[]));
    }

    #[test]
    fn admin_policy_admits_admin_and_supersets() {
        let policy = RolePolicy::allow([Role::Admin]);

        assert!(policy.admits(&[Role::Admin]));
        assert!(policy.admits(&[Role::Admin, Role::SuperAdmin]));
    }

    #[test]
    fn super_admin_alone_does_not_satisfy_admin_policy() {
        // Roles are flags, not a hierarchy.
        let policy = RolePolicy::allow([Role::Admin]);

        assert!(!policy.admits(&[Role::SuperAdmin]));
    }

    #[test]
    fn any_role_policy_admits_every_role() {
        let policy = RolePolicy::any_role();

        assert!(policy.admits(&[Role::User]));
        assert!(policy.admits(&[Role::Admin]));
        assert!(policy.admits(&[Role::SuperAdmin]));
        assert!(!policy.admits(&[]));
    }

    #[test]
    fn role_serde_uses_database_spelling() {
        let json = serde_json::to_string(&vec![Role::SuperAdmin, Role::Admin]).unwrap();
        assert_eq!(json, r#"["Super Admin","Admin"]"#);

        let roles: Vec<Role> = serde_json::from_str(&json).unwrap();
        assert_eq!(roles, vec![Role::SuperAdmin, Role::Admin]);
    }
}
