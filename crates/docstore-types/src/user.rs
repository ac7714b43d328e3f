use serde::{Deserialize, Serialize};

/// A user account.
///
/// Users are persisted through the same storage mechanism as ordinary
/// objects, under their own key namespace, and never appear in the object
/// index. The password hash format is owned by the store crate; this type
/// only carries it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned on first store.
    pub uid: String,
    /// Unique login name.
    pub username: String,
    /// Salted password hash. Empty for users that cannot log in with a
    /// password (e.g. the bootstrap anonymous user).
    #[serde(default)]
    pub password_hash: String,
    /// Group names, consumed by access gates.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl User {
    /// Create an unstored user with the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the user belongs to the named group.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_unstored() {
        let u = User::new("alice");
        assert_eq!(u.username, "alice");
        assert!(u.uid.is_empty());
        assert!(u.password_hash.is_empty());
        assert!(u.groups.is_empty());
    }

    #[test]
    fn group_membership() {
        let mut u = User::new("bob");
        u.groups.push("staff".to_string());
        assert!(u.in_group("staff"));
        assert!(!u.in_group("admin"));
    }

    #[test]
    fn serde_defaults_optional_fields() {
        let u: User = serde_json::from_str(r#"{"uid":"u1","username":"carol"}"#).unwrap();
        assert_eq!(u.username, "carol");
        assert!(u.groups.is_empty());
    }
}
