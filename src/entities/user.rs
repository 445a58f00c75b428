// 👤 User Entity + Account Store
//
// "Email is the lookup key, the UUID is the identity"
//
// - Users are created at signup with a fresh UUID
// - Email is unique (case-sensitive exact match)
// - Name/picture/credential can change; the id never does
// - Credentials are compared as plain strings (no security model here)

use serde::{Deserialize, Serialize};

// ============================================================================
// USER ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,

    pub name: String,

    /// Unique lookup key
    pub email: String,

    /// Plaintext credential, never serialized
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Picture reference (URL or data URI)
    pub picture: Option<String>,
}

impl User {
    /// Create a new user with a fresh UUID
    pub fn new(name: String, email: String, password: String) -> Self {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            password,
            picture: None,
        }
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    /// First letter of the name, used when no picture is set
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

// ============================================================================
// ACCOUNT STORE
// ============================================================================

/// Registered users, in signup order
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    users: Vec<User>,
}

impl AccountStore {
    pub fn new() -> Self {
        AccountStore { users: Vec::new() }
    }

    /// Add a user. Returns false (and stores nothing) if the email is taken.
    pub fn register(&mut self, user: User) -> bool {
        if self.contains_email(&user.email) {
            return false;
        }
        self.users.push(user);
        true
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email == email)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Exact email + credential match
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&User> {
        self.find_by_email(email)
            .filter(|u| u.password_matches(password))
    }

    /// Apply `update_fn` to the stored record, returning the updated user
    pub fn update<F>(&mut self, id: &str, update_fn: F) -> Option<&User>
    where
        F: FnOnce(&mut User),
    {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        update_fn(user);
        Some(&*user)
    }

    pub fn remove(&mut self, id: &str) -> Option<User> {
        let pos = self.users.iter().position(|u| u.id == id)?;
        Some(self.users.remove(pos))
    }

    pub fn count(&self) -> usize {
        self.users.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(email: &str) -> User {
        User::new(
            "Test User".to_string(),
            email.to_string(),
            "secret1".to_string(),
        )
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user("test@example.pk");

        assert!(!user.id.is_empty());
        assert!(uuid::Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.name, "Test User");
        assert_eq!(user.picture, None);
        assert_eq!(user.initial(), 'T');
    }

    #[test]
    fn test_password_not_serialized() {
        let user = create_test_user("test@example.pk");
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret1"));
    }

    #[test]
    fn test_register_rejects_duplicate_email() {
        let mut store = AccountStore::new();
        assert!(store.register(create_test_user("a@example.pk")));
        assert!(!store.register(create_test_user("a@example.pk")));
        assert_eq!(store.count(), 1);

        // Case-sensitive: a different case is a different email
        assert!(store.register(create_test_user("A@example.pk")));
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_authenticate_exact_match() {
        let mut store = AccountStore::new();
        store.register(create_test_user("a@example.pk"));

        assert!(store.authenticate("a@example.pk", "secret1").is_some());
        assert!(store.authenticate("a@example.pk", "Secret1").is_none());
        assert!(store.authenticate("b@example.pk", "secret1").is_none());
    }

    #[test]
    fn test_update_and_remove() {
        let mut store = AccountStore::new();
        let user = create_test_user("a@example.pk");
        let id = user.id.clone();
        store.register(user);

        let updated = store
            .update(&id, |u| u.name = "Renamed".to_string())
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert!(store.update("missing", |_| {}).is_none());

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.email, "a@example.pk");
        assert_eq!(store.count(), 0);
        assert!(store.remove(&id).is_none());
    }
}
