use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::password::{PasswordError, hash_password, verify_password};

/// One account in the user directory file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// bcrypt hash
    pub password_hash: String,
    /// May use the admin site.
    #[serde(default)]
    pub is_staff: bool,
    /// Inactive accounts cannot sign in.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl UserRecord {
    /// An active, non-staff account with a freshly hashed password.
    pub fn new(username: &str, password: &str, cost: u32) -> Result<Self, PasswordError> {
        Ok(UserRecord {
            username: username.to_string(),
            password_hash: hash_password(password, cost)?,
            is_staff: false,
            is_active: true,
        })
    }
}

/// The identity attached to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub is_staff: bool,
}

impl From<&UserRecord> for AuthenticatedUser {
    fn from(record: &UserRecord) -> Self {
        AuthenticatedUser {
            username: record.username.clone(),
            is_staff: record.is_staff,
        }
    }
}

/// Checks sign-in credentials.
pub trait Authenticator: Send + Sync {
    /// `Ok(None)` when the credentials are not accepted, for whatever reason.
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<AuthenticatedUser>, PasswordError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Failed to read user directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse user directory {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate username in user directory: {0}")]
    DuplicateUsername(String),
}

/// Accounts keyed by username.
#[derive(Debug, Default, Clone)]
pub struct UserDirectory {
    users: HashMap<String, UserRecord>,
}

impl UserDirectory {
    pub fn from_records(records: Vec<UserRecord>) -> Result<Self, DirectoryError> {
        let mut users = HashMap::with_capacity(records.len());
        for record in records {
            if users.contains_key(&record.username) {
                return Err(DirectoryError::DuplicateUsername(record.username));
            }
            users.insert(record.username.clone(), record);
        }
        Ok(UserDirectory { users })
    }

    /// Load a JSON array of user records.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<UserRecord> = serde_json::from_str(&content).map_err(|source| DirectoryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_records(records)
    }

    pub fn get(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Authenticator for UserDirectory {
    fn authenticate(&self, username: &str, password: &str) -> Result<Option<AuthenticatedUser>, PasswordError> {
        let Some(record) = self.get(username) else {
            return Ok(None);
        };
        if !verify_password(password, &record.password_hash)? {
            return Ok(None);
        }
        if !record.is_active {
            tracing::debug!(username, "Rejected sign-in for inactive account");
            return Ok(None);
        }
        Ok(Some(AuthenticatedUser::from(record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COST: u32 = 4;

    fn directory() -> UserDirectory {
        let mut admin = UserRecord::new("admin", "admin-pass", COST).unwrap();
        admin.is_staff = true;
        let mut bob = UserRecord::new("bob", "bob-pass", COST).unwrap();
        bob.is_active = false;
        UserDirectory::from_records(vec![UserRecord::new("alice", "alice-pass", COST).unwrap(), admin, bob]).unwrap()
    }

    #[test]
    fn test_authenticate_success() {
        let user = directory().authenticate("alice", "alice-pass").unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert!(!user.is_staff);
    }

    #[test]
    fn test_authenticate_staff() {
        let user = directory().authenticate("admin", "admin-pass").unwrap().unwrap();
        assert!(user.is_staff);
    }

    #[test]
    fn test_authenticate_wrong_password() {
        assert_eq!(directory().authenticate("alice", "nope").unwrap(), None);
    }

    #[test]
    fn test_authenticate_unknown_user() {
        assert_eq!(directory().authenticate("mallory", "alice-pass").unwrap(), None);
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        assert_eq!(directory().authenticate("Alice", "alice-pass").unwrap(), None);
    }

    #[test]
    fn test_authenticate_inactive_user() {
        assert_eq!(directory().authenticate("bob", "bob-pass").unwrap(), None);
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        let record = UserRecord {
            username: "carol".to_string(),
            password_hash: "not-a-bcrypt-hash".to_string(),
            is_staff: false,
            is_active: true,
        };
        let directory = UserDirectory::from_records(vec![record]).unwrap();
        assert!(directory.authenticate("carol", "anything").is_err());
    }

    #[test]
    fn test_duplicate_usernames_rejected() {
        let a = UserRecord::new("alice", "one", COST).unwrap();
        let b = UserRecord::new("alice", "two", COST).unwrap();
        let err = UserDirectory::from_records(vec![a, b]).unwrap_err();
        assert!(matches!(err, DirectoryError::DuplicateUsername(name) if name == "alice"));
    }

    #[test]
    fn test_load_from_file_applies_defaults() {
        let hash = hash_password("alice-pass", COST).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"username": "alice", "password_hash": "{hash}"}}]"#).unwrap();

        let directory = UserDirectory::load(file.path()).unwrap();
        assert_eq!(directory.len(), 1);
        let record = directory.get("alice").unwrap();
        assert!(record.is_active);
        assert!(!record.is_staff);
    }

    #[test]
    fn test_load_missing_file() {
        let err = UserDirectory::load(Path::new("/definitely/not/here/users.json")).unwrap_err();
        assert!(matches!(err, DirectoryError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = UserDirectory::load(file.path()).unwrap_err();
        assert!(matches!(err, DirectoryError::Parse { .. }));
    }
}
