//! Read-only principal store held in memory.
//!
//! Seeded once at startup from a JSON file, e.g.
//!
//! ```json
//! [{ "id": 1, "email": "ada@example.com", "passwordDigest": "$argon2id$..." }]
//! ```
//!
//! Digests are produced by the `hash-password` binary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, PasswordDigest, User, UserId};

/// Errors raised while loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("failed to read user seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a JSON array of user records.
    #[error("failed to parse user seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A record holds an invalid id, email, or digest.
    #[error("invalid user record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    /// Two records share an id.
    #[error("duplicate user id {id}")]
    DuplicateId { id: UserId },
    /// Two records share an email once lowercased.
    #[error("duplicate user email {email}")]
    DuplicateEmail { email: EmailAddress },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SeedRecord {
    id: i64,
    email: String,
    password_digest: String,
}

impl SeedRecord {
    fn into_user(self, index: usize) -> Result<User, SeedError> {
        let invalid = |reason: String| SeedError::InvalidRecord { index, reason };
        let id = UserId::new(self.id).map_err(|err| invalid(err.to_string()))?;
        let email = EmailAddress::new(&self.email).map_err(|err| invalid(err.to_string()))?;
        let digest =
            PasswordDigest::parse(self.password_digest).map_err(|err| invalid(err.to_string()))?;
        Ok(User::new(id, email, digest))
    }
}

/// [`UserRepository`] over a fixed set of principals.
///
/// # Examples
/// ```
/// use signin::domain::{EmailAddress, PasswordDigest, User, UserId};
/// use signin::outbound::InMemoryUserRepository;
///
/// let ada = User::new(
///     UserId::new(1).unwrap(),
///     EmailAddress::new("ada@example.com").unwrap(),
///     PasswordDigest::hash("secret").unwrap(),
/// );
/// let repo = InMemoryUserRepository::new(vec![ada]).unwrap();
/// assert_eq!(repo.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    by_id: Arc<HashMap<UserId, User>>,
    by_email: Arc<HashMap<EmailAddress, UserId>>,
}

impl InMemoryUserRepository {
    /// Index `users` by id and email.
    ///
    /// # Errors
    ///
    /// Rejects duplicate ids and duplicate emails.
    pub fn new(users: impl IntoIterator<Item = User>) -> Result<Self, SeedError> {
        let mut by_id = HashMap::new();
        let mut by_email = HashMap::new();
        for user in users {
            if by_email.contains_key(user.email()) {
                return Err(SeedError::DuplicateEmail {
                    email: user.email().clone(),
                });
            }
            if by_id.contains_key(&user.id()) {
                return Err(SeedError::DuplicateId { id: user.id() });
            }
            by_email.insert(user.email().clone(), user.id());
            by_id.insert(user.id(), user);
        }
        Ok(Self {
            by_id: Arc::new(by_id),
            by_email: Arc::new(by_email),
        })
    }

    /// Load principals from a JSON seed file.
    ///
    /// # Errors
    ///
    /// See [`SeedError`].
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<SeedRecord> =
            serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let users = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_user(index))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(users)
    }

    /// Number of stored principals.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when no principals are stored.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.by_id.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.by_id.get(id))
            .cloned())
    }
}
