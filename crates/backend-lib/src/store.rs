// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Storage abstraction with flat-file implementation.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use payments_common::{Payment, Role};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs as tokio_fs;
use uuid::Uuid;

use crate::error::AppError;

/// A stored credential record.
///
/// `password_hash` is a PHC string; the plaintext never reaches storage or
/// logs. The record is written once at registration and never updated by
/// this service afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Trait for storage backends
#[async_trait]
pub trait Store: Send + Sync {
    /// Create a credential record, failing with `DuplicateUsername` if the
    /// username is already taken. The uniqueness check and the insert are
    /// one atomic step.
    async fn create_user(&self, record: &UserRecord) -> Result<(), AppError>;

    /// Look up a credential record by username
    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, AppError>;

    /// Insert or replace a credential record (seeding only)
    async fn upsert_user(&self, record: &UserRecord) -> Result<(), AppError>;

    /// Persist a payment record, overwriting any previous version
    async fn store_payment(&self, payment: &Payment) -> Result<(), AppError>;

    /// Look up one payment by id
    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>, AppError>;

    /// List payments newest-first, capped at `limit`
    async fn list_payments(&self, limit: usize) -> Result<Vec<Payment>, AppError>;
}

/// Flat-file implementation of the Store trait.
///
/// One JSON file per entity under `users/` and `payments/`. Usernames are
/// safe as file names because the username alphabet is `[A-Za-z0-9_.-]`,
/// enforced before any store call.
#[derive(Clone)]
pub struct FlatFileStore {
    root: PathBuf,
}

impl FlatFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("users"))?;
        fs::create_dir_all(root.join("payments"))?;
        Ok(Self { root })
    }

    fn user_path(&self, username: &str) -> PathBuf {
        self.root.join("users").join(format!("{username}.json"))
    }

    fn payment_path(&self, id: Uuid) -> PathBuf {
        self.root.join("payments").join(format!("{id}.json"))
    }
}

#[async_trait]
impl Store for FlatFileStore {
    /// `create_new` makes the filesystem arbitrate concurrent duplicate
    /// registrations: exactly one writer wins, the rest see AlreadyExists.
    async fn create_user(&self, record: &UserRecord) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(record)?;
        let path = self.user_path(&record.username);

        let result = tokio_fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match result {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(AppError::DuplicateUsername);
            },
            Err(e) => return Err(AppError::Io(e)),
        };

        use tokio::io::AsyncWriteExt;
        file.write_all(&json).await?;
        Ok(())
    }

    async fn find_user(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        let path = self.user_path(username);
        match tokio_fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn upsert_user(&self, record: &UserRecord) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(record)?;
        tokio_fs::write(self.user_path(&record.username), json).await?;
        Ok(())
    }

    async fn store_payment(&self, payment: &Payment) -> Result<(), AppError> {
        let json = serde_json::to_vec_pretty(payment)?;
        tokio_fs::write(self.payment_path(payment.id), json).await?;
        Ok(())
    }

    async fn get_payment(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        match tokio_fs::read_to_string(self.payment_path(id)).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn list_payments(&self, limit: usize) -> Result<Vec<Payment>, AppError> {
        let mut payments = Vec::new();
        let mut entries = tokio_fs::read_dir(self.root.join("payments")).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let content = tokio_fs::read_to_string(entry.path()).await?;
            payments.push(serde_json::from_str::<Payment>(&content)?);
        }
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        payments.truncate(limit);
        Ok(payments)
    }
}
