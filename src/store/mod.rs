// src/store/mod.rs
//
// Persistence behind the scheduling API. Handlers only see `Store`; which
// backend sits behind it is decided once at startup from the config.

mod memory;
mod mongo;
pub mod seed;

use std::collections::HashSet;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Site, Task, User};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// A document kept in its own collection and addressed by a string id.
pub trait Record: Clone + Serialize + DeserializeOwned + Unpin + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Human-readable name used in not-found errors.
    const ENTITY: &'static str;

    fn id(&self) -> &str;

    fn table(store: &MemoryStore) -> &RwLock<Vec<Self>>;
}

impl Record for Site {
    const COLLECTION: &'static str = "sites";
    const ENTITY: &'static str = "Site";

    fn id(&self) -> &str {
        &self.id
    }

    fn table(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.sites
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const ENTITY: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn table(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.users
    }
}

impl Record for Task {
    const COLLECTION: &'static str = "tasks";
    const ENTITY: &'static str = "Task";

    fn id(&self) -> &str {
        &self.id
    }

    fn table(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.tasks
    }
}

pub enum Store {
    Memory(MemoryStore),
    Mongo(MongoStore),
}

impl Store {
    pub async fn list<T: Record>(&self) -> Result<Vec<T>, AppError> {
        match self {
            Self::Memory(mem) => Ok(mem.list().await),
            Self::Mongo(db) => db.list().await,
        }
    }

    pub async fn get<T: Record>(&self, id: &str) -> Result<T, AppError> {
        let found = match self {
            Self::Memory(mem) => mem.get(id).await,
            Self::Mongo(db) => db.get(id).await?,
        };
        found.ok_or_else(|| AppError::not_found(T::ENTITY, id))
    }

    pub async fn exists<T: Record>(&self, id: &str) -> Result<bool, AppError> {
        match self.get::<T>(id).await {
            Ok(_) => Ok(true),
            Err(AppError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Fails with a validation error when the id is already taken.
    pub async fn insert<T: Record>(&self, record: &T) -> Result<(), AppError> {
        let inserted = match self {
            Self::Memory(mem) => mem.insert(record).await,
            Self::Mongo(db) => db.insert(record).await?,
        };
        if inserted {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "{} {} already exists",
                T::ENTITY,
                record.id()
            )))
        }
    }

    pub async fn replace<T: Record>(&self, record: &T) -> Result<(), AppError> {
        let matched = match self {
            Self::Memory(mem) => mem.replace(record).await,
            Self::Mongo(db) => db.replace(record).await?,
        };
        if matched {
            Ok(())
        } else {
            Err(AppError::not_found(T::ENTITY, record.id()))
        }
    }

    pub async fn delete<T: Record>(&self, id: &str) -> Result<(), AppError> {
        let deleted = match self {
            Self::Memory(mem) => mem.delete::<T>(id).await,
            Self::Mongo(db) => db.delete::<T>(id).await?,
        };
        if deleted {
            Ok(())
        } else {
            Err(AppError::not_found(T::ENTITY, id))
        }
    }

    pub async fn maintenance_activities(&self) -> Result<Vec<String>, AppError> {
        match self {
            Self::Memory(mem) => Ok(mem.activities.read().await.clone()),
            Self::Mongo(db) => db.maintenance_activities().await,
        }
    }

    pub async fn read_notification_ids(&self) -> Result<HashSet<String>, AppError> {
        match self {
            Self::Memory(mem) => Ok(mem.read_notifications.read().await.clone()),
            Self::Mongo(db) => db.read_notification_ids().await,
        }
    }

    pub async fn mark_notifications_read(&self, ids: &[String]) -> Result<(), AppError> {
        match self {
            Self::Memory(mem) => {
                mem.read_notifications
                    .write()
                    .await
                    .extend(ids.iter().cloned());
                Ok(())
            }
            Self::Mongo(db) => db.mark_notifications_read(ids).await,
        }
    }

    pub async fn clear_notification_read(&self, id: &str) -> Result<(), AppError> {
        match self {
            Self::Memory(mem) => {
                mem.read_notifications.write().await.remove(id);
                Ok(())
            }
            Self::Mongo(db) => db.clear_notification_read(id).await,
        }
    }
}
