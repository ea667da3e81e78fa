use std::collections::HashSet;

use tokio::sync::RwLock;

use super::seed::DemoData;
use super::Record;
use crate::models::{Site, Task, User};

/// Process-local store. Records keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    pub(super) sites: RwLock<Vec<Site>>,
    pub(super) users: RwLock<Vec<User>>,
    pub(super) tasks: RwLock<Vec<Task>>,
    pub(super) activities: RwLock<Vec<String>>,
    pub(super) read_notifications: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: DemoData) -> Self {
        Self {
            sites: RwLock::new(data.sites),
            users: RwLock::new(data.users),
            tasks: RwLock::new(data.tasks),
            activities: RwLock::new(data.activities),
            read_notifications: RwLock::new(HashSet::new()),
        }
    }

    pub(super) async fn list<T: Record>(&self) -> Vec<T> {
        T::table(self).read().await.clone()
    }

    pub(super) async fn get<T: Record>(&self, id: &str) -> Option<T> {
        T::table(self).read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub(super) async fn insert<T: Record>(&self, record: &T) -> bool {
        let mut table = T::table(self).write().await;
        if table.iter().any(|r| r.id() == record.id()) {
            return false;
        }
        table.push(record.clone());
        true
    }

    pub(super) async fn replace<T: Record>(&self, record: &T) -> bool {
        let mut table = T::table(self).write().await;
        match table.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                true
            }
            None => false,
        }
    }

    pub(super) async fn delete<T: Record>(&self, id: &str) -> bool {
        let mut table = T::table(self).write().await;
        let before = table.len();
        table.retain(|r| r.id() != id);
        table.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::task::tests::maintenance;
    use crate::store::Store;

    #[actix_web::test]
    async fn crud_round_trip() {
        let store = Store::Memory(MemoryStore::new());
        let task = maintenance("task-1", "2024-06-10", &["Mario"]);

        store.insert(&task).await.unwrap();
        assert!(matches!(
            store.insert(&task).await,
            Err(AppError::Validation(_))
        ));

        let mut changed = task.clone();
        changed.description = "changed".into();
        store.replace(&changed).await.unwrap();
        assert_eq!(store.get::<Task>("task-1").await.unwrap().description, "changed");

        store.delete::<Task>("task-1").await.unwrap();
        assert!(matches!(
            store.get::<Task>("task-1").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete::<Task>("task-1").await,
            Err(AppError::NotFound { .. })
        ));
        assert!(!store.exists::<Task>("task-1").await.unwrap());
    }

    #[actix_web::test]
    async fn tracks_read_notifications() {
        let store = Store::Memory(MemoryStore::new());
        store
            .mark_notifications_read(&["notif-a".to_string(), "notif-b".to_string()])
            .await
            .unwrap();
        let read = store.read_notification_ids().await.unwrap();
        assert!(read.contains("notif-a") && read.contains("notif-b"));
    }
}
