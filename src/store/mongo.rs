use std::collections::HashSet;

use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::{doc, Document};
use mongodb::{options::ClientOptions, Client, Collection, Database};

use super::Record;
use crate::error::AppError;

const ACTIVITIES: &str = "maintenance_activities";
const NOTIFICATION_READS: &str = "notification_reads";

/// MongoDB-backed store. Records are matched on their own `id` field, not
/// on `_id`.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn init(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let client_options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);
        info!("Using MongoDB database {}", db_name);
        Ok(MongoStore { db })
    }

    fn collection<T: Record>(&self) -> Collection<T> {
        self.db.collection::<T>(T::COLLECTION)
    }

    pub(super) async fn list<T: Record>(&self) -> Result<Vec<T>, AppError> {
        let records = self
            .collection::<T>()
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    pub(super) async fn get<T: Record>(&self, id: &str) -> Result<Option<T>, AppError> {
        Ok(self.collection::<T>().find_one(doc! { "id": id }).await?)
    }

    pub(super) async fn insert<T: Record>(&self, record: &T) -> Result<bool, AppError> {
        if self.get::<T>(record.id()).await?.is_some() {
            return Ok(false);
        }
        self.collection::<T>().insert_one(record).await?;
        Ok(true)
    }

    pub(super) async fn replace<T: Record>(&self, record: &T) -> Result<bool, AppError> {
        let res = self
            .collection::<T>()
            .replace_one(doc! { "id": record.id() }, record)
            .await?;
        Ok(res.matched_count > 0)
    }

    pub(super) async fn delete<T: Record>(&self, id: &str) -> Result<bool, AppError> {
        let res = self
            .collection::<T>()
            .delete_one(doc! { "id": id })
            .await?;
        Ok(res.deleted_count > 0)
    }

    pub(super) async fn maintenance_activities(&self) -> Result<Vec<String>, AppError> {
        let docs: Vec<Document> = self
            .db
            .collection::<Document>(ACTIVITIES)
            .find(doc! {})
            .sort(doc! { "position": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(docs
            .iter()
            .filter_map(|d| d.get_str("name").ok().map(String::from))
            .collect())
    }

    pub(super) async fn read_notification_ids(&self) -> Result<HashSet<String>, AppError> {
        let docs: Vec<Document> = self
            .db
            .collection::<Document>(NOTIFICATION_READS)
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        Ok(docs
            .iter()
            .filter_map(|d| d.get_str("id").ok().map(String::from))
            .collect())
    }

    pub(super) async fn mark_notifications_read(&self, ids: &[String]) -> Result<(), AppError> {
        let reads = self.db.collection::<Document>(NOTIFICATION_READS);
        for id in ids {
            reads
                .update_one(doc! { "id": id.as_str() }, doc! { "$set": { "id": id.as_str() } })
                .upsert(true)
                .await?;
        }
        Ok(())
    }

    pub(super) async fn clear_notification_read(&self, id: &str) -> Result<(), AppError> {
        self.db
            .collection::<Document>(NOTIFICATION_READS)
            .delete_one(doc! { "id": id })
            .await?;
        Ok(())
    }
}
