//! crates/lecture_tracker_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like the lecture file
//! or the text-generation provider.

use async_trait::async_trait;

use crate::domain::{Lecture, LectureDocument, LectureUpdate};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., file I/O, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Summary provider failure: {0}")]
    Provider(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable storage for the whole lecture collection.
///
/// Implementors only provide whole-document `load` and `persist`. Every other
/// operation reloads the document first and, if it mutates, rewrites it in full.
/// Nothing serializes overlapping read-modify-write sequences, so the last
/// `persist` wins.
#[async_trait]
pub trait LectureStore: Send + Sync {
    /// Reads the current document. A store that holds nothing yet yields an empty document.
    async fn load(&self) -> PortResult<LectureDocument>;

    /// Overwrites the stored document with `document`.
    async fn persist(&self, document: &LectureDocument) -> PortResult<()>;

    async fn list_lectures(&self) -> PortResult<Vec<Lecture>> {
        Ok(self.load().await?.lectures)
    }

    async fn find_lecture(&self, id: u64) -> PortResult<Lecture> {
        self.load()
            .await?
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Lecture {} not found", id)))
    }

    /// Applies `update` to one lecture, persists the document and returns the updated record.
    async fn update_lecture(&self, id: u64, update: &LectureUpdate) -> PortResult<Lecture> {
        let mut document = self.load().await?;
        let lecture = document
            .find_by_id_mut(id)
            .ok_or_else(|| PortError::NotFound(format!("Lecture {} not found", id)))?;
        lecture.apply(update);
        let updated = lecture.clone();
        self.persist(&document).await?;
        Ok(updated)
    }

    /// Replaces the entire collection. Used by the catalog import.
    async fn replace_all(&self, lectures: Vec<Lecture>) -> PortResult<()> {
        self.persist(&LectureDocument::new(lectures)).await
    }
}

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Generates a text completion for `prompt`.
    async fn generate_summary(&self, prompt: &str) -> PortResult<String>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::tests::lecture;
    use std::sync::Mutex;

    /// Keeps the document in memory and counts writes.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub document: Mutex<LectureDocument>,
        pub writes: Mutex<usize>,
    }

    impl MemoryStore {
        pub(crate) fn with(lectures: Vec<Lecture>) -> Self {
            Self {
                document: Mutex::new(LectureDocument::new(lectures)),
                writes: Mutex::new(0),
            }
        }

        pub(crate) fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    #[async_trait]
    impl LectureStore for MemoryStore {
        async fn load(&self) -> PortResult<LectureDocument> {
            Ok(self.document.lock().unwrap().clone())
        }

        async fn persist(&self, document: &LectureDocument) -> PortResult<()> {
            *self.document.lock().unwrap() = document.clone();
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn find_lecture_reports_missing_id() {
        let store = MemoryStore::with(vec![lecture(1, 2)]);
        assert_eq!(store.find_lecture(1).await.unwrap().chapter, 2);
        assert!(matches!(
            store.find_lecture(999).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_lecture_persists_and_returns_record() {
        let store = MemoryStore::with(vec![lecture(1, 2), lecture(2, 2)]);
        let update = LectureUpdate {
            bookmarked: Some(true),
            notes: Some("chapter two intro".to_string()),
            ..LectureUpdate::default()
        };

        let updated = store.update_lecture(1, &update).await.unwrap();
        assert!(updated.bookmarked);
        assert_eq!(updated.notes, "chapter two intro");
        assert_eq!(store.writes(), 1);

        let all = store.list_lectures().await.unwrap();
        assert_eq!(all[0], updated);
        assert_eq!(all[1], lecture(2, 2));
    }

    #[tokio::test]
    async fn update_missing_lecture_does_not_write() {
        let store = MemoryStore::with(vec![lecture(1, 2)]);
        let result = store.update_lecture(5, &LectureUpdate::summary("x")).await;
        assert!(matches!(result, Err(PortError::NotFound(_))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn replace_all_overwrites_collection() {
        let store = MemoryStore::with(vec![lecture(1, 2), lecture(2, 2)]);
        store.replace_all(vec![lecture(1, 9)]).await.unwrap();
        let all = store.list_lectures().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].chapter, 9);
    }
}
