//! services/api/src/adapters/json_store.rs
//!
//! This module contains the storage adapter, which is the concrete implementation
//! of the `LectureStore` port from the `core` crate. The whole collection lives in
//! a single JSON document, `{"lectures": [...]}`, read and rewritten wholesale.

use async_trait::async_trait;
use lecture_tracker_core::domain::{Lecture, LectureDocument};
use lecture_tracker_core::ports::{LectureStore, PortError, PortResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A file-backed store that implements the `LectureStore` port.
///
/// Holds only the path; every call goes back to disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a new `JsonFileStore`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

//=========================================================================================
// "Impure" On-Disk Record Structs
//=========================================================================================

#[derive(Serialize, Deserialize, Default)]
struct DocumentRecord {
    #[serde(default)]
    lectures: Vec<LectureRecord>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LectureRecord {
    id: u64,
    chapter: i64,
    #[serde(default)]
    verse_range: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    audio_url: String,
    #[serde(default)]
    listened: bool,
    #[serde(default)]
    bookmarked: bool,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    summary: String,
}

impl LectureRecord {
    fn to_domain(self) -> Lecture {
        Lecture {
            id: self.id,
            chapter: self.chapter,
            verse_range: self.verse_range,
            location: self.location,
            date: self.date,
            title: self.title,
            filename: self.filename,
            audio_url: self.audio_url,
            listened: self.listened,
            bookmarked: self.bookmarked,
            notes: self.notes,
            summary: self.summary,
        }
    }

    fn from_domain(lecture: &Lecture) -> Self {
        Self {
            id: lecture.id,
            chapter: lecture.chapter,
            verse_range: lecture.verse_range.clone(),
            location: lecture.location.clone(),
            date: lecture.date.clone(),
            title: lecture.title.clone(),
            filename: lecture.filename.clone(),
            audio_url: lecture.audio_url.clone(),
            listened: lecture.listened,
            bookmarked: lecture.bookmarked,
            notes: lecture.notes.clone(),
            summary: lecture.summary.clone(),
        }
    }
}

//=========================================================================================
// `LectureStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl LectureStore for JsonFileStore {
    /// A missing or empty file is an empty collection. Malformed JSON is a storage
    /// failure, so the next write cannot replace unreadable data with nothing.
    async fn load(&self) -> PortResult<LectureDocument> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No lecture file at {}, starting empty", self.path.display());
                return Ok(LectureDocument::default());
            }
            Err(e) => {
                return Err(PortError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if contents.trim().is_empty() {
            return Ok(LectureDocument::default());
        }

        let record: DocumentRecord = serde_json::from_str(&contents).map_err(|e| {
            PortError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;

        Ok(LectureDocument::new(
            record.lectures.into_iter().map(|r| r.to_domain()).collect(),
        ))
    }

    async fn persist(&self, document: &LectureDocument) -> PortResult<()> {
        let record = DocumentRecord {
            lectures: document.lectures.iter().map(LectureRecord::from_domain).collect(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| PortError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Storage(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            PortError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        debug!(
            "Wrote {} lectures to {}",
            document.lectures.len(),
            self.path.display()
        );
        Ok(())
    }
}
