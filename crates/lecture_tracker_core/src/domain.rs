//! crates/lecture_tracker_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage or serialization format.

/// Represents a single audio lecture and the listener's progress on it.
///
/// Catalog fields (`chapter` through `audio_url`) are fixed at import time;
/// only the progress fields are changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecture {
    pub id: u64,
    pub chapter: i64,
    pub verse_range: String,
    pub location: String,
    pub date: String,
    pub title: String,
    pub filename: String,
    pub audio_url: String,
    pub listened: bool,
    pub bookmarked: bool,
    pub notes: String,
    pub summary: String,
}

impl Lecture {
    /// Applies every field present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: &LectureUpdate) {
        if let Some(listened) = update.listened {
            self.listened = listened;
        }
        if let Some(bookmarked) = update.bookmarked {
            self.bookmarked = bookmarked;
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
        if let Some(summary) = &update.summary {
            self.summary = summary.clone();
        }
    }
}

/// A partial update to the mutable fields of a lecture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureUpdate {
    pub listened: Option<bool>,
    pub bookmarked: Option<bool>,
    pub notes: Option<String>,
    pub summary: Option<String>,
}

impl LectureUpdate {
    /// An update that only replaces the summary.
    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listened.is_none()
            && self.bookmarked.is_none()
            && self.notes.is_none()
            && self.summary.is_none()
    }
}

/// The whole stored collection, read and written as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureDocument {
    pub lectures: Vec<Lecture>,
}

impl LectureDocument {
    pub fn new(lectures: Vec<Lecture>) -> Self {
        Self { lectures }
    }

    /// Returns the first lecture with the given id. Ids are unique, so there is at most one.
    pub fn find_by_id(&self, id: u64) -> Option<&Lecture> {
        self.lectures.iter().find(|l| l.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: u64) -> Option<&mut Lecture> {
        self.lectures.iter_mut().find(|l| l.id == id)
    }
}
