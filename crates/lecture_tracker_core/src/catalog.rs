//! crates/lecture_tracker_core/src/catalog.rs
//!
//! Turns rows of the external lecture catalog into the initial lecture collection.

use crate::domain::Lecture;

/// Default location of the chapter folders holding the audio files.
pub const DEFAULT_AUDIO_BASE_URL: &str = "https://audio.iskcondesiretree.com/01_-_Srila_Prabhupada/01_-_Lectures/01_-_English/01_-_Topic_wise/Bhagavad_Gita";

/// One row of the catalog, as read from the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub chapter: String,
    pub filename: String,
}

/// The descriptive parts encoded in a catalog filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameParts {
    pub verse_range: String,
    pub location: String,
    pub date: String,
    pub title: String,
}

/// Splits `"<index> <prefix> <verseRange> <location> <date> <title...>"`.
///
/// The first two tokens carry no information. Missing tokens become empty strings.
pub fn parse_filename(filename: &str) -> FilenameParts {
    let parts: Vec<&str> = filename.split(' ').collect();
    let token = |i: usize| parts.get(i).map(|s| s.to_string()).unwrap_or_default();

    FilenameParts {
        verse_range: token(2),
        location: token(3),
        date: token(4),
        title: parts.get(5..).map(|rest| rest.join(" ")).unwrap_or_default(),
    }
}

/// `<base>/Chapter-<NN>/<filename with underscores>.mp3`
pub fn audio_url(base_url: &str, chapter: i64, filename: &str) -> String {
    format!(
        "{}/Chapter-{:02}/{}.mp3",
        base_url.trim_end_matches('/'),
        chapter,
        filename.replace(' ', "_")
    )
}

/// Builds the lecture collection from catalog rows.
///
/// Rows with a blank filename or a chapter that is not an integer are skipped.
/// Surviving rows get ids `1..=n` in order, with progress fields cleared.
pub fn lectures_from_rows<I>(rows: I, base_url: &str) -> Vec<Lecture>
where
    I: IntoIterator<Item = CatalogRow>,
{
    rows.into_iter()
        .filter_map(|row| {
            let filename = row.filename.trim();
            if filename.is_empty() {
                return None;
            }
            let chapter = row.chapter.trim().parse::<i64>().ok()?;
            Some((chapter, filename.to_string()))
        })
        .enumerate()
        .map(|(index, (chapter, filename))| {
            let parts = parse_filename(&filename);
            Lecture {
                id: index as u64 + 1,
                chapter,
                verse_range: parts.verse_range,
                location: parts.location,
                date: parts.date,
                title: parts.title,
                audio_url: audio_url(base_url, chapter, &filename),
                filename,
                listened: false,
                bookmarked: false,
                notes: String::new(),
                summary: String::new(),
            }
        })
        .collect()
}
