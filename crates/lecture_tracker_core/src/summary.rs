//! crates/lecture_tracker_core/src/summary.rs
//!
//! Builds the summarization prompt for a lecture and records the generated
//! summary back into the store.

use crate::domain::{Lecture, LectureUpdate};
use crate::ports::{LectureStore, PortError, PortResult, SummaryProvider};

const SUMMARY_INSTRUCTIONS: &str = "You are a devotional assistant who summarizes Srila Prabhupada's Bhagavad Gita lectures in a respectful and concise way.";

// No audio transcription exists yet; the prompt carries this line in place of the transcript.
const PLACEHOLDER_CONTENT: &str = "Simulated transcript from Srila Prabhupada's lecture.";

/// Renders the fixed summarization prompt for `lecture`.
pub fn build_summary_prompt(lecture: &Lecture) -> String {
    format!(
        "{}\nSummarize this:\n\nLecture title: {}\nChapter: {}\nContent: {}",
        SUMMARY_INSTRUCTIONS, lecture.title, lecture.chapter, PLACEHOLDER_CONTENT
    )
}

/// Generates a summary for lecture `id` and stores it in the lecture's `summary` field.
///
/// Returns `PortError::NotFound` when the lecture does not exist and passes
/// provider failures through untouched, in which case nothing is written.
/// The document is reloaded after the provider answers, so edits made while
/// waiting on it survive.
pub async fn summarize_lecture(
    store: &dyn LectureStore,
    provider: &dyn SummaryProvider,
    id: u64,
) -> PortResult<String> {
    let lecture = store.find_lecture(id).await?;
    let prompt = build_summary_prompt(&lecture);

    let summary = provider
        .generate_summary(&prompt)
        .await
        .map_err(|e| match e {
            PortError::Provider(_) => e,
            other => PortError::Provider(other.to_string()),
        })?;

    store
        .update_lecture(id, &LectureUpdate::summary(summary.clone()))
        .await?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tests::lecture;
    use crate::ports::tests::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedProvider {
        reply: PortResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(PortError::Provider("quota exceeded".to_string())),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SummaryProvider for FixedProvider {
        async fn generate_summary(&self, prompt: &str) -> PortResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(PortError::Provider(e.to_string())),
            }
        }
    }

    #[test]
    fn prompt_embeds_title_and_chapter() {
        let mut l = lecture(1, 2);
        l.title = "The Eternal Soul".to_string();
        let prompt = build_summary_prompt(&l);

        assert!(prompt.starts_with(SUMMARY_INSTRUCTIONS));
        assert!(prompt.contains("Lecture title: The Eternal Soul\n"));
        assert!(prompt.contains("Chapter: 2\n"));
        assert!(prompt.ends_with(PLACEHOLDER_CONTENT));
    }

    #[tokio::test]
    async fn summary_is_persisted_as_returned() {
        let store = MemoryStore::with(vec![lecture(1, 2)]);
        let provider = FixedProvider::replying("A short summary.\n\n* Point one\n");

        let summary = summarize_lecture(&store, &provider, 1).await.unwrap();

        assert_eq!(summary, "A short summary.\n\n* Point one\n");
        assert_eq!(store.find_lecture(1).await.unwrap().summary, summary);
        assert_eq!(provider.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_lecture_never_reaches_provider() {
        let store = MemoryStore::with(vec![lecture(1, 2)]);
        let provider = FixedProvider::replying("unused");

        let result = summarize_lecture(&store, &provider, 999).await;

        assert!(matches!(result, Err(PortError::NotFound(_))));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn provider_failure_leaves_record_unchanged() {
        let mut existing = lecture(1, 2);
        existing.summary = "previous".to_string();
        let store = MemoryStore::with(vec![existing.clone()]);

        let result = summarize_lecture(&store, &FixedProvider::failing(), 1).await;

        assert!(matches!(result, Err(PortError::Provider(_))));
        assert_eq!(store.writes(), 0);
        assert_eq!(store.find_lecture(1).await.unwrap(), existing);
    }
}
