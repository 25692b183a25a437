pub mod json_store;
pub mod summary_llm;

pub use json_store::JsonFileStore;
pub use summary_llm::{OpenAiSummaryAdapter, UnconfiguredSummaryProvider};
