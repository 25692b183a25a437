//! services/api/src/bin/seed.rs
//!
//! Imports the lecture catalog CSV into the lecture store, replacing whatever
//! the store held before.

use api_lib::{adapters::JsonFileStore, error::ApiError};
use clap::Parser;
use lecture_tracker_core::{
    catalog::{lectures_from_rows, CatalogRow, DEFAULT_AUDIO_BASE_URL},
    ports::LectureStore,
};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(about = "Seed the lecture store from the catalog CSV")]
struct Args {
    /// Catalog file with `Chapter` and `Filename` columns.
    #[arg(long, default_value = "data/prabhupada_bg_lectures.csv")]
    input: PathBuf,

    /// Lecture store to overwrite.
    #[arg(long, env = "LECTURES_PATH", default_value = "data/lectures.json")]
    store: PathBuf,

    /// Folder URL under which the `Chapter-NN` audio folders live.
    #[arg(long, env = "AUDIO_BASE_URL", default_value = DEFAULT_AUDIO_BASE_URL)]
    audio_base_url: String,
}

/// A raw catalog row. Other columns in the file are ignored.
#[derive(Deserialize)]
struct CsvRow {
    #[serde(rename = "Chapter", default)]
    chapter: String,
    #[serde(rename = "Filename", default)]
    filename: String,
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new("info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut reader = csv::Reader::from_path(&args.input)?;
    let rows = reader
        .deserialize::<CsvRow>()
        .map(|row| {
            row.map(|r| CatalogRow {
                chapter: r.chapter,
                filename: r.filename,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let row_count = rows.len();
    let lectures = lectures_from_rows(rows, &args.audio_base_url);
    if lectures.len() < row_count {
        warn!(
            "Skipped {} catalog rows without a filename or numeric chapter",
            row_count - lectures.len()
        );
    }

    let count = lectures.len();
    JsonFileStore::new(&args.store).replace_all(lectures).await?;
    info!("Seeded {} lectures to {}", count, args.store.display());

    Ok(())
}
