//! CSV export of the dataset, and the matching import.

use chrono::{DateTime, Utc};
use sa_core::{Error, Post, RawPost, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

pub const EXPORT_HEADER: [&str; 6] = ["date", "title", "score", "comments", "sentiment", "url"];

#[derive(Serialize)]
struct ExportRow<'a> {
    date: DateTime<Utc>,
    title: &'a str,
    score: u64,
    comments: u64,
    sentiment: Option<f64>,
    url: &'a str,
}

#[derive(Deserialize)]
struct ImportRow {
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    title: String,
    score: Option<i64>,
    comments: Option<i64>,
    #[serde(default)]
    url: String,
}

/// Writes one header row and one row per post.
pub fn write_csv<W: Write>(records: &[Post], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for post in records {
        writer.serialize(ExportRow {
            date: post.timestamp,
            title: &post.title,
            score: post.score,
            comments: post.comment_count,
            sentiment: post.sentiment(),
            url: &post.source_url,
        })?;
    }
    if records.is_empty() {
        writer.write_record(EXPORT_HEADER)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(records: &[Post]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(buffer)
}

pub fn export_to_path(records: &[Post], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(records, file)?;
    info!("💾 Exported {} posts to {}", records.len(), path.display());
    Ok(())
}

/// Parses a file in the export format. Sentiment is not read back; the
/// store derives it again on ingest.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawPost>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    for required in ["date", "title"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::validation(required, "column missing from CSV header"));
        }
    }

    reader
        .deserialize::<ImportRow>()
        .map(|row| {
            let row = row?;
            Ok(RawPost {
                timestamp: row.date,
                title: Some(row.title),
                body: None,
                score: row.score,
                comment_count: row.comments,
                source_url: Some(row.url),
            })
        })
        .collect()
}

pub fn import_from_path(path: &Path) -> Result<Vec<RawPost>> {
    let file = File::open(path)?;
    read_csv(file)
}
