//! Record loading from JSON files.
//!
//! Each file holds one JSON array of rows. Non-string relational fields are
//! accepted and treated as empty; anything that is not valid JSON, or a row
//! without its identifier columns, fails the whole file.

use crate::models::{ReelRecord, UserRecord};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub fn load_users(path: impl AsRef<Path>) -> Result<Vec<UserRecord>> {
    load_records(path.as_ref(), "user")
}

pub fn load_reels(path: impl AsRef<Path>) -> Result<Vec<ReelRecord>> {
    load_records(path.as_ref(), "reel")
}

fn load_records<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} records at {}", kind, path.display()))?;

    let records: Vec<T> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {} records at {}", kind, path.display()))?;

    info!(path = %path.display(), kind, count = records.len(), "Records loaded");

    Ok(records)
}
