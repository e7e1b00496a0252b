//! Local reference table sources.
//!
//! Each kingdom ships one CSV table (`<Kingdom>_Reference.csv`). Tables
//! are read fully into memory when the source is built. A table that
//! cannot be read disables the source: the problem is logged once and
//! every query returns "no result".

pub mod itis;
pub mod mycobank;

use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::errors::AlignmentFailure;

pub use itis::ItisLocalSource;
pub use mycobank::MycobankLocalSource;

/// Read every row of a headed CSV file. Columns not named by `T` are
/// ignored.
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AlignmentFailure> {
    let unreadable = |e: csv::Error| {
        AlignmentFailure::Configuration(format!("{}: {e}", path.display()))
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(unreadable)
}

/// Index rows by key, keeping the first row seen for each key.
pub(crate) fn index_first<K, T, F>(rows: &[T], key: F) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        index.entry(key(row)).or_insert(position);
    }
    index
}
