use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ScrapeResult;
use crate::models::{sort_by_rank, MovieRow};
use crate::storage::Storage;

const HEADER: [&str; 4] = ["Rank", "Title", "Year", "Rating"];

/// Comma-separated UTF-8 file with a `Rank,Title,Year,Rating` header.
/// Any existing file at the path is overwritten.
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for CsvStorage {
    fn write_rows(&self, mut rows: Vec<MovieRow>) -> ScrapeResult<usize> {
        sort_by_rank(&mut rows);

        // Header written by hand so an empty run still produces it.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(HEADER)?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", rows.len(), self.path.display());
        Ok(rows.len())
    }
}
