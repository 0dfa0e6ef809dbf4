use crate::error::ScrapeResult;
use crate::models::MovieRow;

mod csv_file;
pub use csv_file::CsvStorage;

/// Final destination of a run's rows. Written exactly once.
pub trait Storage {
    /// Persist `rows` ordered by rank, returning how many were written.
    fn write_rows(&self, rows: Vec<MovieRow>) -> ScrapeResult<usize>;
}
