use serde::Serialize;

/// One chart entry as written to the output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRow {
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Rating")]
    pub rating: f64,
}

impl MovieRow {
    pub fn new(rank: u32, title: impl Into<String>, year: u16, rating: f64) -> Self {
        Self {
            rank,
            title: title.into(),
            year,
            rating,
        }
    }
}

/// Orders rows by rank. Stable, so duplicated ranks keep their input order.
pub fn sort_by_rank(rows: &mut [MovieRow]) {
    rows.sort_by_key(|row| row.rank);
}
