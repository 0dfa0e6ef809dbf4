pub mod movie;

pub use movie::*;

/// Year written when no tier of the fallback chain matched.
pub const UNKNOWN_YEAR: u16 = 0;
/// Rating written when the rating element is missing or unparsable.
pub const UNKNOWN_RATING: f64 = 0.0;
