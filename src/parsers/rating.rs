use crate::models::UNKNOWN_RATING;

/// Parse a rating such as `"8.7"`; anything else yields the unknown sentinel.
pub fn parse_rating(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
        .unwrap_or(UNKNOWN_RATING)
}
