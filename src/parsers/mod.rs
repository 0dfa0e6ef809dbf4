pub mod rank;
pub mod rating;
pub mod year;

pub use rank::*;
pub use rating::*;
pub use year::*;

/// Collapse runs of whitespace into single spaces and trim the ends.
///
/// Input is DOM text, so entities are already decoded and must stay literal.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(collapse_whitespace("  Singin' in\n the   Rain "), "Singin' in the Rain");
    }

    #[test]
    fn leaves_entity_like_text_alone() {
        assert_eq!(collapse_whitespace("Tom &amp; Jerry"), "Tom &amp; Jerry");
    }
}
