/// Separator between the rank prefix and the title in a chart heading.
const RANK_SEPARATOR: char = '.';

/// Rank and title read from an item heading such as `"7. The Matrix"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTitle {
    pub rank: u32,
    pub title: String,
}

/// Split a heading into rank and title.
///
/// `position` is the item's 1-based place in the loaded list. It becomes the
/// rank when the heading has no separator, or when the text before the first
/// separator is not a positive integer (`"Mr. Smith Goes to Washington"`). In
/// both cases the whole trimmed heading is the title.
pub fn parse_heading(heading: &str, position: u32) -> RankedTitle {
    let heading = heading.trim();

    if let Some((prefix, rest)) = heading.split_once(RANK_SEPARATOR) {
        if let Some(rank) = parse_rank(prefix) {
            return RankedTitle {
                rank,
                title: rest.trim().to_string(),
            };
        }
    }

    RankedTitle {
        rank: position,
        title: heading.to_string(),
    }
}

fn parse_rank(prefix: &str) -> Option<u32> {
    prefix.trim().parse::<u32>().ok().filter(|rank| *rank >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_first_separator() {
        let parsed = parse_heading("7. The Matrix", 1);
        assert_eq!(parsed, RankedTitle { rank: 7, title: "The Matrix".to_string() });
    }

    #[test]
    fn keeps_later_separators_in_title() {
        let parsed = parse_heading(" 12.  Star Wars: Episode V. The Empire Strikes Back ", 40);
        assert_eq!(parsed.rank, 12);
        assert_eq!(parsed.title, "Star Wars: Episode V. The Empire Strikes Back");
    }

    #[test]
    fn no_separator_uses_position() {
        let parsed = parse_heading("Inception", 3);
        assert_eq!(parsed, RankedTitle { rank: 3, title: "Inception".to_string() });
    }

    #[test]
    fn non_numeric_prefix_uses_position_and_full_heading() {
        let parsed = parse_heading("Mr. Smith Goes to Washington", 9);
        assert_eq!(parsed.rank, 9);
        assert_eq!(parsed.title, "Mr. Smith Goes to Washington");
    }

    #[test]
    fn zero_rank_is_rejected() {
        let parsed = parse_heading("0. Nothing", 4);
        assert_eq!(parsed.rank, 4);
        assert_eq!(parsed.title, "0. Nothing");
    }

    #[test]
    fn empty_heading_keeps_position() {
        let parsed = parse_heading("   ", 2);
        assert_eq!(parsed, RankedTitle { rank: 2, title: String::new() });
    }
}
