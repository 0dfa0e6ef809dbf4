use once_cell::sync::Lazy;
use regex::Regex;

// 1900-2029
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(19\d{2}|20[0-2]\d)")
        .expect("Invalid year regex")
});

/// First year-like substring of `text`, if any.
pub fn find_year(text: &str) -> Option<u16> {
    YEAR_REGEX
        .find(text)
        .and_then(|m| m.as_str().parse::<u16>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_year_in_metadata() {
        assert_eq!(find_year("1994"), Some(1994));
        assert_eq!(find_year("2h 22m 2008 R"), Some(2008));
    }

    #[test]
    fn takes_first_match() {
        assert_eq!(find_year("The Godfather (1972) remastered 2022"), Some(1972));
    }

    #[test]
    fn ignores_out_of_range_years() {
        assert_eq!(find_year("1899"), None);
        assert_eq!(find_year("2030"), None);
        assert_eq!(find_year("2h 32m"), None);
    }

    #[test]
    fn matches_inside_longer_digit_runs() {
        assert_eq!(find_year("120034"), Some(2003));
    }
}
