use thiserror::Error;

/// Upper bound on the number of pages a single expression may expand to.
pub const MAX_EXPANDED_PAGES: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Empty page range")]
    Empty,

    #[error("Invalid page number: {0:?}")]
    InvalidNumber(String),

    #[error("Invalid page range: {0:?}")]
    Malformed(String),

    #[error("Page numbers must be >= 1 (got {0:?})")]
    ZeroPage(String),

    #[error("Page range {0:?} runs backwards; write it as low-high")]
    Descending(String),

    #[error("Page range expands to more than {MAX_EXPANDED_PAGES} pages")]
    TooLarge,
}

/// A closed interval of 1-based page numbers, `first <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

impl PageRange {
    /// Parse a single token like "7" or "1-5"
    pub fn parse(s: &str) -> Result<Self, RangeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RangeError::Empty);
        }

        let mut parts = s.split('-');
        let first_str = parts.next().unwrap_or_default();
        let last_str = parts.next();
        if parts.next().is_some() {
            return Err(RangeError::Malformed(s.to_string()));
        }

        // "-5" would otherwise read as an open-ended range
        if first_str.trim().is_empty() {
            return Err(RangeError::Malformed(s.to_string()));
        }

        let first = parse_page_number(first_str)?;
        let last = match last_str {
            Some(last_str) => parse_page_number(last_str)?,
            None => first,
        };

        if first == 0 || last == 0 {
            return Err(RangeError::ZeroPage(s.to_string()));
        }
        if first > last {
            return Err(RangeError::Descending(s.to_string()));
        }

        Ok(PageRange { first, last })
    }

    pub fn span(&self) -> u64 {
        u64::from(self.last - self.first) + 1
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

fn parse_page_number(s: &str) -> Result<u32, RangeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(RangeError::InvalidNumber(s.to_string()));
    }
    s.parse::<u32>()
        .map_err(|_| RangeError::InvalidNumber(s.to_string()))
}

/// Parse a comma-separated list of page ranges like "1-3,4,7-9"
pub fn parse_page_ranges(s: &str) -> Result<Vec<PageRange>, RangeError> {
    if s.trim().is_empty() {
        return Err(RangeError::Empty);
    }
    s.split(',').map(PageRange::parse).collect()
}

/// Flatten a page range expression into 1-based page numbers, in the order
/// written. Duplicates are kept.
pub fn parse_range(s: &str) -> Result<Vec<u32>, RangeError> {
    let ranges = parse_page_ranges(s)?;

    let total: u64 = ranges.iter().map(PageRange::span).sum();
    if total > MAX_EXPANDED_PAGES {
        return Err(RangeError::TooLarge);
    }

    let mut pages = Vec::with_capacity(total as usize);
    for range in ranges {
        pages.extend(range.pages());
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        assert_eq!(parse_range("7").unwrap(), vec![7]);
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(parse_range("2-2").unwrap(), vec![2]);
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(parse_range("1-3,5").unwrap(), vec![1, 2, 3, 5]);
        assert_eq!(
            parse_range("1-3,4,7-9").unwrap(),
            vec![1, 2, 3, 4, 7, 8, 9]
        );
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        assert_eq!(parse_range("5,1-2,2").unwrap(), vec![5, 1, 2, 2]);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(parse_range(" 1 - 3 , 6 ").unwrap(), vec![1, 2, 3, 6]);
    }

    #[test]
    fn test_length_matches_interval_spans() {
        for expr in ["1-3,5", "10-20,1,1,4-4", "2-9,3-7"] {
            let expected: u64 = parse_page_ranges(expr)
                .unwrap()
                .iter()
                .map(|r| u64::from(r.last - r.first + 1))
                .sum();
            assert_eq!(parse_range(expr).unwrap().len() as u64, expected, "{expr}");
        }
    }

    #[test]
    fn test_non_integer_token() {
        assert_eq!(
            parse_range("1-3,a"),
            Err(RangeError::InvalidNumber("a".into()))
        );
        assert!(parse_range("1.5").is_err());
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(parse_range(""), Err(RangeError::Empty));
        assert_eq!(parse_range("1,,2"), Err(RangeError::Empty));
        assert_eq!(parse_range("1,"), Err(RangeError::Empty));
        assert_eq!(parse_range("-5"), Err(RangeError::Malformed("-5".into())));
        assert_eq!(
            parse_range("1-2-3"),
            Err(RangeError::Malformed("1-2-3".into()))
        );
        assert_eq!(parse_range("3-"), Err(RangeError::InvalidNumber("".into())));
    }

    #[test]
    fn test_zero_page_rejected() {
        assert_eq!(parse_range("0-3"), Err(RangeError::ZeroPage("0-3".into())));
        assert_eq!(parse_range("0"), Err(RangeError::ZeroPage("0".into())));
    }

    #[test]
    fn test_descending_range_rejected() {
        assert_eq!(
            parse_range("5-2"),
            Err(RangeError::Descending("5-2".into()))
        );
    }

    #[test]
    fn test_huge_range_rejected() {
        assert_eq!(parse_range("1-4000000000"), Err(RangeError::TooLarge));
    }
}
