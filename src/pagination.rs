pub const QUESTIONS_PER_PAGE: u32 = 10;

/// A 1-indexed page of fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Returns `None` for page numbers below 1.
    pub fn new(number: i64) -> Option<Self> {
        Self::with_size(number, QUESTIONS_PER_PAGE)
    }

    pub fn with_size(number: i64, size: u32) -> Option<Self> {
        let number = u32::try_from(number).ok().filter(|&n| n >= 1)?;
        Some(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn limit(&self) -> u32 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }
}

/// Parses the `page` query parameter. Missing or non-numeric values fall
/// back to the first page.
pub fn parse_page_param(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offsets() {
        let first = Page::new(1).unwrap();
        assert_eq!(first.offset(), 0);
        assert_eq!(first.limit(), 10);

        let third = Page::new(3).unwrap();
        assert_eq!(third.offset(), 20);
        assert_eq!(third.number(), 3);
    }

    #[test]
    fn test_page_rejects_non_positive() {
        assert!(Page::new(0).is_none());
        assert!(Page::new(-2).is_none());
        assert!(Page::new(i64::MAX).is_none());
    }

    #[test]
    fn test_parse_page_param() {
        assert_eq!(parse_page_param(None), 1);
        assert_eq!(parse_page_param(Some("2")), 2);
        assert_eq!(parse_page_param(Some("abc")), 1);
        assert_eq!(parse_page_param(Some("-1")), -1);
    }
}
