//! In-memory page slicing for the question list.

/// Number of questions returned per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Page used when the `page` query parameter is absent or unparseable.
pub const DEFAULT_PAGE: i64 = 1;

/// Parse a raw `page` query value, falling back to [`DEFAULT_PAGE`].
///
/// Only the parse failure falls back; zero and negative pages are passed
/// through and simply select an empty slice in [`paginate`].
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE)
}

/// Return the `[(page - 1) * per_page, page * per_page)` window of `items`.
///
/// Pages outside the available range (including `page < 1`) yield an empty
/// slice rather than an error.
pub fn paginate<T>(items: &[T], page: i64, per_page: usize) -> &[T] {
    if page < 1 || per_page == 0 {
        return &[];
    }

    let Ok(index) = usize::try_from(page - 1) else {
        return &[];
    };
    let Some(start) = index.checked_mul(per_page) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }

    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_holds_ten_items() {
        let items = numbers(25);
        assert_eq!(paginate(&items, 1, QUESTIONS_PER_PAGE), &items[0..10]);
    }

    #[test]
    fn last_page_is_partial() {
        let items = numbers(25);
        assert_eq!(paginate(&items, 3, QUESTIONS_PER_PAGE), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items = numbers(25);
        assert!(paginate(&items, 4, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(&items, i64::MAX, QUESTIONS_PER_PAGE).is_empty());
    }

    #[test]
    fn zero_and_negative_pages_are_empty() {
        let items = numbers(25);
        assert!(paginate(&items, 0, QUESTIONS_PER_PAGE).is_empty());
        assert!(paginate(&items, -3, QUESTIONS_PER_PAGE).is_empty());
    }

    #[test]
    fn empty_input_is_empty() {
        let items: Vec<usize> = Vec::new();
        assert!(paginate(&items, 1, QUESTIONS_PER_PAGE).is_empty());
    }

    #[test]
    fn parse_page_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("")), 1);
    }

    #[test]
    fn parse_page_keeps_numeric_values() {
        assert_eq!(parse_page(Some("2")), 2);
        assert_eq!(parse_page(Some("0")), 0);
        assert_eq!(parse_page(Some("-1")), -1);
    }
}
