/// Which end a bounded split starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitFrom {
    Left,
    Right,
}

/// Split `text` on `delimiter` into at most `expected_parts` pieces.
///
/// Pieces are always returned in left-to-right order. The flag is true only
/// when exactly `expected_parts` pieces came out; callers fall back to their
/// placeholder shape otherwise. Never fails, whatever the input looks like.
pub fn safe_split<'a>(
    text: &'a str,
    delimiter: &str,
    expected_parts: usize,
    from: SplitFrom,
) -> (Vec<&'a str>, bool) {
    let limit = expected_parts.max(1);
    if delimiter.is_empty() {
        return (vec![text], limit == 1);
    }

    let parts: Vec<&str> = match from {
        SplitFrom::Left => text.splitn(limit, delimiter).collect(),
        SplitFrom::Right => {
            let mut parts: Vec<&str> = text.rsplitn(limit, delimiter).collect();
            parts.reverse();
            parts
        }
    };

    let ok = parts.len() == expected_parts;
    (parts, ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_split_keeps_remainder_intact() {
        let (parts, ok) = safe_split("A B @ C @ D", " @ ", 2, SplitFrom::Left);
        assert!(ok);
        assert_eq!(parts, vec!["A B", "C @ D"]);
    }

    #[test]
    fn test_right_split_keeps_leading_words_together() {
        let (parts, ok) = safe_split("New York Over 24.5", " ", 3, SplitFrom::Right);
        assert!(ok);
        assert_eq!(parts, vec!["New York", "Over", "24.5"]);
    }

    #[test]
    fn test_short_input_reports_mismatch() {
        let (parts, ok) = safe_split("BOS", " ", 3, SplitFrom::Right);
        assert!(!ok);
        assert_eq!(parts, vec!["BOS"]);

        let (parts, ok) = safe_split("", " @ ", 2, SplitFrom::Left);
        assert!(!ok);
        assert_eq!(parts, vec![""]);
    }

    #[test]
    fn test_doubled_whitespace_stays_on_leading_piece() {
        let (parts, ok) = safe_split("Jones  LAL", " ", 2, SplitFrom::Right);
        assert!(ok);
        assert_eq!(parts, vec!["Jones ", "LAL"]);
    }

    #[test]
    fn test_zero_expected_parts_is_not_a_panic() {
        let (parts, ok) = safe_split("a b", " ", 0, SplitFrom::Left);
        assert_eq!(parts, vec!["a b"]);
        assert!(!ok);
    }
}
