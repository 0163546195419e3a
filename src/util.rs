use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max` terminal columns, ending in "..." when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }

    if s.width() <= max {
        return s.to_string();
    }

    if max <= 3 {
        return take_columns(s, max);
    }

    format!("{}...", take_columns(s, max - 3))
}

fn take_columns(s: &str, columns: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("prod", 10), "prod");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("production-eu-west", 10), "product...");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(truncate("環境環境環境", 7), "環境...");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
