//! Content line folding (RFC 5545 §3.1).

/// Default maximum line length in octets (not characters).
const MAX_LINE_OCTETS: usize = 75;

/// Folds a line at the default 75-octet width.
///
/// Lines longer than the width are folded by inserting CRLF + space.
#[must_use]
pub fn fold_line(line: &str) -> String {
    fold_line_width(line, MAX_LINE_OCTETS)
}

/// Folds a line at an arbitrary width (octets).
///
/// Never splits a UTF-8 sequence or a backslash escape pair, so a fold point
/// can never turn `\n` into a dangling backslash. Every segment carries at
/// least one unit even when the unit alone exceeds the width, which keeps
/// `unfold(fold(s, w)) == s` for any `w >= 1`.
#[must_use]
pub fn fold_line_width(line: &str, width: usize) -> String {
    let width = width.max(1);
    if line.len() <= width {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + (line.len() / width) * 3);
    let mut current_len = 0;
    let mut first_segment = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        // A backslash and its escaped character move as one unit
        let mut unit = String::with_capacity(8);
        unit.push(c);
        if c == '\\'
            && let Some(&next) = chars.peek()
        {
            unit.push(next);
            chars.next();
        }

        let effective_max = if first_segment {
            width
        } else {
            // Continuation lines spend one octet on the leading space
            width.saturating_sub(1).max(1)
        };

        if current_len > 0 && current_len + unit.len() > effective_max {
            result.push_str("\r\n ");
            current_len = 0;
            first_segment = false;
        }

        result.push_str(&unit);
        current_len += unit.len();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::parse::unfold;

    #[test]
    fn short_line_unchanged() {
        let line = "SUMMARY:Standup";
        assert_eq!(fold_line(line), line);
    }

    #[test]
    fn fold_at_75_octets() {
        let line = format!("SUMMARY:{}", "X".repeat(100));
        let folded = fold_line(&line);
        assert!(folded.contains("\r\n "));

        let first_line: &str = folded.split("\r\n").next().unwrap();
        assert_eq!(first_line.len(), 75);
        for part in folded.split("\r\n ").skip(1) {
            assert!(part.len() <= 74);
        }
    }

    #[test]
    fn fold_respects_utf8() {
        // Each 日 is 3 bytes
        let line = format!("NOTE:{}", "日".repeat(40));
        let folded = fold_line(&line);
        for part in folded.split("\r\n ") {
            assert!(part.len() <= 75);
            assert!(part.is_char_boundary(part.len()));
        }
        assert_eq!(unfold(&folded), line);
    }

    #[test]
    fn fold_never_splits_escape_pair() {
        // Position a \n escape across the 75-octet boundary
        let line = format!("DESCRIPTION:{}\\nrest of text", "a".repeat(62));
        let folded = fold_line(&line);
        for part in folded.split("\r\n ") {
            // No segment may end in an odd backslash run
            let trailing = part.chars().rev().take_while(|&c| c == '\\').count();
            assert_eq!(trailing % 2, 0, "segment ends mid-escape: {part:?}");
        }
        assert_eq!(unfold(&folded), line);
    }

    #[test]
    fn fold_unfold_round_trip_at_small_widths() {
        let line = "SUMMARY:grüße\\, 日本 text with escapes\\n and more";
        for width in [1, 2, 5, 75] {
            let folded = fold_line_width(line, width);
            assert_eq!(unfold(&folded), line, "width {width}");
        }
    }

    #[test]
    fn fold_multiple_times() {
        let line = "X".repeat(200);
        let folded = fold_line(&line);
        assert!(folded.matches("\r\n ").count() >= 2);
        assert_eq!(unfold(&folded), line);
    }
}
