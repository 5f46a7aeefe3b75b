// src/core/display/wrap.rs
//! Fixed-width line splitting for tree output.
//!
//! Lines are cut at exact character counts, ignoring word boundaries, and
//! every continuation line repeats the branch prefix so the vertical bars of
//! open ancestors stay aligned.

/// Connector of a node that has later siblings
pub const BRANCH: &str = "+ ";
/// Connector of the last child
pub const LAST_BRANCH: &str = "` ";
/// Prefix segment for a level whose subtree continues below
pub const OPEN_LEVEL: &str = "| ";
/// Prefix segment for a level whose subtree is finished
pub const CLOSED_LEVEL: &str = "  ";

/// What replaces a node's connector on its continuation lines
pub fn continuation_of(connector: &str) -> String {
    match connector {
        BRANCH => OPEN_LEVEL.to_string(),
        LAST_BRANCH => CLOSED_LEVEL.to_string(),
        other => " ".repeat(other.chars().count()),
    }
}

/// Split `connector + content` into lines at most `width` characters wide.
///
/// Widths of 0 and 1 disable wrapping. Each line carries at least one
/// character of text, even when the prefix alone is wider than `width`.
pub fn wrap(prefix: &str, connector: &str, content: &str, width: usize) -> Vec<String> {
    if width <= 1 {
        return vec![format!("{}{}{}", prefix, connector, content)];
    }

    let text = format!("{}{}", connector, content);
    let continuation = format!("{}{}", prefix, continuation_of(connector));

    let mut lines = Vec::new();
    let mut line_prefix = prefix;
    let mut rest = text.as_str();

    loop {
        let budget = width.saturating_sub(line_prefix.chars().count()).max(1);
        let (head, tail) = split_at_char(rest, budget);
        lines.push(format!("{}{}", line_prefix, head));

        if tail.is_empty() {
            break;
        }
        rest = tail;
        line_prefix = &continuation;
    }

    lines
}

fn split_at_char(s: &str, count: usize) -> (&str, &str) {
    match s.char_indices().nth(count) {
        Some((offset, _)) => s.split_at(offset),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_widths_do_not_wrap() {
        for width in [0, 1] {
            let lines = wrap("| | ", "+ ", "fib<1> (Memoization)", width);
            assert_eq!(lines, vec!["| | + fib<1> (Memoization)".to_string()]);
        }
    }

    #[test]
    fn test_short_line_is_untouched() {
        assert_eq!(
            wrap("", "+ ", "fib<5> (Memoization)", 25),
            vec!["+ fib<5> (Memoization)"]
        );
    }

    #[test]
    fn test_wraps_with_open_branch() {
        assert_eq!(
            wrap("", "+ ", "fib<5> (TemplateInstantiation)", 25),
            vec!["+ fib<5> (TemplateInstant", "| iation)"]
        );
        assert_eq!(
            wrap("| | ", "+ ", "fib<1> (Memoization)", 25),
            vec!["| | + fib<1> (Memoization", "| | | )"]
        );
    }

    #[test]
    fn test_wraps_with_last_branch() {
        assert_eq!(
            wrap("| |   ", "` ", "fib<1> (Memoization)", 25),
            vec!["| |   ` fib<1> (Memoizati", "| |     on)"]
        );
    }

    #[test]
    fn test_long_text_spans_many_lines() {
        let lines = wrap("", "` ", "abcdefghij", 4);
        assert_eq!(lines, vec!["` ab", "  cd", "  ef", "  gh", "  ij"]);
    }

    #[test]
    fn test_prefix_wider_than_width_still_progresses() {
        let lines = wrap("| | | ", "+ ", "ab", 3);
        assert_eq!(lines, vec!["| | | +", "| | | |  ", "| | | | a", "| | | | b"]);
    }

    #[test]
    fn test_slices_reassemble_original_text() {
        let prefix = "|   | ";
        let connector = "` ";
        let content = "std::integral_constant<int, 42> (TemplateInstantiation)";

        for width in 2..80 {
            let lines = wrap(prefix, connector, content, width);
            let continuation = format!("{}{}", prefix, continuation_of(connector));

            let mut rebuilt = String::new();
            for (i, line) in lines.iter().enumerate() {
                let stripped = if i == 0 {
                    line.strip_prefix(prefix)
                } else {
                    line.strip_prefix(continuation.as_str())
                };
                rebuilt.push_str(stripped.unwrap());
            }
            assert_eq!(rebuilt, format!("{}{}", connector, content), "width {}", width);
        }
    }

    #[test]
    fn test_lines_fit_width_when_possible() {
        for line in wrap("| ", "+ ", "fib<3> (TemplateInstantiation)", 25) {
            assert!(line.chars().count() <= 25);
        }
    }

    #[test]
    fn test_cuts_on_char_boundaries() {
        let lines = wrap("", "` ", "äöüß", 3);
        assert_eq!(lines, vec!["` ä", "  ö", "  ü", "  ß"]);
    }

    #[test]
    fn test_empty_content_yields_one_line() {
        assert_eq!(wrap("| ", "` ", "", 10), vec!["| ` "]);
        assert_eq!(wrap("", "", "", 10), vec![""]);
    }
}
