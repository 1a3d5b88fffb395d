//! Comment stripping for structural lines.
//!
//! Block comments (`/* ... */`) may open and close on one line or straddle
//! any number of lines, including block boundaries, so the "inside a
//! comment" flag is carried from line to line by the caller. Line comments
//! are whole lines starting with `//` and are recognised after stripping.

const OPEN: &str = "/*";
const CLOSE: &str = "*/";

/// Removes block-comment text from one line.
///
/// Takes the flag carried in from the previous line and returns the visible
/// text together with the flag to carry into the next one.
pub(crate) fn strip_block_comments(line: &str, mut in_comment: bool) -> (String, bool) {
    let mut visible = String::with_capacity(line.len());
    let mut rest = line;

    loop {
        if in_comment {
            match rest.find(CLOSE) {
                Some(end) => {
                    rest = &rest[end + CLOSE.len()..];
                    in_comment = false;
                }
                None => break,
            }
        } else {
            match rest.find(OPEN) {
                Some(start) => {
                    visible.push_str(&rest[..start]);
                    rest = &rest[start + OPEN.len()..];
                    in_comment = true;
                }
                None => {
                    visible.push_str(rest);
                    break;
                }
            }
        }
    }

    (visible, in_comment)
}

/// Returns `true` for a stripped, trimmed line that is a `//` comment.
pub(crate) fn is_line_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_passes_through() {
        assert_eq!(
            strip_block_comments("title: Hello", false),
            ("title: Hello".to_string(), false)
        );
    }

    #[test]
    fn test_inline_comment_is_removed() {
        assert_eq!(
            strip_block_comments("a: /* note */ 1", false),
            ("a:  1".to_string(), false)
        );
    }

    #[test]
    fn test_several_comments_on_one_line() {
        assert_eq!(
            strip_block_comments("x/*1*/y/*2*/z", false),
            ("xyz".to_string(), false)
        );
    }

    #[test]
    fn test_comment_carries_across_lines() {
        let (first, open) = strip_block_comments("a: 1 /* starts", false);
        assert_eq!(first, "a: 1 ");
        assert!(open);

        let (middle, open) = strip_block_comments("b: 2", open);
        assert_eq!(middle, "");
        assert!(open);

        let (last, open) = strip_block_comments("ends */ c: 3", open);
        assert_eq!(last, " c: 3");
        assert!(!open);
    }

    #[test]
    fn test_urls_are_not_line_comments() {
        let (line, _) = strip_block_comments("link: https://example.com", false);
        assert!(!is_line_comment(line.trim()));
        assert!(is_line_comment("// a note"));
    }
}
