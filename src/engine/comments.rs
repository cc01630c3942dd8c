//! End-of-line annotations for applied fixes, and their removal.

use crate::issue::COMMENT_MARKER;
use std::collections::BTreeMap;

/// Annotate `css` with block comments, keyed by 1-based line number.
///
/// Lines are processed bottom-up. Keys past the end of the text are
/// ignored.
pub fn inject_comments(css: &str, comments: &BTreeMap<usize, Vec<String>>) -> String {
    let mut lines: Vec<String> = css.split('\n').map(str::to_string).collect();

    for (&line, texts) in comments.iter().rev() {
        match line.checked_sub(1).and_then(|i| lines.get_mut(i)) {
            Some(slot) => *slot = annotate_line(slot, texts),
            None => log::debug!("comment for line {line} is past the end of the text"),
        }
    }

    lines.join("\n")
}

/// Insert `/* text */` for each comment after the line's last top-level
/// `;`, before a trailing `}`, or at the end of the line's content.
pub fn annotate_line(line: &str, comments: &[String]) -> String {
    if comments.is_empty() {
        return line.to_string();
    }

    // CRLF input keeps its line ending
    let (line, cr) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };

    let (head, tail) = line.split_at(insertion_point(line));
    let mut out = String::with_capacity(line.len() + comments.len() * 32);
    out.push_str(head);
    if !head.is_empty() && !head.ends_with(char::is_whitespace) {
        out.push(' ');
    }

    let blocks: Vec<String> = comments
        .iter()
        .map(|text| format!("/* {} */", sanitize(text)))
        .collect();
    out.push_str(&blocks.join(" "));

    let rest = tail.trim_start();
    if !rest.is_empty() {
        out.push(' ');
        out.push_str(rest);
    }
    out.push_str(cr);
    out
}

/// Comment text that cannot terminate its own block.
fn sanitize(text: &str) -> String {
    text.replace("*/", "* /")
}

fn insertion_point(line: &str) -> usize {
    let mut last_semicolon = None;
    let mut quote = None;
    let mut escaped = false;
    let mut in_comment = false;

    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if in_comment {
            if c == '*' && chars.peek().is_some_and(|&(_, next)| next == '/') {
                chars.next();
                in_comment = false;
            }
            continue;
        }
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '/' if chars.peek().is_some_and(|&(_, next)| next == '*') => {
                chars.next();
                in_comment = true;
            }
            ';' => last_semicolon = Some(i),
            _ => {}
        }
    }

    if let Some(i) = last_semicolon {
        return i + 1;
    }
    let trimmed = line.trim_end();
    if trimmed.ends_with('}') {
        trimmed.len() - 1
    } else {
        trimmed.len()
    }
}

/// Remove every tool-authored `/* cssreview: ... */` block together with
/// the spaces and tabs in front of it. Other comments and string contents
/// are left untouched.
pub fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;

    while let Some(c) = rest.chars().next() {
        match c {
            '"' | '\'' => {
                let len = quoted_len(rest, c);
                out.push_str(&rest[..len]);
                rest = &rest[len..];
            }
            '/' if rest.starts_with("/*") => {
                let Some(close) = rest[2..].find("*/") else {
                    out.push_str(rest);
                    break;
                };
                let block_len = close + 4;
                if rest[2..].trim_start().starts_with(COMMENT_MARKER) {
                    let kept = out.trim_end_matches([' ', '\t']).len();
                    out.truncate(kept);
                } else {
                    out.push_str(&rest[..block_len]);
                }
                rest = &rest[block_len..];
            }
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// Byte length of the string literal opening `text`, quotes included.
/// Unterminated strings run to the end of the line.
fn quoted_len(text: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote || c == '\n' {
            return i + c.len_utf8();
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn comment_goes_after_last_semicolon() {
        assert_eq!(
            annotate_line("  padding: 8px;", &one("cssreview: r: note")),
            "  padding: 8px; /* cssreview: r: note */"
        );
    }

    #[test]
    fn comment_goes_before_trailing_brace() {
        assert_eq!(
            annotate_line(".a { color: red; }", &one("c")),
            ".a { color: red; /* c */ }"
        );
        assert_eq!(annotate_line(".a { color: red }", &one("c")), ".a { color: red /* c */ }");
    }

    #[test]
    fn semicolons_in_strings_and_comments_are_skipped() {
        assert_eq!(
            annotate_line("  content: \"a;b\"", &one("c")),
            "  content: \"a;b\" /* c */"
        );
        assert_eq!(
            annotate_line("  a: 1; /* x; y */", &one("c")),
            "  a: 1; /* c */ /* x; y */"
        );
    }

    #[test]
    fn multiple_comments_share_a_line() {
        let comments = vec!["first".to_string(), "second".to_string()];
        assert_eq!(annotate_line("a: 1;", &comments), "a: 1; /* first */ /* second */");
    }

    #[test]
    fn comment_text_cannot_close_early() {
        assert_eq!(annotate_line("a;", &one("x */ y")), "a; /* x * / y */");
    }

    #[test]
    fn carriage_return_stays_at_line_end() {
        assert_eq!(
            annotate_line("  padding: 8px;\r", &one("c")),
            "  padding: 8px; /* c */\r"
        );
        assert_eq!(annotate_line(".a { b: 1 }\r", &one("c")), ".a { b: 1 /* c */ }\r");
    }

    #[test]
    fn crlf_stylesheet_keeps_every_line_ending() {
        let mut comments = BTreeMap::new();
        comments.insert(2, one("n"));
        let css = inject_comments(".card {\r\n  padding: 8px;\r\n}\r\n", &comments);

        assert_eq!(css, ".card {\r\n  padding: 8px; /* n */\r\n}\r\n");
        assert_eq!(css.matches("\r\n").count(), 3);
    }

    #[test]
    fn inject_targets_one_based_lines() {
        let mut comments = BTreeMap::new();
        comments.insert(2, one("cssreview: r: n"));
        comments.insert(9, one("ignored"));
        assert_eq!(
            inject_comments(".a {\n  b: c;\n}", &comments),
            ".a {\n  b: c; /* cssreview: r: n */\n}"
        );
    }

    #[test]
    fn strip_removes_only_marked_comments() {
        let css = ".a {\n  b: c; /* cssreview: r: n */ /* keep */\n  d: \"/* cssreview: no */\";\n}";
        assert_eq!(
            strip_comments(css),
            ".a {\n  b: c; /* keep */\n  d: \"/* cssreview: no */\";\n}"
        );
    }

    #[test]
    fn strip_undoes_injection() {
        let css = ".a { b: c }\n.d {\n  e: f;\n}";
        let mut comments = BTreeMap::new();
        comments.insert(1, one("cssreview: x: y"));
        comments.insert(3, one("cssreview: x: z"));
        let annotated = inject_comments(css, &comments);

        assert_ne!(annotated, css);
        assert_eq!(strip_comments(&annotated), css);
    }

    #[test]
    fn unterminated_comment_is_kept() {
        assert_eq!(strip_comments("a; /* cssreview: open"), "a; /* cssreview: open");
    }
}
