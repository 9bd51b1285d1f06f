use std::str::Lines;

/// Classification of one logical line by its leading sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `:`-line; the payload is everything after the sigil.
    Directive(&'a str),
    /// `@`-line; the payload is everything after the sigil.
    Dialogue(&'a str),
    /// Entirely blank line. Skipped by the parser.
    Blank,
    /// `//`-line. Skipped by the parser.
    Comment,
    /// Anything else. The parser records a diagnostic and continues.
    Unrecognized(&'a str),
}

/// One scanned logical line with its 1-based source line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    pub line_no: usize,
    pub kind: LineKind<'a>,
}

/// Lazy one-pass splitter over the source text.
///
/// Line terminators (`\n` and `\r\n`) are stripped, a leading BOM on the
/// first line is ignored, and classification works on codepoints so
/// multi-byte scripts pass through unsplit.
pub struct Scanner<'a> {
    lines: Lines<'a>,
    line_no: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            lines: source.lines(),
            line_no: 0,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScannedLine<'a>;

    fn next(&mut self) -> Option<ScannedLine<'a>> {
        let mut raw = self.lines.next()?;
        self.line_no += 1;
        if self.line_no == 1 {
            raw = raw.trim_start_matches('\u{feff}');
        }

        let trimmed = raw.trim();
        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with("//") {
            LineKind::Comment
        } else if let Some(rest) = trimmed.strip_prefix(':') {
            LineKind::Directive(rest)
        } else if let Some(rest) = trimmed.strip_prefix('@') {
            LineKind::Dialogue(rest)
        } else {
            LineKind::Unrecognized(trimmed)
        };

        Some(ScannedLine {
            line_no: self.line_no,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<ScannedLine<'_>> {
        Scanner::new(source).collect()
    }

    #[test]
    fn classifies_by_leading_sigil() {
        let lines = kinds(":character male kb10uy 佑\n@kb10uy 「おはよう」\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_no, 1);
        assert_eq!(lines[0].kind, LineKind::Directive("character male kb10uy 佑"));
        assert_eq!(lines[1].line_no, 2);
        assert_eq!(lines[1].kind, LineKind::Dialogue("kb10uy 「おはよう」"));
    }

    #[test]
    fn blank_and_comment_lines() {
        let lines = kinds("\n   \n// memo\n");
        assert_eq!(
            lines.iter().map(|l| l.kind).collect::<Vec<_>>(),
            vec![LineKind::Blank, LineKind::Blank, LineKind::Comment]
        );
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let lines = kinds("@a 「x」\r\n@b 「y」\r\n");
        assert_eq!(lines[0].kind, LineKind::Dialogue("a 「x」"));
        assert_eq!(lines[1].kind, LineKind::Dialogue("b 「y」"));
    }

    #[test]
    fn bom_is_ignored_on_first_line() {
        let lines = kinds("\u{feff}:character male a A\n");
        assert_eq!(lines[0].kind, LineKind::Directive("character male a A"));
    }

    #[test]
    fn leading_whitespace_does_not_hide_the_sigil() {
        let lines = kinds("  @a 「x」\n");
        assert_eq!(lines[0].kind, LineKind::Dialogue("a 「x」"));
    }

    #[test]
    fn other_lines_are_unrecognized() {
        let lines = kinds("garbage line\n");
        assert_eq!(lines[0].kind, LineKind::Unrecognized("garbage line"));
    }
}
