use crate::document::InlineSpan;
use crate::error::{Diagnostic, DiagnosticKind};

/// Lexes the quoted body of a dialogue line into an ordered span sequence.
///
/// Literal runs accumulate until a `[` opener. Bracket content is
/// whitespace-split: first segment is the tag name, last segment is the
/// wrapped text, segments between are arguments. The grammar is flat; a
/// `]` always closes the innermost (and only) open tag.
///
/// `base_column` is the 1-based codepoint column of the body's first
/// character within its source line, used for diagnostic positions. An
/// unterminated `[` records a diagnostic and the remainder of the body is
/// kept as literal text.
pub fn lex(
    body: &str,
    line_no: usize,
    base_column: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<InlineSpan> {
    let chars: Vec<char> = body.chars().collect();
    let len = chars.len();
    let mut out: Vec<InlineSpan> = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < len {
        let ch = chars[i];
        if ch != '[' {
            buf.push(ch);
            i += 1;
            continue;
        }

        match find_closing(&chars, i + 1) {
            Some(close_idx) => {
                let content = slice_chars(&chars, i + 1, close_idx);
                match split_tag(&content) {
                    Some(tag) => {
                        flush_text(&mut buf, &mut out);
                        out.push(tag);
                    }
                    None => {
                        // Nameless bracket, keep it verbatim.
                        buf.push('[');
                        buf.push_str(&content);
                        buf.push(']');
                    }
                }
                i = close_idx + 1;
            }
            None => {
                diagnostics.push(Diagnostic::at(
                    line_no,
                    base_column + i,
                    DiagnosticKind::UnterminatedTag,
                ));
                buf.push_str(&slice_chars(&chars, i, len));
                i = len;
            }
        }
    }

    flush_text(&mut buf, &mut out);
    out
}

fn flush_text(buf: &mut String, out: &mut Vec<InlineSpan>) {
    if !buf.is_empty() {
        out.push(InlineSpan::Text {
            text: std::mem::take(buf),
        });
    }
}

fn find_closing(chars: &[char], mut idx: usize) -> Option<usize> {
    while idx < chars.len() {
        if chars[idx] == ']' {
            return Some(idx);
        }
        idx += 1;
    }
    None
}

fn slice_chars(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end.min(chars.len())].iter().collect()
}

/// Splits bracket content into name, arguments, and wrapped text.
/// Returns `None` when the content has no tag name.
fn split_tag(content: &str) -> Option<InlineSpan> {
    let segments: Vec<&str> = content.split_whitespace().collect();
    let (name, rest) = segments.split_first()?;
    let (text, args) = match rest.split_last() {
        Some((text, args)) => (*text, args),
        None => ("", rest),
    };

    Some(InlineSpan::Tag {
        name: name.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_ok(body: &str) -> Vec<InlineSpan> {
        let mut diagnostics = Vec::new();
        let spans = lex(body, 1, 1, &mut diagnostics);
        assert!(diagnostics.is_empty(), "unexpected: {:?}", diagnostics);
        spans
    }

    fn tag(name: &str, args: &[&str], text: &str) -> InlineSpan {
        InlineSpan::Tag {
            name: name.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            text: text.to_string(),
        }
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(lex_ok("おはようございます"), vec![InlineSpan::text("おはようございます")]);
    }

    #[test]
    fn tag_with_argument() {
        assert_eq!(lex_ok("[m bold text]"), vec![tag("m", &["bold"], "text")]);
    }

    #[test]
    fn tag_without_argument() {
        assert_eq!(lex_ok("[b strong]"), vec![tag("b", &[], "strong")]);
    }

    #[test]
    fn bare_tag() {
        assert_eq!(lex_ok("one[br]two"), vec![
            InlineSpan::text("one"),
            tag("br", &[], ""),
            InlineSpan::text("two"),
        ]);
    }

    #[test]
    fn literals_interleave_with_tags() {
        assert_eq!(lex_ok("あ[b い]う"), vec![
            InlineSpan::text("あ"),
            tag("b", &[], "い"),
            InlineSpan::text("う"),
        ]);
    }

    #[test]
    fn multiple_arguments() {
        assert_eq!(
            lex_ok("[ruby かな 漢字]"),
            vec![tag("ruby", &["かな"], "漢字")]
        );
    }

    #[test]
    fn empty_brackets_stay_literal() {
        assert_eq!(lex_ok("a[]b"), vec![InlineSpan::text("a[]b")]);
    }

    #[test]
    fn unterminated_tag_recovers_as_literal() {
        let mut diagnostics = Vec::new();
        let spans = lex("oops [b lost", 4, 10, &mut diagnostics);
        assert_eq!(spans, vec![InlineSpan::text("oops [b lost")]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnterminatedTag);
        assert_eq!(diagnostics[0].line, 4);
        // `[` is the sixth codepoint of the body, base column 10.
        assert_eq!(diagnostics[0].column, Some(15));
    }

    #[test]
    fn text_after_unterminated_tag_is_not_lost() {
        let mut diagnostics = Vec::new();
        let spans = lex("[b before]and [after", 1, 1, &mut diagnostics);
        assert_eq!(spans, vec![
            tag("b", &[], "before"),
            InlineSpan::text("and [after"),
        ]);
        assert_eq!(diagnostics.len(), 1);
    }
}
