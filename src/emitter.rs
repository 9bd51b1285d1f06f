use crate::document::{Document, InlineSpan, Utterance};

/// Converts a `Document` into another textual format.
///
/// Emission is read-only over the document and must be deterministic:
/// equal documents always produce identical output.
pub trait Emit {
    type Output;

    fn emit(&self, document: &Document) -> Self::Output;
}

/// Emits the document as an HTML fragment.
///
/// Each utterance becomes a `<p class="line">` carrying the speaker's
/// resolved display name and the escaped span sequence. Declarations are
/// consumed for name resolution only and never emitted themselves.
#[derive(Debug, Default)]
pub struct HtmlEmitter;

impl HtmlEmitter {
    pub fn new() -> HtmlEmitter {
        HtmlEmitter
    }

    fn write_escaped(target: &mut String, text: &str) {
        let mut rest = text;
        while let Some((head, ch)) = find_escape_char(rest) {
            target.push_str(&rest[..head]);
            match ch {
                '<' => target.push_str("&lt;"),
                '>' => target.push_str("&gt;"),
                '&' => target.push_str("&amp;"),
                '"' => target.push_str("&quot;"),
                _ => unreachable!("undefined escaping char"),
            }
            rest = &rest[head + ch.len_utf8()..];
        }
        target.push_str(rest);
    }

    fn write_span(target: &mut String, span: &InlineSpan) {
        match span {
            InlineSpan::Text { text } => HtmlEmitter::write_escaped(target, text),
            InlineSpan::Tag { name, args, text } => {
                target.push_str("<span class=\"tag-");
                HtmlEmitter::write_escaped(target, name);
                for arg in args {
                    target.push(' ');
                    HtmlEmitter::write_escaped(target, arg);
                }
                target.push_str("\">");
                HtmlEmitter::write_escaped(target, text);
                target.push_str("</span>");
            }
        }
    }

    fn write_utterance(target: &mut String, document: &Document, utterance: &Utterance) {
        let name = document
            .character(&utterance.speaker)
            .map(|decl| decl.display_name())
            .unwrap_or(&utterance.speaker);

        target.push_str("<p class=\"line\"><span class=\"name\">");
        HtmlEmitter::write_escaped(target, name);
        target.push_str("</span>");
        for span in &utterance.body {
            HtmlEmitter::write_span(target, span);
        }
        target.push_str("</p>\n");
    }
}

impl Emit for HtmlEmitter {
    type Output = String;

    fn emit(&self, document: &Document) -> String {
        let mut result = String::with_capacity(1 << 12);
        result.push_str("<article>\n");
        for utterance in &document.utterances {
            HtmlEmitter::write_utterance(&mut result, document, utterance);
        }
        result.push_str("</article>\n");
        result
    }
}

fn find_escape_char(text: &str) -> Option<(usize, char)> {
    text.char_indices()
        .find(|&(_, ch)| matches!(ch, '<' | '>' | '&' | '"'))
}
