use crate::document::{CharacterDeclaration, Document, Gender, Utterance};
use crate::error::{Diagnostic, DiagnosticKind};
use crate::inline;
use crate::scanner::{LineKind, Scanner};

/// Recognized quotation pairs for dialogue bodies.
const QUOTE_PAIRS: [(char, char); 2] = [('「', '」'), ('『', '』')];

fn matching_close(open: char) -> Option<char> {
    QUOTE_PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, c)| *c)
}

/// Parses the whole source, appending declarations and utterances into
/// `document` and recoverable diagnostics into `diagnostics`.
///
/// Parsing is total: every line that can be parsed on its own is parsed,
/// and a diagnosed line never aborts the pass.
pub fn parse_into(source: &str, document: &mut Document, diagnostics: &mut Vec<Diagnostic>) {
    let mut pass = ParsePass {
        document,
        diagnostics,
    };

    for line in Scanner::new(source) {
        match line.kind {
            LineKind::Directive(body) => pass.directive(body, line.line_no),
            LineKind::Dialogue(body) => pass.dialogue(body, line.line_no),
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Unrecognized(_) => {
                pass.diagnostics
                    .push(Diagnostic::new(line.line_no, DiagnosticKind::UnrecognizedLine));
            }
        }
    }
}

struct ParsePass<'a> {
    document: &'a mut Document,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl ParsePass<'_> {
    fn directive(&mut self, body: &str, line_no: usize) {
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let Some((&keyword, params)) = tokens.split_first() else {
            self.diagnostics
                .push(Diagnostic::new(line_no, DiagnosticKind::MalformedDirective));
            return;
        };

        match keyword {
            "character" => self.character_directive(params, line_no),
            _ => {
                self.diagnostics.push(Diagnostic::new(
                    line_no,
                    DiagnosticKind::UnknownDirective(keyword.to_string()),
                ));
            }
        }
    }

    /// `:character <gender> <id> <form>...`
    fn character_directive(&mut self, params: &[&str], line_no: usize) {
        let [gender_token, id, forms @ ..] = params else {
            self.diagnostics
                .push(Diagnostic::new(line_no, DiagnosticKind::MalformedDirective));
            return;
        };
        if forms.is_empty() {
            self.diagnostics
                .push(Diagnostic::new(line_no, DiagnosticKind::MalformedDirective));
            return;
        }

        let gender = match Gender::from_token(gender_token) {
            Some(gender) => gender,
            None => {
                self.diagnostics.push(Diagnostic::new(
                    line_no,
                    DiagnosticKind::InvalidGender(gender_token.to_string()),
                ));
                Gender::Unspecified
            }
        };

        let replaced = self.document.declare(CharacterDeclaration {
            id: id.to_string(),
            gender,
            forms: forms.iter().map(|f| f.to_string()).collect(),
        });
        if replaced {
            self.diagnostics.push(Diagnostic::new(
                line_no,
                DiagnosticKind::DuplicateCharacter(id.to_string()),
            ));
        }
    }

    /// `@<speaker> 「<body>」`, nothing but whitespace around the quotes.
    fn dialogue(&mut self, body: &str, line_no: usize) {
        let chars: Vec<char> = body.chars().collect();
        let len = chars.len();

        let mut i = 0;
        while i < len && !chars[i].is_whitespace() {
            i += 1;
        }
        let speaker: String = chars[..i].iter().collect();

        while i < len && chars[i].is_whitespace() {
            i += 1;
        }

        if speaker.is_empty() || i >= len {
            self.malformed_dialogue(line_no);
            return;
        }

        let Some(close) = matching_close(chars[i]) else {
            self.malformed_dialogue(line_no);
            return;
        };

        let content_start = i + 1;
        let Some(close_idx) = (content_start..len).find(|&idx| chars[idx] == close) else {
            self.malformed_dialogue(line_no);
            return;
        };
        if chars[close_idx + 1..].iter().any(|c| !c.is_whitespace()) {
            self.malformed_dialogue(line_no);
            return;
        }

        let content: String = chars[content_start..close_idx].iter().collect();
        // Column of the content's first codepoint within the line; the
        // sigil occupies column 1.
        let base_column = content_start + 2;
        let spans = inline::lex(&content, line_no, base_column, self.diagnostics);

        self.document.utterances.push(Utterance {
            speaker,
            body: spans,
            line_no,
        });
    }

    fn malformed_dialogue(&mut self, line_no: usize) {
        self.diagnostics
            .push(Diagnostic::new(line_no, DiagnosticKind::MalformedDialogue));
    }
}
