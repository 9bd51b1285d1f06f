use crate::document::Document;
use crate::emitter::{Emit, HtmlEmitter};
use crate::error::{Diagnostic, Status};
use crate::parser;

/// The unit of reuse: holds the accumulated document, the diagnostic log,
/// and the status of the last parse.
///
/// Lifecycle: created empty and `Ready`; then any number of
/// parse → inspect → emit cycles, each preceded by an explicit `reset`.
/// Calling `parse` again without a reset appends to the held document.
/// A session is not meant to be shared between threads; exclusive `&mut`
/// access is the expected discipline.
#[derive(Debug, Default)]
pub struct ParserSession {
    document: Document,
    diagnostics: Vec<Diagnostic>,
    status: Status,
}

impl ParserSession {
    pub fn new() -> ParserSession {
        ParserSession::default()
    }

    /// Clears the document and the diagnostic log, restoring `Ready`.
    pub fn reset(&mut self) {
        self.document.clear();
        self.diagnostics.clear();
        self.status = Status::Ready;
    }

    /// Parses `source`, appending into the held document. Always total:
    /// every independently parseable line contributes, diagnosed lines are
    /// recorded and skipped.
    pub fn parse(&mut self, source: &str) -> Status {
        parser::parse_into(source, &mut self.document, &mut self.diagnostics);
        self.status = if self.diagnostics.is_empty() {
            Status::Success
        } else {
            Status::ParseError
        };
        self.status
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Recorded diagnostics in append order (roughly source line order).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics rendered as human-readable strings, in append order.
    pub fn error_messages(&self) -> impl Iterator<Item = String> + '_ {
        self.diagnostics.iter().map(|d| d.to_string())
    }

    /// Emits the held document as HTML. Total: an unparsed or empty
    /// session yields the minimal shell.
    pub fn emit_html(&self) -> String {
        HtmlEmitter::new().emit(&self.document)
    }
}
