//! Compiler for a line-oriented dialogue-script markup format.
//!
//! A script consists of `:`-prefixed directive lines (character
//! declarations) and `@`-prefixed dialogue lines whose quoted bodies may
//! carry inline `[tag arg text]` spans. Parsing accumulates a document and
//! a log of recoverable diagnostics; the HTML emitter renders the document
//! deterministically.
//!
//! ```
//! use serifu::{ParserSession, Status};
//!
//! let mut session = ParserSession::new();
//! let status = session.parse(":character male kb10uy 佑\n@kb10uy 「おはよう」\n");
//! assert_eq!(status, Status::Success);
//! let html = session.emit_html();
//! assert!(html.contains("佑"));
//! ```

pub mod document;
pub mod emitter;
pub mod error;
pub mod inline;
pub mod parser;
pub mod scanner;
pub mod session;

pub use document::{CharacterDeclaration, Document, Gender, InlineSpan, Utterance};
pub use emitter::{Emit, HtmlEmitter};
pub use error::{Diagnostic, DiagnosticKind, Status};
pub use session::ParserSession;

/// One-shot convenience: parse `source` and emit HTML, returning the
/// output together with any diagnostics.
pub fn compile_to_html(source: &str) -> (String, Vec<Diagnostic>) {
    let mut session = ParserSession::new();
    session.parse(source);
    let html = session.emit_html();
    let diagnostics = session.diagnostics().to_vec();
    (html, diagnostics)
}
