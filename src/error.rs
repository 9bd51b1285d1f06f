use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Session status reported by `ParserSession`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Fresh or reset session, nothing parsed yet.
    #[default]
    Ready,
    /// Last parse finished without recording any diagnostic.
    Success,
    /// Last parse recorded one or more recoverable diagnostics.
    ParseError,
}

/// Category of a recoverable parse diagnostic.
///
/// Every variant is recoverable: the parser records it and moves on to the
/// next logical line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    #[error("unrecognized line")]
    UnrecognizedLine,

    #[error("malformed character directive")]
    MalformedDirective,

    #[error("unknown directive: {0}")]
    UnknownDirective(String),

    #[error("invalid gender: {0}")]
    InvalidGender(String),

    #[error("duplicate character id: {0}")]
    DuplicateCharacter(String),

    #[error("malformed dialogue line")]
    MalformedDialogue,

    #[error("unterminated inline tag")]
    UnterminatedTag,
}

/// One recorded diagnostic. Never mutated after being appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based source line number.
    pub line: usize,
    /// Best-effort 1-based column, counted in codepoints.
    pub column: Option<usize>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Diagnostic {
        Diagnostic {
            line,
            column: None,
            kind,
        }
    }

    pub fn at(line: usize, column: usize, kind: DiagnosticKind) -> Diagnostic {
        Diagnostic {
            line,
            column: Some(column),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "line {}:{}: {}", self.line, column, self.kind),
            None => write!(f, "line {}: {}", self.line, self.kind),
        }
    }
}
