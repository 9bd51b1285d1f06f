use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gender attached to a character declaration.
///
/// `Unspecified` doubles as the fallback when the directive carries a token
/// outside the recognized set; the declaration is still recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl Gender {
    /// Maps a directive token to a gender. `None` means the token is not in
    /// the recognized set.
    pub fn from_token(token: &str) -> Option<Gender> {
        match token {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Unspecified),
            _ => None,
        }
    }
}

/// A character registered by a `:character` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDeclaration {
    pub id: String,
    pub gender: Gender,
    /// Ordered display forms, at least one. The first form is the one the
    /// emitter renders as the speaker label.
    pub forms: Vec<String>,
}

impl CharacterDeclaration {
    /// The name shown for this character in emitted output.
    pub fn display_name(&self) -> &str {
        &self.forms[0]
    }
}

/// One parsed unit of an utterance body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InlineSpan {
    Text { text: String },
    Tag {
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        args: Vec<String>,
        text: String,
    },
}

impl InlineSpan {
    pub fn text(t: impl Into<String>) -> Self {
        InlineSpan::Text { text: t.into() }
    }
}

/// A dialogue line attributed to a speaker.
///
/// The speaker is a weak reference: it is looked up in the declaration map
/// at emission time and falls back to the raw id when unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: String,
    pub body: Vec<InlineSpan>,
    pub line_no: usize,
}

/// The parse result: declarations plus utterances in source order.
///
/// `BTreeMap` keeps declaration iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub characters: BTreeMap<String, CharacterDeclaration>,
    pub utterances: Vec<Utterance>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Records a declaration, overwriting any previous one with the same id.
    /// Returns true when an existing declaration was replaced.
    pub fn declare(&mut self, declaration: CharacterDeclaration) -> bool {
        self.characters
            .insert(declaration.id.clone(), declaration)
            .is_some()
    }

    pub fn character(&self, id: &str) -> Option<&CharacterDeclaration> {
        self.characters.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.utterances.is_empty()
    }

    pub fn clear(&mut self) {
        self.characters.clear();
        self.utterances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(id: &str, gender: Gender, forms: &[&str]) -> CharacterDeclaration {
        CharacterDeclaration {
            id: id.to_string(),
            gender,
            forms: forms.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn declare_overwrites_same_id() {
        let mut doc = Document::new();
        assert!(!doc.declare(decl("kb10uy", Gender::Male, &["佑"])));
        assert!(doc.declare(decl("kb10uy", Gender::Male, &["kb10uy", "佑"])));

        let kept = doc.character("kb10uy").unwrap();
        assert_eq!(kept.forms, vec!["kb10uy".to_string(), "佑".to_string()]);
        assert_eq!(kept.display_name(), "kb10uy");
    }

    #[test]
    fn character_iteration_is_ordered() {
        let mut doc = Document::new();
        doc.declare(decl("natsuki", Gender::Female, &["夏稀"]));
        doc.declare(decl("ayano", Gender::Female, &["文乃"]));
        doc.declare(decl("kb10uy", Gender::Male, &["佑"]));

        let ids: Vec<&str> = doc.characters.keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["ayano", "kb10uy", "natsuki"]);
    }

    #[test]
    fn gender_token_set() {
        assert_eq!(Gender::from_token("male"), Some(Gender::Male));
        assert_eq!(Gender::from_token("female"), Some(Gender::Female));
        assert_eq!(Gender::from_token("other"), Some(Gender::Unspecified));
        assert_eq!(Gender::from_token("robot"), None);
    }
}
