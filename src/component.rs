//! Typed components of a character decomposition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fragment::Fragment;
use crate::notes::{Note, Notes, unknown_component_note};

/// Structural role of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Contributes to the meaning.
    Meaning,
    /// Hints at the (possibly historical) pronunciation.
    Sound,
    /// Depicts the thing itself.
    Iconic,
    /// A simplified stand-in for a more complex traditional part.
    Simplified,
    /// Present in the character for no known reason.
    Unknown,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meaning => write!(f, "meaning"),
            Self::Sound => write!(f, "sound"),
            Self::Iconic => write!(f, "iconic"),
            Self::Simplified => write!(f, "simplified"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One sub-unit of a character's decomposition.
///
/// The component refers to its character by string only, so it may name
/// characters that have no entry of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(rename = "char")]
    pub character: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<Fragment>,
    #[serde(default, skip_serializing_if = "Notes::is_empty")]
    pub notes: Notes,
}

impl Component {
    pub fn new(kind: ComponentKind, character: &str, fragment: Option<Fragment>) -> Self {
        Self {
            kind,
            character: character.to_string(),
            fragment,
            notes: Notes::new(),
        }
    }

    /// Append a note after any existing ones.
    pub fn with_note(mut self, note: impl Into<Note>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Append several notes after any existing ones.
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = Note>) -> Self {
        for note in notes {
            self.notes.push(note);
        }
        self
    }
}

pub fn meaning_component(character: &str, fragment: impl Into<Option<Fragment>>) -> Component {
    Component::new(ComponentKind::Meaning, character, fragment.into())
}

pub fn simplified_component(character: &str, fragment: impl Into<Option<Fragment>>) -> Component {
    Component::new(ComponentKind::Simplified, character, fragment.into())
}

pub fn sound_component(character: &str, fragment: impl Into<Option<Fragment>>) -> Component {
    Component::new(ComponentKind::Sound, character, fragment.into())
}

pub fn icon_component(character: &str, fragment: impl Into<Option<Fragment>>) -> Component {
    Component::new(ComponentKind::Iconic, character, fragment.into())
}

/// A component whose purpose is unclear; the remark saying so always comes
/// first, ahead of any note added later.
pub fn unknown_component(character: &str, fragment: impl Into<Option<Fragment>>) -> Component {
    Component::new(ComponentKind::Unknown, character, fragment.into())
        .with_note(unknown_component_note())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fix_kind() {
        let f = Fragment::range(0, 2);
        assert_eq!(meaning_component("女", f).kind, ComponentKind::Meaning);
        assert_eq!(sound_component("马", f).kind, ComponentKind::Sound);
        assert_eq!(icon_component("木", f).kind, ComponentKind::Iconic);
        assert_eq!(simplified_component("又", f).kind, ComponentKind::Simplified);
        assert_eq!(unknown_component("丶", f).kind, ComponentKind::Unknown);
    }

    #[test]
    fn unknown_note_precedes_caller_note() {
        let c = unknown_component("丶", Fragment::range(0, 1)).with_note("Possibly decorative. ");
        assert_eq!(
            c.notes.render(),
            "The purpose of this component is unclear. Possibly decorative. "
        );
    }

    #[test]
    fn plain_constructors_have_no_notes() {
        let c = meaning_component("口", Fragment::from_stroke(4));
        assert!(c.notes.is_empty());
        assert_eq!(c.fragment, Some(Fragment::from_stroke(4)));
    }

    #[test]
    fn json_uses_consumer_field_names() {
        let c = meaning_component("女", Fragment::range(0, 3));
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "meaning", "char": "女", "fragment": [0, 3] })
        );
    }
}
