//! Note templates: recurring linguistic facts as structured segments.
//!
//! Every template produces a [`Note`], a value that renders to one
//! self-contained sentence. A [`Notes`] list renders by plain concatenation,
//! so composing an entry's prose never needs separator logic, and the
//! segments stay inspectable for later rendering or localization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One sentence of generated or caller-supplied prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum Note {
    /// Free text, rendered verbatim.
    Text { text: String },
    /// Default remark on every phonosemantic compound.
    Phonosemantic { meaning: String, sound: String },
    /// A meaning that drifted through zero or more earlier meanings.
    ShiftMeaning {
        new_meaning: String,
        #[serde(default)]
        prior_meanings: Vec<String>,
    },
    ObsoleteMeaning { old_meaning: String },
    ObsoleteSound { character: String, sound: String },
    AlsoMeaning { character: String },
    UnknownComponent,
    Simplified { traditional: String },
    SoundLoan {
        new_meaning: String,
        old_meaning: String,
        new_character: String,
    },
    SimplifyMerge {
        simplified: String,
        traditional: String,
        meaning: String,
    },
    /// Positional variant of a canonical character.
    RadicalForm { form: String, original: String },
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text } => f.write_str(text),
            Self::Phonosemantic { meaning, sound } => write!(
                f,
                "Phonosemantic compound. {meaning} represents the meaning and {sound} represents the sound. "
            ),
            Self::ShiftMeaning {
                new_meaning,
                prior_meanings,
            } => {
                for prior in prior_meanings {
                    write!(f, "Based on the original meaning \"{prior}\". ")?;
                }
                write!(
                    f,
                    "The meaning of this character has shifted over time and now means \"{new_meaning}\". "
                )
            }
            Self::ObsoleteMeaning { old_meaning } => write!(
                f,
                "The character is based on the original meaning \"{old_meaning}\", which is unrelated to the modern meaning. "
            ),
            Self::ObsoleteSound { character, sound } => write!(
                f,
                "The pronunciation of {character} was similar to {sound} in old Chinese, but they no longer sound similar in modern Mandarin due to historical phonetic changes. "
            ),
            Self::AlsoMeaning { character } => {
                write!(f, "{character} also serves as a meaning component. ")
            }
            Self::UnknownComponent => f.write_str("The purpose of this component is unclear. "),
            Self::Simplified { traditional } => write!(f, "Simplified form of {traditional}. "),
            Self::SoundLoan {
                new_meaning,
                old_meaning,
                new_character,
            } => write!(
                f,
                "The current meaning \"{new_meaning}\" is a phonetic loan. The original meaning \"{old_meaning}\" is now written as {new_character}."
            ),
            Self::SimplifyMerge {
                simplified,
                traditional,
                meaning,
            } => write!(
                f,
                "In simplified Chinese {simplified} is also used to mean \"{meaning}\", while in traditional Chinese this meaning is written with a separate character {traditional}."
            ),
            Self::RadicalForm { form, original } => {
                write!(f, "{form} is a component form of {original}. ")
            }
        }
    }
}

impl From<&str> for Note {
    fn from(text: &str) -> Self {
        Self::Text {
            text: text.to_string(),
        }
    }
}

impl From<String> for Note {
    fn from(text: String) -> Self {
        Self::Text { text }
    }
}

// ---------------------------------------------------------------------------
// Template constructors
// ---------------------------------------------------------------------------

/// "Based on the original meaning …" once per prior meaning, oldest first,
/// then "… now means {new_meaning}".
pub fn shift_meaning<I, S>(new_meaning: &str, prior_meanings: I) -> Note
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Note::ShiftMeaning {
        new_meaning: new_meaning.to_string(),
        prior_meanings: prior_meanings.into_iter().map(Into::into).collect(),
    }
}

pub fn obsolete_meaning(old_meaning: &str) -> Note {
    Note::ObsoleteMeaning {
        old_meaning: old_meaning.to_string(),
    }
}

/// `character` and its sound component `sound` no longer rhyme in Mandarin.
pub fn obsolete_sound(character: &str, sound: &str) -> Note {
    Note::ObsoleteSound {
        character: character.to_string(),
        sound: sound.to_string(),
    }
}

pub fn also_meaning(character: &str) -> Note {
    Note::AlsoMeaning {
        character: character.to_string(),
    }
}

pub fn unknown_component_note() -> Note {
    Note::UnknownComponent
}

pub fn simplified(traditional: &str) -> Note {
    Note::Simplified {
        traditional: traditional.to_string(),
    }
}

pub fn sound_loan(new_meaning: &str, old_meaning: &str, new_character: &str) -> Note {
    Note::SoundLoan {
        new_meaning: new_meaning.to_string(),
        old_meaning: old_meaning.to_string(),
        new_character: new_character.to_string(),
    }
}

pub fn simplify_merge(simplified: &str, traditional: &str, meaning: &str) -> Note {
    Note::SimplifyMerge {
        simplified: simplified.to_string(),
        traditional: traditional.to_string(),
        meaning: meaning.to_string(),
    }
}

pub fn radical_note(form: &str, original: &str) -> Note {
    Note::RadicalForm {
        form: form.to_string(),
        original: original.to_string(),
    }
}

pub fn phonosemantic(meaning: &str, sound: &str) -> Note {
    Note::Phonosemantic {
        meaning: meaning.to_string(),
        sound: sound.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Note lists
// ---------------------------------------------------------------------------

/// Ordered note segments attached to an entry or a component.
///
/// Serializes as the rendered string, which is the shape the lookup layer
/// consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes(Vec<Note>);

impl Notes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a segment before all existing ones.
    pub fn prepend(&mut self, note: Note) {
        self.0.insert(0, note);
    }

    pub fn push(&mut self, note: Note) {
        self.0.push(note);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, note: impl Into<Note>) -> Self {
        self.push(note.into());
        self
    }

    pub fn segments(&self) -> &[Note] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenate all segments.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Whether the rendered text begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.render().starts_with(prefix)
    }
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for note in &self.0 {
            write!(f, "{note}")?;
        }
        Ok(())
    }
}

impl From<Note> for Notes {
    fn from(note: Note) -> Self {
        Self(vec![note])
    }
}

impl From<Vec<Note>> for Notes {
    fn from(notes: Vec<Note>) -> Self {
        Self(notes)
    }
}

impl From<&str> for Notes {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            Self::new()
        } else {
            Self(vec![Note::from(text)])
        }
    }
}

impl FromIterator<Note> for Notes {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for Notes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Notes {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Notes::from(text.as_str()))
    }
}
