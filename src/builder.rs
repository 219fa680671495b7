//! Entry construction: composition templates over a mutable registry.
//!
//! The [`EtymologyBuilder`] owns the registry while it is populated by an
//! ordered sequence of calls (`semsem`, `semphon`, `phonsem`, `icon`,
//! `simp`, or the underlying `add_etymology`). [`EtymologyBuilder::finalize`]
//! then hands out an immutable [`EtymologyIndex`].
//!
//! Order matters only for [`simp`](EtymologyBuilder::simp), which clones an
//! entry that must already exist. Components name characters by string, so
//! they may refer to characters registered later or never.
//!
//! ```
//! use hanzi_etym::builder::EtymologyBuilder;
//!
//! let mut builder = EtymologyBuilder::new();
//! builder.semsem("好", "女", "子", 3, "good", "").unwrap();
//! let index = builder.finalize();
//! assert_eq!(index.get("好").unwrap().components.len(), 2);
//! ```

use std::collections::HashMap;

use crate::component::{Component, meaning_component, sound_component};
use crate::config::{BuilderConfig, DuplicatePolicy};
use crate::entry::Etymology;
use crate::error::{DeriveError, EtymResult, RegistryError};
use crate::fragment::{Fragment, StrokeSplit};
use crate::images::ImageTable;
use crate::notes::{Notes, also_meaning, obsolete_sound, phonosemantic, radical_note, simplified};
use crate::radical;
use crate::registry::{EtymologyIndex, normalize_key};

/// Parameters of a phonosemantic compound.
///
/// `left` and `right` are in the order passed to
/// [`semphon`](EtymologyBuilder::semphon): meaning then sound.
/// [`phonsem`](EtymologyBuilder::phonsem) takes them sound first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phonosemantic {
    pub character: String,
    pub left: String,
    pub right: String,
    pub split: StrokeSplit,
    pub definition: String,
    pub notes: Notes,
    /// The sound component no longer sounds like the character in Mandarin.
    pub obsolete_sound: bool,
    /// The sound component also contributes meaning.
    pub sound_and_meaning: bool,
    /// Swap the computed stroke fragments.
    pub reversed: bool,
    /// Script image selector, e.g. `"obs"`.
    pub images: String,
}

impl Phonosemantic {
    pub fn new(character: &str, left: &str, right: &str, split: impl Into<StrokeSplit>) -> Self {
        Self {
            character: character.to_string(),
            left: left.to_string(),
            right: right.to_string(),
            split: split.into(),
            definition: String::new(),
            notes: Notes::new(),
            obsolete_sound: false,
            sound_and_meaning: false,
            reversed: false,
            images: String::new(),
        }
    }

    pub fn definition(mut self, definition: &str) -> Self {
        self.definition = definition.to_string();
        self
    }

    pub fn notes(mut self, notes: impl Into<Notes>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn obsolete_sound(mut self) -> Self {
        self.obsolete_sound = true;
        self
    }

    pub fn sound_and_meaning(mut self) -> Self {
        self.sound_and_meaning = true;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    pub fn images(mut self, selector: &str) -> Self {
        self.images = selector.to_string();
        self
    }
}

/// Mutable registry plus the composition templates that populate it.
#[derive(Debug, Default)]
pub struct EtymologyBuilder {
    config: BuilderConfig,
    images: ImageTable,
    entries: HashMap<String, Etymology>,
}

impl EtymologyBuilder {
    /// Empty builder with default configuration and no images.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Use `images` to resolve script image selectors.
    pub fn with_images(mut self, images: ImageTable) -> Self {
        self.images = images;
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn images(&self) -> &ImageTable {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageTable {
        &mut self.images
    }

    /// Entry registered so far for `character`.
    pub fn get(&self, character: &str) -> Option<&Etymology> {
        self.entries.get(&self.key(character))
    }

    /// Mutable access to an entry registered so far.
    pub fn get_mut(&mut self, character: &str) -> Option<&mut Etymology> {
        let key = self.key(character);
        self.entries.get_mut(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the registry.
    pub fn finalize(self) -> EtymologyIndex {
        tracing::debug!(entries = self.entries.len(), "etymology registry finalized");
        EtymologyIndex::new(self.entries, self.config.normalize_keys)
    }

    fn key(&self, character: &str) -> String {
        normalize_key(character, self.config.normalize_keys)
    }

    fn store(&mut self, character: &str, entry: Etymology) -> EtymResult<()> {
        let key = self.key(character);
        if self.entries.contains_key(&key) {
            match self.config.duplicates {
                DuplicatePolicy::Overwrite => {
                    tracing::warn!(character, "overwriting existing etymology");
                }
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::Duplicate {
                        character: character.to_string(),
                    }
                    .into());
                }
            }
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Registration primitive
    // -----------------------------------------------------------------------

    /// Register `character` with the given parts.
    ///
    /// Components written in a radical form get a note naming the canonical
    /// character, ahead of their own notes. `images` is a stage selector
    /// such as `"obs"`; an empty selector attaches no images.
    pub fn add_etymology(
        &mut self,
        character: &str,
        definition: &str,
        notes: impl Into<Notes>,
        mut components: Vec<Component>,
        images: &str,
    ) -> EtymResult<()> {
        for component in &mut components {
            if let Some(form) = radical::lookup(&component.character) {
                component
                    .notes
                    .prepend(radical_note(form.form, form.original));
            }
        }

        let images = self
            .images
            .resolve(images, character, self.config.missing_images)?;

        tracing::debug!(
            character,
            components = components.len(),
            images = images.len(),
            "registering etymology"
        );

        self.store(
            character,
            Etymology {
                definition: definition.to_string(),
                notes: notes.into(),
                components,
                images,
            },
        )
    }

    // -----------------------------------------------------------------------
    // Composition templates
    // -----------------------------------------------------------------------

    /// Meaning-meaning compound: the first `left_strokes` strokes are `left`,
    /// the rest are `right`.
    pub fn semsem(
        &mut self,
        character: &str,
        left: &str,
        right: &str,
        left_strokes: u32,
        definition: &str,
        notes: impl Into<Notes>,
    ) -> EtymResult<()> {
        let components = vec![
            meaning_component(left, Fragment::range(0, left_strokes)),
            meaning_component(right, Fragment::from_stroke(left_strokes)),
        ];
        self.add_etymology(character, definition, notes, components, "")
    }

    /// Phonosemantic compound: `left` carries the meaning, `right` the sound.
    pub fn semphon(&mut self, compound: Phonosemantic) -> EtymResult<()> {
        let Phonosemantic {
            character,
            left,
            right,
            split,
            definition,
            notes,
            obsolete_sound: is_obsolete_sound,
            sound_and_meaning,
            reversed,
            images,
        } = compound;

        let mut all_notes = notes;
        all_notes.prepend(phonosemantic(&left, &right));

        let fragments = split.fragments(reversed);
        let mut sound = sound_component(&right, fragments.right);
        if is_obsolete_sound {
            sound = sound.with_note(obsolete_sound(&character, &right));
        }
        if sound_and_meaning {
            sound = sound.with_note(also_meaning(&right));
        }

        let components = vec![meaning_component(&left, fragments.left), sound];
        self.add_etymology(&character, &definition, all_notes, components, &images)
    }

    /// Phonosemantic compound written sound first: `left` carries the sound,
    /// `right` the meaning. Same as [`semphon`](Self::semphon) with the two
    /// swapped and the fragments reversed.
    pub fn phonsem(&mut self, compound: Phonosemantic) -> EtymResult<()> {
        let Phonosemantic { left, right, .. } = &compound;
        let (meaning, sound) = (right.clone(), left.clone());
        self.semphon(Phonosemantic {
            left: meaning,
            right: sound,
            reversed: true,
            ..compound
        })
    }

    /// Any other entry: pictographs, multi-part characters, words.
    pub fn icon(
        &mut self,
        character: &str,
        definition: &str,
        notes: impl Into<Notes>,
        images: &str,
        components: Vec<Component>,
    ) -> EtymResult<()> {
        self.add_etymology(character, definition, notes, components, images)
    }

    // -----------------------------------------------------------------------
    // Simplified derivation
    // -----------------------------------------------------------------------

    /// Register `simplified` as a copy of the registered `traditional` entry.
    ///
    /// The copy gets a "Simplified form of …" note in front. `fragments[i]`,
    /// when given, replaces the fragment of component `i`; later components
    /// keep theirs.
    pub fn simp(
        &mut self,
        simplified_char: &str,
        traditional: &str,
        fragments: &[Fragment],
    ) -> EtymResult<()> {
        let mut derived = self
            .get(traditional)
            .cloned()
            .ok_or_else(|| DeriveError::SourceNotFound {
                simplified: simplified_char.to_string(),
                traditional: traditional.to_string(),
            })?;

        if fragments.len() > derived.components.len() {
            return Err(DeriveError::FragmentOutOfRange {
                simplified: simplified_char.to_string(),
                traditional: traditional.to_string(),
                supplied: fragments.len(),
                components: derived.components.len(),
            }
            .into());
        }

        derived.notes.prepend(simplified(traditional));
        for (component, fragment) in derived.components.iter_mut().zip(fragments) {
            component.fragment = Some(*fragment);
        }

        tracing::debug!(
            simplified = simplified_char,
            traditional,
            patched = fragments.len(),
            "derived simplified etymology"
        );
        self.store(simplified_char, derived)
    }
}
