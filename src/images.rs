//! Historical script images.
//!
//! Entries may carry images of the character in oracle bone, bronze, and
//! seal script. Callers select stages with a short selector such as `"obs"`;
//! the [`ImageTable`] maps each stage and character to an image URL.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// A historical stage of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptStage {
    Oracle,
    Bronze,
    Seal,
}

impl ScriptStage {
    pub const ALL: [ScriptStage; 3] = [ScriptStage::Oracle, ScriptStage::Bronze, ScriptStage::Seal];

    /// Parse a one-letter selector abbreviation.
    pub fn from_abbreviation(abbreviation: char) -> Option<Self> {
        match abbreviation {
            'o' => Some(Self::Oracle),
            'b' => Some(Self::Bronze),
            's' => Some(Self::Seal),
            _ => None,
        }
    }

    /// Parse a selector such as `"obs"`, keeping its order.
    pub fn parse_selector(selector: &str) -> Result<Vec<Self>, ImageError> {
        selector
            .chars()
            .map(|c| {
                Self::from_abbreviation(c).ok_or_else(|| ImageError::UnknownStage {
                    abbreviation: c,
                    selector: selector.to_string(),
                })
            })
            .collect()
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Self::Oracle => "Oracle bone script",
            Self::Bronze => "Bronze script",
            Self::Seal => "Seal script",
        }
    }
}

impl fmt::Display for ScriptStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oracle => write!(f, "oracle"),
            Self::Bronze => write!(f, "bronze"),
            Self::Seal => write!(f, "seal"),
        }
    }
}

/// One image attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptImage {
    /// `None` when the table has no image for this stage and character.
    /// Omitted from JSON in that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub caption: String,
}

/// What to do when a requested image is not in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingImagePolicy {
    /// Keep the image record with `url: None`.
    #[default]
    Keep,
    /// Fail with [`ImageError::Missing`].
    Reject,
}

/// Stage → character → URL.
///
/// Deserializes from TOML tables keyed by stage name:
///
/// ```toml
/// [oracle]
/// "木" = "images/oracle/木.svg"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTable {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    oracle: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    bronze: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    seal: HashMap<String, String>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn stage(&self, stage: ScriptStage) -> &HashMap<String, String> {
        match stage {
            ScriptStage::Oracle => &self.oracle,
            ScriptStage::Bronze => &self.bronze,
            ScriptStage::Seal => &self.seal,
        }
    }

    fn stage_mut(&mut self, stage: ScriptStage) -> &mut HashMap<String, String> {
        match stage {
            ScriptStage::Oracle => &mut self.oracle,
            ScriptStage::Bronze => &mut self.bronze,
            ScriptStage::Seal => &mut self.seal,
        }
    }

    pub fn insert(&mut self, stage: ScriptStage, character: &str, url: &str) {
        self.stage_mut(stage)
            .insert(character.to_string(), url.to_string());
    }

    pub fn url(&self, stage: ScriptStage, character: &str) -> Option<&str> {
        self.stage(stage).get(character).map(String::as_str)
    }

    /// Copy every image of `other` into this table, replacing duplicates.
    pub fn merge(&mut self, other: &ImageTable) {
        for stage in ScriptStage::ALL {
            let target = self.stage_mut(stage);
            for (character, url) in other.stage(stage) {
                target.insert(character.clone(), url.clone());
            }
        }
    }

    /// Total number of images across all stages.
    pub fn len(&self) -> usize {
        self.oracle.len() + self.bronze.len() + self.seal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the image list for `character` in selector order.
    pub fn resolve(
        &self,
        selector: &str,
        character: &str,
        policy: MissingImagePolicy,
    ) -> Result<Vec<ScriptImage>, ImageError> {
        ScriptStage::parse_selector(selector)?
            .into_iter()
            .map(|stage| {
                let url = self.url(stage, character).map(str::to_string);
                if url.is_none() {
                    match policy {
                        MissingImagePolicy::Keep => {
                            tracing::warn!(%stage, character, "no script image, keeping entry without URL");
                        }
                        MissingImagePolicy::Reject => {
                            return Err(ImageError::Missing {
                                stage: stage.to_string(),
                                character: character.to_string(),
                            });
                        }
                    }
                }
                Ok(ScriptImage {
                    url,
                    caption: stage.caption().to_string(),
                })
            })
            .collect()
    }
}
