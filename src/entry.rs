//! The etymology record stored for one character.

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::images::ScriptImage;
use crate::notes::Notes;

/// Complete etymology of one character (or multi-character word).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etymology {
    /// Short gloss.
    #[serde(default)]
    pub definition: String,
    /// Generated and caller-supplied prose.
    #[serde(default)]
    pub notes: Notes,
    /// Decomposition in visual/reading order.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Historical script images in requested order.
    #[serde(default)]
    pub images: Vec<ScriptImage>,
}
