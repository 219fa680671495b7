//! Rich diagnostic error types for the etymology builder.
//!
//! Each concern defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so the author of a construction
//! sequence knows which call went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for building an etymology knowledge base.
///
/// Each variant wraps a concern-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum EtymError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Derive(#[from] DeriveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),
}

// ---------------------------------------------------------------------------
// Derivation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum DeriveError {
    #[error("cannot derive \"{simplified}\": traditional entry \"{traditional}\" is not registered")]
    #[diagnostic(
        code(etym::derive::source_not_found),
        help(
            "Simplified entries are cloned from their traditional form. \
             Register \"{traditional}\" before calling simp() for \"{simplified}\"."
        )
    )]
    SourceNotFound {
        simplified: String,
        traditional: String,
    },

    #[error(
        "cannot derive \"{simplified}\": {supplied} fragments supplied but \"{traditional}\" has {components} components"
    )]
    #[diagnostic(
        code(etym::derive::fragment_out_of_range),
        help(
            "Fragment i replaces the fragment of component i. \
             Supply at most one fragment per component of the traditional entry."
        )
    )]
    FragmentOutOfRange {
        simplified: String,
        traditional: String,
        supplied: usize,
        components: usize,
    },
}

// ---------------------------------------------------------------------------
// Image errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ImageError {
    #[error("unknown script stage '{abbreviation}' in image selector \"{selector}\"")]
    #[diagnostic(
        code(etym::image::unknown_stage),
        help("Image selectors use 'o' (oracle bone), 'b' (bronze) and 's' (seal), e.g. \"obs\".")
    )]
    UnknownStage { abbreviation: char, selector: String },

    #[error("no {stage} script image for \"{character}\"")]
    #[diagnostic(
        code(etym::image::missing),
        help(
            "Add the image to the [images.{stage}] table, drop the stage from the selector, \
             or set missing_images = \"keep\" to store the entry without a URL."
        )
    )]
    Missing { stage: String, character: String },
}

// ---------------------------------------------------------------------------
// Registry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("duplicate entry for \"{character}\"")]
    #[diagnostic(
        code(etym::registry::duplicate),
        help(
            "The character was already registered earlier in the construction sequence. \
             Remove one of the registrations, or set duplicates = \"overwrite\" to let the last one win."
        )
    )]
    Duplicate { character: String },
}

/// Convenience alias for etymology results.
pub type EtymResult<T> = std::result::Result<T, EtymError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_wrapping_keeps_message() {
        let err: EtymError = DeriveError::SourceNotFound {
            simplified: "马".into(),
            traditional: "馬".into(),
        }
        .into();
        let msg = format!("{err}");
        assert!(msg.contains("traditional entry \"馬\" is not registered"));
    }

    #[test]
    fn diagnostic_codes_survive_wrapping() {
        let err: EtymError = ImageError::UnknownStage {
            abbreviation: 'x',
            selector: "ox".into(),
        }
        .into();
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("etym::image::unknown_stage"));
    }
}
