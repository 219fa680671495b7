// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # hanzi-etym
//!
//! Builds an etymology knowledge base for Chinese characters: for each
//! character a definition, explanatory notes, an ordered decomposition into
//! typed components, and historical script images.
//!
//! ## Architecture
//!
//! - **Notes** (`notes`): structured note templates rendered by concatenation
//! - **Radicals** (`radical`): positional radical forms → canonical characters
//! - **Fragments** (`fragment`): stroke ranges and the left/right split rule
//! - **Components** (`component`): meaning, sound, iconic, simplified, unknown
//! - **Images** (`images`): oracle bone, bronze, and seal script lookup
//! - **Builder** (`builder`): `semsem`, `semphon`, `phonsem`, `icon`, `simp`
//! - **Index** (`registry`): the frozen, read-only character → entry view
//! - **Seed packs** (`seeds`): TOML construction sequences
//!
//! ## Library usage
//!
//! ```
//! use hanzi_etym::builder::{EtymologyBuilder, Phonosemantic};
//!
//! let mut builder = EtymologyBuilder::new();
//! builder.semsem("好", "女", "子", 3, "good", "").unwrap();
//! builder
//!     .semphon(Phonosemantic::new("媽", "女", "馬", 3).definition("mother"))
//!     .unwrap();
//! builder.simp("妈", "媽", &[]).unwrap();
//!
//! let index = builder.finalize();
//! assert!(index.get("妈").unwrap().notes.starts_with("Simplified form of 媽."));
//! ```

pub mod builder;
pub mod component;
pub mod config;
pub mod entry;
pub mod error;
pub mod fragment;
pub mod images;
pub mod notes;
pub mod radical;
pub mod registry;
pub mod seeds;

pub use builder::{EtymologyBuilder, Phonosemantic};
pub use component::{Component, ComponentKind};
pub use config::BuilderConfig;
pub use entry::Etymology;
pub use error::{EtymError, EtymResult};
pub use fragment::{Fragment, StrokeSplit};
pub use registry::EtymologyIndex;
