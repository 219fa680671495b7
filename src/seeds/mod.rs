//! Seed packs: construction sequences for the etymology builder.
//!
//! A seed pack is a TOML file holding an ordered list of construction steps
//! (`add`, `semsem`, `semphon`, `phonsem`, `icon`, `simp`) plus the script
//! images those steps refer to. One pack, `basic`, is bundled into the
//! binary; more can be discovered from a directory.
//!
//! ```toml
//! [seed]
//! id = "demo"
//! name = "Demo"
//! version = "0.1.0"
//! description = "Two characters"
//!
//! [images.oracle]
//! "木" = "images/oracle/木.svg"
//!
//! [[steps]]
//! op = "add"
//! char = "木"
//! definition = "tree"
//! images = "o"
//!
//! [[steps]]
//! op = "semsem"
//! char = "林"
//! left = "木"
//! right = "木"
//! left_strokes = 4
//! definition = "grove"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::builder::{EtymologyBuilder, Phonosemantic};
use crate::component::{
    Component, ComponentKind, icon_component, meaning_component, simplified_component,
    sound_component, unknown_component,
};
use crate::config::BuilderConfig;
use crate::error::{EtymError, EtymResult};
use crate::fragment::{Fragment, StrokeSplit};
use crate::images::ImageTable;
use crate::notes::{Note, Notes};
use crate::registry::EtymologyIndex;

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error, Diagnostic)]
pub enum SeedError {
    #[error("seed pack not found: \"{id}\"")]
    #[diagnostic(
        code(etym::seed::not_found),
        help("List available packs with `hanzi-etym packs`, or pass --seeds to point at a pack directory.")
    )]
    NotFound { id: String },

    #[error("failed to parse seed pack \"{id}\": {message}")]
    #[diagnostic(
        code(etym::seed::parse),
        help("Check the seed.toml syntax against the format in the seeds module documentation.")
    )]
    Parse { id: String, message: String },

    #[error("failed to read seed file: {path}")]
    #[diagnostic(code(etym::seed::io), help("Ensure the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("seed pack \"{id}\" failed at step {step} ({op} \"{character}\")")]
    #[diagnostic(
        code(etym::seed::apply),
        help("Steps run in file order; a simp step must come after the step registering its traditional form.")
    )]
    Apply {
        id: String,
        step: usize,
        op: &'static str,
        character: String,
        #[source]
        #[diagnostic_source]
        source: EtymError,
    },
}

pub type SeedResult<T> = std::result::Result<T, SeedError>;

// ── Seed pack data model ────────────────────────────────────────────────

/// A seed pack: TOML-defined construction sequence.
#[derive(Debug, Clone)]
pub struct SeedPack {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    /// Builder configuration suggested by the pack.
    pub config: Option<BuilderConfig>,
    pub images: ImageTable,
    pub steps: Vec<SeedStep>,
    /// Source: `Bundled` or `External(path)`.
    pub source: SeedSource,
}

/// Where a seed pack came from.
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// Bundled into the binary via `include_str!`.
    Bundled,
    /// Loaded from an external directory.
    External(PathBuf),
}

/// A note in a seed file: plain text or a named template.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NoteSpec {
    Text(String),
    Template(Note),
}

impl From<NoteSpec> for Note {
    fn from(spec: NoteSpec) -> Self {
        match spec {
            NoteSpec::Text(text) => Note::from(text),
            NoteSpec::Template(note) => note,
        }
    }
}

fn to_notes(specs: Vec<NoteSpec>) -> Notes {
    specs.into_iter().map(Note::from).collect()
}

/// A component in an `icon` or `add` step.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSpec {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(rename = "char")]
    pub character: String,
    #[serde(default)]
    pub fragment: Option<Fragment>,
    #[serde(default)]
    pub notes: Vec<NoteSpec>,
}

impl ComponentSpec {
    fn build(self) -> Component {
        let base = match self.kind {
            ComponentKind::Meaning => meaning_component(&self.character, self.fragment),
            ComponentKind::Sound => sound_component(&self.character, self.fragment),
            ComponentKind::Iconic => icon_component(&self.character, self.fragment),
            ComponentKind::Simplified => simplified_component(&self.character, self.fragment),
            ComponentKind::Unknown => unknown_component(&self.character, self.fragment),
        };
        base.with_notes(self.notes.into_iter().map(Note::from))
    }
}

/// Arguments shared by `semphon` and `phonsem` steps.
#[derive(Debug, Clone, Deserialize)]
pub struct PhonoStep {
    #[serde(rename = "char")]
    pub character: String,
    pub left: String,
    pub right: String,
    pub split: StrokeSplit,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub notes: Vec<NoteSpec>,
    #[serde(default)]
    pub obsolete_sound: bool,
    #[serde(default)]
    pub sound_and_meaning: bool,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub images: String,
}

impl PhonoStep {
    fn build(self) -> Phonosemantic {
        Phonosemantic {
            character: self.character,
            left: self.left,
            right: self.right,
            split: self.split,
            definition: self.definition,
            notes: to_notes(self.notes),
            obsolete_sound: self.obsolete_sound,
            sound_and_meaning: self.sound_and_meaning,
            reversed: self.reversed,
            images: self.images,
        }
    }
}

/// One construction call.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SeedStep {
    Add {
        #[serde(rename = "char")]
        character: String,
        #[serde(default)]
        definition: String,
        #[serde(default)]
        notes: Vec<NoteSpec>,
        #[serde(default)]
        components: Vec<ComponentSpec>,
        #[serde(default)]
        images: String,
    },
    Semsem {
        #[serde(rename = "char")]
        character: String,
        left: String,
        right: String,
        left_strokes: u32,
        #[serde(default)]
        definition: String,
        #[serde(default)]
        notes: Vec<NoteSpec>,
    },
    Semphon(PhonoStep),
    Phonsem(PhonoStep),
    Icon {
        #[serde(rename = "char")]
        character: String,
        #[serde(default)]
        definition: String,
        #[serde(default)]
        notes: Vec<NoteSpec>,
        #[serde(default)]
        images: String,
        #[serde(default)]
        components: Vec<ComponentSpec>,
    },
    Simp {
        #[serde(rename = "char")]
        character: String,
        traditional: String,
        #[serde(default)]
        fragments: Vec<Fragment>,
    },
}

impl SeedStep {
    pub fn op(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Semsem { .. } => "semsem",
            Self::Semphon(_) => "semphon",
            Self::Phonsem(_) => "phonsem",
            Self::Icon { .. } => "icon",
            Self::Simp { .. } => "simp",
        }
    }

    /// The character the step registers.
    pub fn character(&self) -> &str {
        match self {
            Self::Add { character, .. }
            | Self::Semsem { character, .. }
            | Self::Icon { character, .. }
            | Self::Simp { character, .. } => character,
            Self::Semphon(step) | Self::Phonsem(step) => &step.character,
        }
    }

    /// Run the step against `builder`.
    pub fn apply(self, builder: &mut EtymologyBuilder) -> EtymResult<()> {
        match self {
            Self::Add {
                character,
                definition,
                notes,
                components,
                images,
            } => builder.add_etymology(
                &character,
                &definition,
                to_notes(notes),
                components.into_iter().map(ComponentSpec::build).collect(),
                &images,
            ),
            Self::Semsem {
                character,
                left,
                right,
                left_strokes,
                definition,
                notes,
            } => builder.semsem(
                &character,
                &left,
                &right,
                left_strokes,
                &definition,
                to_notes(notes),
            ),
            Self::Semphon(step) => builder.semphon(step.build()),
            Self::Phonsem(step) => builder.phonsem(step.build()),
            Self::Icon {
                character,
                definition,
                notes,
                images,
                components,
            } => builder.icon(
                &character,
                &definition,
                to_notes(notes),
                &images,
                components.into_iter().map(ComponentSpec::build).collect(),
            ),
            Self::Simp {
                character,
                traditional,
                fragments,
            } => builder.simp(&character, &traditional, &fragments),
        }
    }
}

/// Report after applying a seed pack.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub id: String,
    pub steps_applied: usize,
    pub images_added: usize,
}

// ── TOML deserialization helpers ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SeedToml {
    seed: SeedMeta,
    #[serde(default)]
    config: Option<BuilderConfig>,
    #[serde(default)]
    images: ImageTable,
    #[serde(default)]
    steps: Vec<SeedStep>,
}

#[derive(Debug, Deserialize)]
struct SeedMeta {
    id: String,
    name: String,
    version: String,
    #[serde(default)]
    description: String,
}

// ── Bundled seed packs ──────────────────────────────────────────────────

const BASIC_TOML: &str = include_str!("../../data/seeds/basic/seed.toml");

/// Parse a seed pack from TOML text.
pub fn parse_seed_toml(toml_str: &str, source: SeedSource) -> SeedResult<SeedPack> {
    let parsed: SeedToml = toml::from_str(toml_str).map_err(|e| SeedError::Parse {
        id: "(unknown)".into(),
        message: e.to_string(),
    })?;
    Ok(SeedPack {
        id: parsed.seed.id,
        name: parsed.seed.name,
        version: parsed.seed.version,
        description: parsed.seed.description,
        config: parsed.config,
        images: parsed.images,
        steps: parsed.steps,
        source,
    })
}

fn bundled_packs() -> Vec<SeedPack> {
    [(BASIC_TOML, "basic")]
        .iter()
        .filter_map(
            |(toml, id)| match parse_seed_toml(toml, SeedSource::Bundled) {
                Ok(pack) => Some(pack),
                Err(e) => {
                    tracing::warn!(seed = id, "Failed to parse bundled seed: {e}");
                    None
                }
            },
        )
        .collect()
}

// ── Seed Registry ───────────────────────────────────────────────────────

/// Registry of available seed packs (bundled + discovered from disk).
pub struct SeedRegistry {
    packs: HashMap<String, SeedPack>,
}

impl SeedRegistry {
    /// Create a registry with only bundled packs.
    pub fn bundled() -> Self {
        let packs = bundled_packs()
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self { packs }
    }

    /// Discover seed packs from a directory (in addition to bundled packs).
    ///
    /// Each subdirectory containing a `seed.toml` is loaded as a pack. A pack
    /// with the same id as a bundled one replaces it.
    pub fn discover(seeds_dir: &Path) -> Self {
        let mut registry = Self::bundled();

        if let Ok(entries) = std::fs::read_dir(seeds_dir) {
            for entry in entries.flatten() {
                let seed_file = entry.path().join("seed.toml");
                if !seed_file.is_file() {
                    continue;
                }
                match load_seed_file(&seed_file, entry.path()) {
                    Ok(pack) => {
                        registry.packs.insert(pack.id.clone(), pack);
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %seed_file.display(),
                            "Failed to load seed pack: {e}"
                        );
                    }
                }
            }
        }

        registry
    }

    /// List all available seed packs.
    pub fn list(&self) -> Vec<&SeedPack> {
        let mut packs: Vec<&SeedPack> = self.packs.values().collect();
        packs.sort_by(|a, b| a.id.cmp(&b.id));
        packs
    }

    /// Get a seed pack by ID.
    pub fn get(&self, id: &str) -> SeedResult<&SeedPack> {
        self.packs
            .get(id)
            .ok_or_else(|| SeedError::NotFound { id: id.to_string() })
    }

    /// Apply a single seed pack to a builder.
    pub fn apply(&self, pack_id: &str, builder: &mut EtymologyBuilder) -> SeedResult<SeedReport> {
        let pack = self.get(pack_id)?;
        apply_seed_pack(pack, builder)
    }

    /// Apply multiple seed packs in order. Returns a report per pack.
    pub fn apply_all(
        &self,
        pack_ids: &[String],
        builder: &mut EtymologyBuilder,
    ) -> SeedResult<Vec<SeedReport>> {
        let mut reports = Vec::new();
        for id in pack_ids {
            reports.push(self.apply(id, builder)?);
        }
        Ok(reports)
    }

    /// Build a finished index from the given packs.
    ///
    /// Without an explicit `config`, the first pack that carries a
    /// `[config]` table decides; otherwise defaults apply.
    pub fn build(
        &self,
        pack_ids: &[String],
        config: Option<BuilderConfig>,
    ) -> SeedResult<EtymologyIndex> {
        let packs = pack_ids
            .iter()
            .map(|id| self.get(id))
            .collect::<SeedResult<Vec<_>>>()?;
        let config = config
            .or_else(|| packs.iter().find_map(|p| p.config.clone()))
            .unwrap_or_default();

        let mut builder = EtymologyBuilder::with_config(config);
        for pack in packs {
            apply_seed_pack(pack, &mut builder)?;
        }
        Ok(builder.finalize())
    }
}

fn load_seed_file(seed_file: &Path, dir: PathBuf) -> SeedResult<SeedPack> {
    let content = std::fs::read_to_string(seed_file).map_err(|source| SeedError::Io {
        path: seed_file.display().to_string(),
        source,
    })?;
    parse_seed_toml(&content, SeedSource::External(dir))
}

// ── Application logic ───────────────────────────────────────────────────

fn apply_seed_pack(pack: &SeedPack, builder: &mut EtymologyBuilder) -> SeedResult<SeedReport> {
    builder.images_mut().merge(&pack.images);

    for (i, step) in pack.steps.iter().enumerate() {
        let op = step.op();
        let character = step.character().to_string();
        step.clone()
            .apply(builder)
            .map_err(|source| SeedError::Apply {
                id: pack.id.clone(),
                step: i + 1,
                op,
                character,
                source,
            })?;
    }

    tracing::info!(
        seed = %pack.id,
        steps = pack.steps.len(),
        images = pack.images.len(),
        "applied seed pack"
    );

    Ok(SeedReport {
        id: pack.id.clone(),
        steps_applied: pack.steps.len(),
        images_added: pack.images.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = r#"
        [seed]
        id = "demo"
        name = "Demo"
        version = "0.1.0"

        [config]
        duplicates = "reject"

        [images.seal]
        "林" = "seal/林.svg"

        [[steps]]
        op = "semsem"
        char = "林"
        left = "木"
        right = "木"
        left_strokes = 4
        definition = "grove"

        [[steps]]
        op = "phonsem"
        char = "期"
        left = "其"
        right = "月"
        split = 8
        definition = "period"
        images = "s"

        [[steps]]
        op = "icon"
        char = "然"
        definition = "so"
        notes = [
            { template = "sound_loan", new_meaning = "so", old_meaning = "to burn", new_character = "燃" },
        ]
        components = [
            { type = "meaning", char = "肰", fragment = [0, 8] },
            { type = "unknown", char = "灬", fragment = [8], notes = ["Four dots. "] },
        ]
    "#;

    fn demo_pack() -> SeedPack {
        parse_seed_toml(DEMO, SeedSource::Bundled).unwrap()
    }

    #[test]
    fn bundled_packs_parse() {
        let packs = bundled_packs();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].id, "basic");
        assert!(!packs[0].steps.is_empty());
    }

    #[test]
    fn parse_demo_pack() {
        let pack = demo_pack();
        assert_eq!(pack.steps.len(), 3);
        assert_eq!(pack.steps[1].op(), "phonsem");
        assert_eq!(pack.steps[2].character(), "然");
        assert_eq!(pack.images.len(), 1);
        assert_eq!(
            pack.config.as_ref().map(|c| c.duplicates),
            Some(crate::config::DuplicatePolicy::Reject)
        );
    }

    #[test]
    fn apply_demo_pack() {
        let mut builder = EtymologyBuilder::new();
        let report = apply_seed_pack(&demo_pack(), &mut builder).unwrap();
        assert_eq!(report.steps_applied, 3);

        let qi = builder.get("期").unwrap();
        assert_eq!(qi.components[0].character, "月");
        assert_eq!(qi.components[0].fragment, Some(Fragment::from_stroke(8)));
        assert_eq!(qi.components[1].kind, ComponentKind::Sound);
        assert_eq!(qi.components[1].fragment, Some(Fragment::range(0, 8)));
        assert!(qi.images[0].url.is_none());

        let ran = builder.get("然").unwrap();
        assert!(ran.notes.starts_with("The current meaning \"so\" is a phonetic loan."));
        assert_eq!(
            ran.components[1].notes.render(),
            "灬 is a component form of 火. The purpose of this component is unclear. Four dots. "
        );
    }

    #[test]
    fn failing_step_reports_position() {
        let text = r#"
            [seed]
            id = "broken"
            name = "Broken"
            version = "0.1.0"

            [[steps]]
            op = "simp"
            char = "马"
            traditional = "馬"
        "#;
        let pack = parse_seed_toml(text, SeedSource::Bundled).unwrap();
        let err = apply_seed_pack(&pack, &mut EtymologyBuilder::new()).unwrap_err();
        match err {
            SeedError::Apply { step, op, character, .. } => {
                assert_eq!(step, 1);
                assert_eq!(op, "simp");
                assert_eq!(character, "马");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_op_is_parse_error() {
        let text = r#"
            [seed]
            id = "x"
            name = "X"
            version = "0"

            [[steps]]
            op = "pictograph"
            char = "木"
        "#;
        assert!(matches!(
            parse_seed_toml(text, SeedSource::Bundled),
            Err(SeedError::Parse { .. })
        ));
    }

    #[test]
    fn discover_adds_directory_packs() {
        let dir = tempfile::TempDir::new().unwrap();
        let pack_dir = dir.path().join("demo");
        std::fs::create_dir(&pack_dir).unwrap();
        std::fs::write(pack_dir.join("seed.toml"), DEMO).unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();

        let reg = SeedRegistry::discover(dir.path());
        let ids: Vec<&str> = reg.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["basic", "demo"]);
        assert!(matches!(
            reg.get("demo").unwrap().source,
            SeedSource::External(_)
        ));
    }

    #[test]
    fn missing_pack() {
        let reg = SeedRegistry::bundled();
        assert!(matches!(reg.get("nope"), Err(SeedError::NotFound { .. })));
    }

    #[test]
    fn build_uses_pack_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let pack_dir = dir.path().join("demo");
        std::fs::create_dir(&pack_dir).unwrap();
        std::fs::write(pack_dir.join("seed.toml"), DEMO).unwrap();
        let reg = SeedRegistry::discover(dir.path());

        // The demo pack rejects duplicates, so applying it twice fails.
        let ids = vec!["demo".to_string(), "demo".to_string()];
        assert!(matches!(
            reg.build(&ids, None),
            Err(SeedError::Apply { step: 1, .. })
        ));

        // An explicit config wins over the pack's.
        let index = reg.build(&ids, Some(BuilderConfig::default())).unwrap();
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn bundled_pack_builds() {
        let reg = SeedRegistry::bundled();
        let index = reg.build(&["basic".to_string()], None).unwrap();
        assert!(index.contains("好"));
        assert!(index.contains("问"));
    }
}
