//! End-to-end tests for the etymology builder.
//!
//! These tests drive the public construction API the way an initialization
//! sequence does and then read the frozen index the way the lookup layer
//! does.

use hanzi_etym::builder::{EtymologyBuilder, Phonosemantic};
use hanzi_etym::component::{ComponentKind, icon_component, meaning_component};
use hanzi_etym::error::{DeriveError, EtymError};
use hanzi_etym::fragment::{Fragment, StrokeSplit};
use hanzi_etym::images::{ImageTable, ScriptStage};
use hanzi_etym::notes::{Notes, sound_loan};
use hanzi_etym::radical;
use hanzi_etym::seeds::SeedRegistry;

#[test]
fn plain_entry_round_trips_through_index() {
    let mut builder = EtymologyBuilder::new();
    builder
        .add_etymology("木", "tree", "", Vec::new(), "")
        .unwrap();
    let index = builder.finalize();

    let json = index.entry_json("木").unwrap().unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "definition": "tree",
            "notes": "",
            "components": [],
            "images": []
        })
    );
}

#[test]
fn semsem_registers_two_meaning_components() {
    let mut builder = EtymologyBuilder::new();
    builder.semsem("好", "女", "子", 3, "good", "").unwrap();
    let index = builder.finalize();

    let json = index.entry_json("好").unwrap().unwrap();
    assert_eq!(
        json["components"],
        serde_json::json!([
            { "type": "meaning", "char": "女", "fragment": [0, 3] },
            { "type": "meaning", "char": "子", "fragment": [3] }
        ])
    );
}

#[test]
fn semsem_fragments_hold_for_any_split() {
    for n in [0u32, 1, 7, 30] {
        let mut builder = EtymologyBuilder::new();
        builder.semsem("x", "a", "b", n, "", "").unwrap();
        let e = builder.get("x").unwrap();
        assert_eq!(e.components[0].fragment, Some(Fragment::range(0, n)));
        assert_eq!(e.components[1].fragment, Some(Fragment::from_stroke(n)));
    }
}

#[test]
fn phonsem_equals_swapped_semphon() {
    let mut a = EtymologyBuilder::new();
    let mut b = EtymologyBuilder::new();
    let split = StrokeSplit::Explicit {
        left: Fragment::range(0, 2),
        right: Fragment::range(2, 6),
    };

    a.phonsem(
        Phonosemantic::new("c", "A", "B", split)
            .definition("d")
            .notes("nt. ")
            .obsolete_sound()
            .sound_and_meaning(),
    )
    .unwrap();
    b.semphon(
        Phonosemantic::new("c", "B", "A", split)
            .definition("d")
            .notes("nt. ")
            .obsolete_sound()
            .sound_and_meaning()
            .reversed(),
    )
    .unwrap();

    assert_eq!(a.get("c"), b.get("c"));

    let sound = &a.get("c").unwrap().components[1];
    assert_eq!(sound.character, "A");
    assert!(sound.notes.render().ends_with("A also serves as a meaning component. "));
}

#[test]
fn radical_forms_are_annotated_only_when_known() {
    let mut builder = EtymologyBuilder::new();
    builder
        .icon(
            "x",
            "",
            "",
            "",
            vec![
                meaning_component("扌", Fragment::range(0, 3)),
                meaning_component("手", Fragment::from_stroke(3)),
            ],
        )
        .unwrap();
    let e = builder.get("x").unwrap();

    let original = radical::lookup("扌").unwrap().original;
    assert!(
        e.components[0]
            .notes
            .starts_with(&format!("扌 is a component form of {original}. "))
    );
    assert!(e.components[1].notes.is_empty());
}

#[test]
fn images_follow_selector() {
    let mut images = ImageTable::new();
    for stage in ScriptStage::ALL {
        images.insert(stage, "人", &format!("{stage}/人.svg"));
    }
    let mut builder = EtymologyBuilder::new().with_images(images);
    builder
        .icon("人", "person", "", "obs", vec![icon_component("人", None::<Fragment>)])
        .unwrap();

    let e = builder.get("人").unwrap();
    let got: Vec<(&str, Option<&str>)> = e
        .images
        .iter()
        .map(|i| (i.caption.as_str(), i.url.as_deref()))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Oracle bone script", Some("oracle/人.svg")),
            ("Bronze script", Some("bronze/人.svg")),
            ("Seal script", Some("seal/人.svg")),
        ]
    );
}

#[test]
fn derived_entry_is_isolated() {
    let mut builder = EtymologyBuilder::new();
    builder
        .semphon(Phonosemantic::new("媽", "女", "馬", 3).definition("mother"))
        .unwrap();
    builder
        .simp("妈", "媽", &[Fragment::range(0, 3), Fragment::from_stroke(3)])
        .unwrap();

    builder.get_mut("妈").unwrap().components[1].character = "马".into();
    builder.get_mut("妈").unwrap().components[1].fragment = Some(Fragment::range(3, 6));

    let source = builder.get("媽").unwrap();
    assert_eq!(source.components[1].character, "馬");
    assert_eq!(source.components[1].fragment, Some(Fragment::from_stroke(3)));
    assert!(!source.notes.starts_with("Simplified"));
}

#[test]
fn derivation_before_source_fails() {
    let mut builder = EtymologyBuilder::new();
    let err = builder.simp("问", "問", &[]).unwrap_err();
    assert!(matches!(
        err,
        EtymError::Derive(DeriveError::SourceNotFound { ref traditional, .. }) if traditional == "問"
    ));
}

#[test]
fn forward_component_references_are_harmless() {
    let mut builder = EtymologyBuilder::new();
    builder.semsem("林", "木", "木", 4, "grove", "").unwrap();
    builder
        .add_etymology("木", "tree", "", Vec::new(), "")
        .unwrap();
    let index = builder.finalize();
    assert_eq!(index.len(), 2);
}

#[test]
fn structured_notes_render_in_entry() {
    let mut builder = EtymologyBuilder::new();
    builder
        .icon(
            "來",
            "to come",
            Notes::from(sound_loan("to come", "wheat", "麥")),
            "",
            Vec::new(),
        )
        .unwrap();
    let json = builder.finalize().entry_json("來").unwrap().unwrap();
    assert_eq!(
        json["notes"],
        "The current meaning \"to come\" is a phonetic loan. The original meaning \"wheat\" is now written as 麥."
    );
}

#[test]
fn bundled_pack_end_to_end() {
    let index = SeedRegistry::bundled()
        .build(&["basic".to_string()], None)
        .unwrap();

    let hao = index.get("好").unwrap();
    assert_eq!(hao.definition, "good");

    let he = index.get("河").unwrap();
    assert_eq!(he.components[0].kind, ComponentKind::Meaning);
    assert!(he.components[0].notes.starts_with("氵 is a component form of 水. "));
    assert!(
        he.components[1]
            .notes
            .starts_with("The pronunciation of 河 was similar to 可")
    );

    let wen = index.get("问").unwrap();
    assert!(wen.notes.starts_with("Simplified form of 問. Phonosemantic compound."));
    assert_eq!(wen.components[0].fragment, Some(Fragment::from_stroke(3)));
    assert_eq!(wen.components[1].fragment, Some(Fragment::range(0, 3)));

    let mu = index.get("木").unwrap();
    assert_eq!(mu.images.len(), 3);
    assert!(mu.images.iter().all(|i| i.url.is_some()));

    let ma = index.get("马").unwrap();
    assert_eq!(ma.definition, "horse");
}
