//! Radical canonicalization table.
//!
//! Many characters appear in a compressed, positional shape when they serve
//! as a component (水 becomes 氵 on the left, 火 becomes 灬 at the bottom).
//! The table maps each such radical form to its canonical character and the
//! position where the form is written. Each form belongs to exactly one
//! position.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Where in a character a radical form is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bottom,
    Left,
    Right,
    Top,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
        Direction::Top,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bottom => write!(f, "bottom"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Top => write!(f, "top"),
        }
    }
}

/// A positional variant of a canonical character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadicalForm {
    /// The variant glyph as it appears inside other characters.
    pub form: &'static str,
    /// The canonical character the form stands for.
    pub original: &'static str,
    /// Position where the form is used.
    pub direction: Direction,
}

static TABLE: &[(Direction, &[(&str, &str)])] = &[
    (
        Direction::Bottom,
        &[("龰", "止"), ("夂", "止"), ("灬", "火")],
    ),
    (
        Direction::Left,
        &[
            ("亻", "人"),
            ("彳", "行"),
            ("辶", "辵"),
            ("⺼", "肉"),
            ("讠", "言"),
            ("氵", "水"),
            ("扌", "手"),
            ("钅", "金"),
            ("釒", "金"),
            ("忄", "心"),
            ("⺮", "竹"),
            ("犭", "犬"),
            ("纟", "糸"),
            ("糹", "糸"),
            ("冄", "冉"),
            ("衤", "衣"),
            ("飠", "食"),
            ("饣", "食"),
        ],
    ),
    (
        Direction::Right,
        &[("刂", "刀"), ("⻏", "邑"), ("攵", "攴")],
    ),
    (Direction::Top, &[("艹", "艸")]),
];

static INDEX: OnceLock<HashMap<&'static str, RadicalForm>> = OnceLock::new();

fn build_index() -> HashMap<&'static str, RadicalForm> {
    let mut index = HashMap::new();
    for (direction, forms) in TABLE.iter() {
        for (form, original) in forms.iter() {
            index.insert(
                *form,
                RadicalForm {
                    form: *form,
                    original: *original,
                    direction: *direction,
                },
            );
        }
    }
    index
}

fn index() -> &'static HashMap<&'static str, RadicalForm> {
    INDEX.get_or_init(build_index)
}

/// Look up the canonical character and position of a radical form.
pub fn lookup(form: &str) -> Option<&'static RadicalForm> {
    index().get(form)
}

/// Whether `character` is a known radical form.
pub fn is_radical_form(character: &str) -> bool {
    lookup(character).is_some()
}

/// All forms used at `direction`, in table order.
pub fn forms_in(direction: Direction) -> Vec<&'static RadicalForm> {
    TABLE
        .iter()
        .filter(|(d, _)| *d == direction)
        .flat_map(|(_, forms)| forms.iter())
        .filter_map(|(form, _)| lookup(form))
        .collect()
}

/// Every radical form, grouped by direction in table order.
pub fn all_forms() -> Vec<&'static RadicalForm> {
    Direction::ALL.iter().flat_map(|d| forms_in(*d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_left_form() {
        let r = lookup("氵").unwrap();
        assert_eq!(r.original, "水");
        assert_eq!(r.direction, Direction::Left);
    }

    #[test]
    fn lookup_each_direction() {
        assert_eq!(lookup("灬").unwrap().direction, Direction::Bottom);
        assert_eq!(lookup("刂").unwrap().direction, Direction::Right);
        assert_eq!(lookup("艹").unwrap().direction, Direction::Top);
    }

    #[test]
    fn canonical_characters_are_not_forms() {
        assert!(!is_radical_form("水"));
        assert!(!is_radical_form("女"));
        assert!(lookup("").is_none());
    }

    #[test]
    fn each_form_in_exactly_one_direction() {
        let total: usize = TABLE.iter().map(|(_, forms)| forms.len()).sum();
        assert_eq!(index().len(), total, "a radical form is listed twice");
        assert_eq!(all_forms().len(), total);
    }

    #[test]
    fn forms_in_keeps_table_order() {
        let bottom: Vec<&str> = forms_in(Direction::Bottom).iter().map(|r| r.form).collect();
        assert_eq!(bottom, vec!["龰", "夂", "灬"]);
        assert_eq!(forms_in(Direction::Left).len(), 18);
        assert_eq!(forms_in(Direction::Top).len(), 1);
    }

    #[test]
    fn direction_parses_lowercase() {
        let d: Direction = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(d, Direction::Right);
        assert_eq!(Direction::Top.to_string(), "top");
    }
}
