//! Card labels as emitted by the solver service.
//!
//! A label reads `{count}-{fill}-{color}-{shape}`, e.g. `2-stripes-purple-squiggle`.
//! Three cards form a set when every attribute is either shared by all three
//! or different on all three.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CardLabelError {
    #[error("label {0:?} does not have four '-'-separated parts")]
    WrongArity(String),
    #[error("unknown {attribute} {value:?}")]
    UnknownValue {
        attribute: &'static str,
        value: String,
    },
}

macro_rules! card_attribute {
    ($name:ident, $attr:literal, [$($variant:ident => $text:literal),+ $(,)?]) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: [$name; 3] = [$($name::$variant),+];

            #[inline]
            pub fn index(self) -> u8 {
                self as u8
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CardLabelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(CardLabelError::UnknownValue {
                        attribute: $attr,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

card_attribute!(CardCount, "count", [One => "1", Two => "2", Three => "3"]);
card_attribute!(CardFill, "fill", [Solid => "solid", Outline => "outline", Stripes => "stripes"]);
card_attribute!(CardColor, "color", [Red => "red", Green => "green", Purple => "purple"]);
card_attribute!(CardShape, "shape", [Diamond => "diamond", Capsule => "capsule", Squiggle => "squiggle"]);

/// Decoded card label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardLabel {
    pub count: CardCount,
    pub fill: CardFill,
    pub color: CardColor,
    pub shape: CardShape,
}

impl CardLabel {
    pub fn parse(label: &str) -> Result<Self, CardLabelError> {
        label.parse()
    }

    /// Attribute indices in label order.
    pub fn attributes(&self) -> [u8; 4] {
        [
            self.count.index(),
            self.fill.index(),
            self.color.index(),
            self.shape.index(),
        ]
    }

    fn from_attributes(attrs: [u8; 4]) -> Self {
        Self {
            count: CardCount::ALL[attrs[0] as usize],
            fill: CardFill::ALL[attrs[1] as usize],
            color: CardColor::ALL[attrs[2] as usize],
            shape: CardShape::ALL[attrs[3] as usize],
        }
    }

    /// The unique card completing a set with `self` and `other`.
    pub fn third(&self, other: &CardLabel) -> CardLabel {
        let (a, b) = (self.attributes(), other.attributes());
        // per attribute: equal -> same value, different -> the remaining one
        Self::from_attributes(std::array::from_fn(|i| (6 - a[i] - b[i]) % 3))
    }
}

impl FromStr for CardLabel {
    type Err = CardLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        let [count, fill, color, shape] = parts.as_slice() else {
            return Err(CardLabelError::WrongArity(s.to_string()));
        };
        Ok(Self {
            count: count.parse()?,
            fill: fill.parse()?,
            color: color.parse()?,
            shape: shape.parse()?,
        })
    }
}

impl fmt::Display for CardLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.count.as_str(),
            self.fill.as_str(),
            self.color.as_str(),
            self.shape.as_str()
        )
    }
}

/// Every attribute all-equal or all-different across the three cards.
pub fn is_valid_set(cards: &[CardLabel; 3]) -> bool {
    let [a, b, c] = cards.map(|card| card.attributes());
    (0..4).all(|i| (a[i] + b[i] + c[i]) % 3 == 0)
}

/// Enumerate all sets among `cards`, as index triples `[i, j, k]`.
///
/// For each pair `i < j` (in order) the completing card is looked up among
/// the cards before `i`; when a card value repeats, the latest earlier copy
/// wins. Each set is therefore reported once, as `[i, j, k]` with `k < i < j`.
pub fn find_sets(cards: &[CardLabel]) -> Vec<[usize; 3]> {
    let mut seen: HashMap<CardLabel, usize> = HashMap::new();
    let mut sets = Vec::new();
    for (i, card_i) in cards.iter().enumerate() {
        for (j, card_j) in cards.iter().enumerate().skip(i + 1) {
            if let Some(&k) = seen.get(&card_i.third(card_j)) {
                sets.push([i, j, k]);
            }
        }
        seen.insert(*card_i, i);
    }
    sets
}
