use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A perturbable visual dimension of a grid cell.
///
/// Declaration order is the canonical order used when an attribute set is
/// listed (metadata `types`, log lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Color,
    Size,
    Rotation,
    Position,
    Blur,
    Occlusion,
    Fracture,
    Overlap,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Color,
        Attribute::Size,
        Attribute::Rotation,
        Attribute::Position,
        Attribute::Blur,
        Attribute::Occlusion,
        Attribute::Fracture,
        Attribute::Overlap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Color => "color",
            Attribute::Size => "size",
            Attribute::Rotation => "rotation",
            Attribute::Position => "position",
            Attribute::Blur => "blur",
            Attribute::Occlusion => "occlusion",
            Attribute::Fracture => "fracture",
            Attribute::Overlap => "overlap",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Attribute::ALL
            .into_iter()
            .find(|a| a.as_str() == needle)
            .ok_or_else(|| ConfigError::UnknownAttribute(s.to_string()))
    }
}

/// A duplicate-free set of attributes, stored as a bitset.
///
/// Serializes as a list of attribute names in canonical order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeSet(u8);

impl AttributeSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0xFF)
    }

    pub fn contains(&self, attr: Attribute) -> bool {
        self.0 & attr.bit() != 0
    }

    pub fn insert(&mut self, attr: Attribute) {
        self.0 |= attr.bit();
    }

    pub fn remove(&mut self, attr: Attribute) {
        self.0 &= !attr.bit();
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        Attribute::ALL.into_iter().filter(|a| self.contains(*a))
    }

    pub fn to_vec(&self) -> Vec<Attribute> {
        self.iter().collect()
    }

    /// Parse a comma-separated list such as `"color,size"`.
    pub fn parse_list(list: &str) -> Result<Self, ConfigError> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Attribute::from_str)
            .collect()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = Self::empty();
        for attr in iter {
            set.insert(attr);
        }
        set
    }
}

impl fmt::Debug for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(|a| a.as_str()).collect();
        write!(f, "{}", names.join("+"))
    }
}

impl Serialize for AttributeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AttributeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let attrs = Vec::<Attribute>::deserialize(deserializer)?;
        Ok(attrs.into_iter().collect())
    }
}
