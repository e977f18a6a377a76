use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ValidationError, MAX_NAME_LEN};

/// Rank counts a character may be built with.
pub const RANK_CHOICES: [u32; 2] = [5, 6];

/// Datapack-safe character identifier: lowercase ASCII letters and inner underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterName(String);

impl CharacterName {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let len = raw.chars().count();
        if len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong(len));
        }
        for (i, c) in raw.chars().enumerate() {
            if !(c.is_ascii_lowercase() || c == '_') {
                return Err(ValidationError::NameCharacter(c));
            }
            if c == '_' && (i == 0 || i == len - 1) {
                return Err(ValidationError::NameEdgeUnderscore);
            }
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CharacterName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for CharacterName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CharacterName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CharacterName::new(&s).map_err(serde::de::Error::custom)
    }
}

/// `#rrggbb` text color. Alpha channels are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if !raw.starts_with('#') {
            return Err(ValidationError::ColorMissingHash);
        }
        match raw.len() {
            7 => {}
            9 => return Err(ValidationError::ColorAlphaChannel),
            n => return Err(ValidationError::ColorLength(n)),
        }
        if let Some(bad) = raw.chars().skip(1).find(|c| !c.is_ascii_hexdigit()) {
            return Err(ValidationError::ColorDigit(bad));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HexColor::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Per-rank stat growth of a class archetype.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterClass {
    pub health_per_rank: i32,
    pub armor_per_rank: i32,
    /// Fractions, e.g. 0.08 is +8% per rank.
    pub melee_damage_per_rank: f64,
    pub ranged_damage_per_rank: f64,
    pub general_damage_per_rank: f64,
    pub damage_resistance_per_rank: f64,
}

impl CharacterClass {
    /// Every stat must stay representable when scaled up to `ranks`.
    pub fn check(&self, ranks: u32) -> Result<(), ValidationError> {
        let steps = i32::try_from(ranks).map_err(|_| ValidationError::Ranks(ranks.to_string()))?;
        for (stat, per_rank) in [
            ("health", self.health_per_rank),
            ("armor", self.armor_per_rank),
        ] {
            if per_rank.checked_mul(steps).is_none() {
                return Err(ValidationError::ClassStat(stat, ranks));
            }
        }
        for (stat, per_rank) in [
            ("melee damage", self.melee_damage_per_rank),
            ("ranged damage", self.ranged_damage_per_rank),
            ("general damage", self.general_damage_per_rank),
            ("damage resistance", self.damage_resistance_per_rank),
        ] {
            // Descriptions render the scaled value as a percentage.
            if !(per_rank * f64::from(ranks) * 100.0).is_finite() {
                return Err(ValidationError::ClassStat(stat, ranks));
            }
        }
        Ok(())
    }
}

/// The four built-in class archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassPreset {
    Melee,
    Ranged,
    Defense,
    Mage,
}

impl ClassPreset {
    pub const ALL: [ClassPreset; 4] = [
        ClassPreset::Melee,
        ClassPreset::Ranged,
        ClassPreset::Defense,
        ClassPreset::Mage,
    ];

    pub fn stats(self) -> CharacterClass {
        match self {
            ClassPreset::Melee => CharacterClass {
                health_per_rank: 2,
                armor_per_rank: 1,
                melee_damage_per_rank: 0.08,
                ..CharacterClass::default()
            },
            ClassPreset::Ranged => CharacterClass {
                health_per_rank: 1,
                armor_per_rank: 1,
                ranged_damage_per_rank: 0.08,
                ..CharacterClass::default()
            },
            ClassPreset::Defense => CharacterClass {
                health_per_rank: 2,
                armor_per_rank: 2,
                damage_resistance_per_rank: 0.05,
                ..CharacterClass::default()
            },
            ClassPreset::Mage => CharacterClass {
                health_per_rank: 1,
                armor_per_rank: 1,
                general_damage_per_rank: 0.08,
                ..CharacterClass::default()
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClassPreset::Melee => "Melee",
            ClassPreset::Ranged => "Ranged",
            ClassPreset::Defense => "Defense",
            ClassPreset::Mage => "Mage",
        }
    }

    /// Resolve a 1-based menu choice.
    pub fn from_choice(input: &str) -> Result<Self, ValidationError> {
        match input.trim().parse::<usize>() {
            Ok(n @ 1..=4) => Ok(Self::ALL[n - 1]),
            _ => Err(ValidationError::ClassChoice(input.trim().to_string())),
        }
    }
}

/// Parse a rank count entered by the user.
pub fn parse_ranks(input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(n) if RANK_CHOICES.contains(&n) => Ok(n),
        _ => Err(ValidationError::Ranks(input.trim().to_string())),
    }
}

/// Trim and check a free-text display name.
pub fn parse_display_name(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDisplayName);
    }
    Ok(trimmed.to_string())
}

/// A fully validated character. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CharacterFields")]
pub struct Character {
    name: CharacterName,
    display_name: String,
    text_color: HexColor,
    secondary_color: HexColor,
    ranks: u32,
    class: CharacterClass,
}

impl Character {
    pub fn new(
        name: CharacterName,
        display_name: &str,
        text_color: HexColor,
        secondary_color: HexColor,
        ranks: u32,
        class: CharacterClass,
    ) -> Result<Self, ValidationError> {
        if !RANK_CHOICES.contains(&ranks) {
            return Err(ValidationError::Ranks(ranks.to_string()));
        }
        class.check(ranks)?;
        Ok(Self {
            name,
            display_name: parse_display_name(display_name)?,
            text_color,
            secondary_color,
            ranks,
            class,
        })
    }

    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn text_color(&self) -> &HexColor {
        &self.text_color
    }

    pub fn secondary_color(&self) -> &HexColor {
        &self.secondary_color
    }

    pub fn ranks(&self) -> u32 {
        self.ranks
    }

    pub fn class(&self) -> &CharacterClass {
        &self.class
    }
}

#[derive(Deserialize)]
struct CharacterFields {
    name: CharacterName,
    display_name: String,
    text_color: HexColor,
    secondary_color: HexColor,
    ranks: u32,
    class: CharacterClass,
}

impl TryFrom<CharacterFields> for Character {
    type Error = ValidationError;

    fn try_from(f: CharacterFields) -> Result<Self, Self::Error> {
        Character::new(
            f.name,
            &f.display_name,
            f.text_color,
            f.secondary_color,
            f.ranks,
            f.class,
        )
    }
}
