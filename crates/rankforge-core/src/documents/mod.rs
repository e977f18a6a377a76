//! Origins document builders.
//!
//! Each builder is a pure function of a [`Character`] and an evolution
//! stage. Pack-wide settings (namespace, items, HUD sprite) come from the
//! [`GeneratorConfig`] the builder was created with.

mod evolution;
mod rank_origin;
mod stat_upgrades;
mod terminal;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeneratorConfig;
use crate::stats::stat_at;
use crate::types::Character;

pub use stat_upgrades::{format_percent, stat_description};

const FILLED_STAR: char = '\u{2605}';
const EMPTY_STAR: char = '\u{2606}';

/// The four generated document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Evolution,
    StatUpgrades,
    RankOrigin,
    Terminal,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Evolution,
        DocumentKind::StatUpgrades,
        DocumentKind::RankOrigin,
        DocumentKind::Terminal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Evolution => "evolution",
            DocumentKind::StatUpgrades => "stat_upgrades",
            DocumentKind::RankOrigin => "rank_origin",
            DocumentKind::Terminal => "terminal",
        }
    }

    /// Whether this kind is generated for `stage` of a `ranks`-rank character.
    pub fn applies_to(self, stage: u32, ranks: u32) -> bool {
        match self {
            DocumentKind::Evolution => stage < ranks,
            DocumentKind::StatUpgrades => stage > 0 && stage < ranks,
            DocumentKind::RankOrigin => stage <= ranks,
            DocumentKind::Terminal => stage == ranks,
        }
    }

    pub fn file_name(self, stage: u32) -> String {
        match self {
            DocumentKind::Evolution => "evo.json".to_string(),
            DocumentKind::StatUpgrades => "stat_upgrades.json".to_string(),
            DocumentKind::RankOrigin => format!("{stage}star.json"),
            DocumentKind::Terminal => "preventsouls.json".to_string(),
        }
    }

    /// Directory holding the document, relative to the output root.
    pub fn directory(self, name: &str, stage: u32) -> PathBuf {
        match self {
            DocumentKind::RankOrigin => ["origins", "ranks", name].iter().collect(),
            _ => power_dir(name, stage),
        }
    }

    /// Resource id the framework derives from the document's location.
    pub fn id(self, namespace: &str, name: &str, stage: u32) -> String {
        match self {
            DocumentKind::RankOrigin => format!("{namespace}:ranks/{name}/{stage}star"),
            _ => {
                let file = self.file_name(stage);
                let stem = file.trim_end_matches(".json");
                format!("{namespace}:flavors/{name}/{stage}star/{stem}")
            }
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `powers/flavors/<name>/<stage>star`.
pub fn power_dir(name: &str, stage: u32) -> PathBuf {
    let rank = format!("{stage}star");
    ["powers", "flavors", name, rank.as_str()].iter().collect()
}

/// `origins/ranks/<name>/<stage>star`.
pub fn origin_dir(name: &str, stage: u32) -> PathBuf {
    let rank = format!("{stage}star");
    ["origins", "ranks", name, rank.as_str()].iter().collect()
}

/// Soulstones needed to leave `stage`: `20 + 20 * stage`.
pub fn souls_required(stage: u32) -> i32 {
    stat_at(20, 20, stage)
}

/// `[★★☆☆☆]` for `filled = 2, total = 5`.
pub fn star_string(filled: u32, total: u32) -> String {
    debug_assert!(filled <= total, "stage {filled} is past the last rank {total}");
    let filled = filled.min(total);
    let mut s = String::with_capacity((total as usize + 2) * 3);
    s.push('[');
    s.extend(std::iter::repeat(FILLED_STAR).take(filled as usize));
    s.extend(std::iter::repeat(EMPTY_STAR).take((total - filled) as usize));
    s.push(']');
    s
}

/// Builds every document kind for one pack configuration.
pub struct DocumentBuilder<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, kind: DocumentKind, character: &Character, stage: u32) -> Value {
        match kind {
            DocumentKind::Evolution => self.evolution(character, stage),
            DocumentKind::StatUpgrades => self.stat_upgrades(character, stage),
            DocumentKind::RankOrigin => self.rank_origin(character, stage),
            DocumentKind::Terminal => self.terminal(character, stage),
        }
    }

    fn id(&self, kind: DocumentKind, character: &Character, stage: u32) -> String {
        kind.id(&self.config.namespace, character.name().as_str(), stage)
    }

    /// Scoreboard objective tracking the character's current rank.
    fn rank_objective(character: &Character) -> String {
        format!("{}_rank", character.name())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{Character, CharacterName, ClassPreset, HexColor};

    pub fn character(preset: ClassPreset, ranks: u32) -> Character {
        Character::new(
            CharacterName::new("test_hero").unwrap(),
            "Test Hero",
            HexColor::new("#7fffd4").unwrap(),
            HexColor::new("#aa00ff").unwrap(),
            ranks,
            preset.stats(),
        )
        .unwrap()
    }
}
