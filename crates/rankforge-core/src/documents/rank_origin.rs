use serde_json::{json, Value};

use super::{souls_required, star_string, DocumentBuilder, DocumentKind};
use crate::types::Character;

impl DocumentBuilder<'_> {
    /// `<stage>star.json`: the unchoosable origin a player holds at `stage`.
    ///
    /// Ranks above zero also carry a stat-upgrade power. The terminal rank
    /// has no stat-upgrade file of its own and keeps the last one generated.
    pub fn rank_origin(&self, character: &Character, stage: u32) -> Value {
        let ranks = character.ranks();

        let mut powers = Vec::with_capacity(2);
        if stage < ranks {
            powers.push(self.id(DocumentKind::Evolution, character, stage));
        } else {
            powers.push(self.id(DocumentKind::Terminal, character, ranks));
        }
        if stage > 0 {
            let stats_stage = stage.min(ranks - 1);
            powers.push(self.id(DocumentKind::StatUpgrades, character, stats_stage));
        }

        let description = if stage < ranks {
            format!(
                "{} at rank {stage} of {ranks}. Absorb {} soulstones to evolve.",
                character.display_name(),
                souls_required(stage)
            )
        } else {
            format!(
                "{} has reached the final rank. Soulstones can no longer be absorbed.",
                character.display_name()
            )
        };

        json!({
            "name": star_string(stage, ranks),
            "description": description,
            "powers": powers,
            "icon": { "item": self.config.icon_item },
            "order": stage,
            "impact": 0,
            "unchoosable": true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::character;
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::types::ClassPreset;

    fn origin(ranks: u32, stage: u32) -> Value {
        let config = GeneratorConfig::default();
        DocumentBuilder::new(&config).rank_origin(&character(ClassPreset::Ranged, ranks), stage)
    }

    #[test]
    fn base_rank_has_only_evolution_power() {
        let doc = origin(5, 0);
        assert_eq!(doc["name"], "[☆☆☆☆☆]");
        assert_eq!(doc["powers"], json!(["rf:flavors/test_hero/0star/evo"]));
        assert!(doc["description"].as_str().unwrap().contains("Absorb 20 soulstones"));
    }

    #[test]
    fn intermediate_rank_adds_stat_upgrades() {
        let doc = origin(5, 2);
        assert_eq!(doc["name"], "[★★☆☆☆]");
        assert_eq!(
            doc["powers"],
            json!([
                "rf:flavors/test_hero/2star/evo",
                "rf:flavors/test_hero/2star/stat_upgrades"
            ])
        );
        assert!(doc["description"].as_str().unwrap().contains("Absorb 60 soulstones"));
    }

    #[test]
    fn terminal_rank_points_at_preventsouls() {
        let doc = origin(6, 6);
        assert_eq!(doc["name"], "[★★★★★★]");
        assert_eq!(
            doc["powers"],
            json!([
                "rf:flavors/test_hero/6star/preventsouls",
                "rf:flavors/test_hero/5star/stat_upgrades"
            ])
        );
        assert!(doc["description"].as_str().unwrap().contains("final rank"));
    }

    #[test]
    fn fixed_flags() {
        let doc = origin(5, 3);
        assert_eq!(doc["unchoosable"], true);
        assert_eq!(doc["impact"], 0);
        assert_eq!(doc["order"], 3);
        assert_eq!(doc["icon"]["item"], "minecraft:nether_star");
    }
}
