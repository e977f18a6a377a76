use serde_json::{json, Map, Value};

use super::DocumentBuilder;
use crate::stats::stat_at;
use crate::types::{Character, CharacterClass};

const MAX_HEALTH: &str = "minecraft:generic.max_health";
const ARMOR: &str = "minecraft:generic.armor";

/// Stat values of a class at one stage, all scaled from a base of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaledStats {
    health: i32,
    armor: i32,
    melee: f64,
    ranged: f64,
    general: f64,
    resistance: f64,
}

impl ScaledStats {
    fn at(class: &CharacterClass, stage: u32) -> Self {
        Self {
            health: stat_at(0, class.health_per_rank, stage),
            armor: stat_at(0, class.armor_per_rank, stage),
            melee: stat_at(0.0, class.melee_damage_per_rank, stage),
            ranged: stat_at(0.0, class.ranged_damage_per_rank, stage),
            general: stat_at(0.0, class.general_damage_per_rank, stage),
            resistance: stat_at(0.0, class.damage_resistance_per_rank, stage),
        }
    }
}

/// Percentage text for a fraction: `0.24` -> `"24"`, `0.125` -> `"12.5"`.
pub fn format_percent(fraction: f64) -> String {
    let s = format!("{:.2}", fraction * 100.0);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// "Health +4, Armor +2, Melee Damage +16%" for every non-zero dimension,
/// in the fixed order health, armor, melee, ranged, general, resistance.
pub fn stat_description(class: &CharacterClass, stage: u32) -> String {
    let s = ScaledStats::at(class, stage);
    let mut clauses = Vec::new();
    if class.health_per_rank != 0 {
        clauses.push(format!("Health +{}", s.health));
    }
    if class.armor_per_rank != 0 {
        clauses.push(format!("Armor +{}", s.armor));
    }
    let percents = [
        ("Melee Damage", class.melee_damage_per_rank, s.melee),
        ("Ranged Damage", class.ranged_damage_per_rank, s.ranged),
        ("General Damage", class.general_damage_per_rank, s.general),
        ("Damage Resistance", class.damage_resistance_per_rank, s.resistance),
    ];
    for (label, per_rank, value) in percents {
        if per_rank != 0.0 {
            clauses.push(format!("{label} +{}%", format_percent(value)));
        }
    }
    clauses.join(", ")
}

impl DocumentBuilder<'_> {
    /// `stat_upgrades.json`: attribute and damage modifiers for one stage.
    pub fn stat_upgrades(&self, character: &Character, stage: u32) -> Value {
        let class = character.class();
        let s = ScaledStats::at(class, stage);

        let mut doc = Map::new();
        doc.insert("name".into(), json!(format!("Rank {stage} Stats")));
        doc.insert("description".into(), json!(stat_description(class, stage)));
        doc.insert("hidden".into(), json!(true));
        doc.insert("type".into(), json!("origins:multiple"));

        let mut modifiers = Vec::new();
        if class.health_per_rank != 0 {
            modifiers.push(attribute_modifier(MAX_HEALTH, "health", s.health));
        }
        if class.armor_per_rank != 0 {
            modifiers.push(attribute_modifier(ARMOR, "armor", s.armor));
        }
        if !modifiers.is_empty() {
            doc.insert(
                "attributes".into(),
                json!({
                    "type": "origins:attribute",
                    "modifiers": modifiers,
                    "update_health": true
                }),
            );
        }

        if class.melee_damage_per_rank != 0.0 {
            doc.insert(
                "melee_damage".into(),
                damage_dealt(s.melee, Some(projectile_condition(true))),
            );
        }
        if class.ranged_damage_per_rank != 0.0 {
            doc.insert(
                "ranged_damage".into(),
                damage_dealt(s.ranged, Some(projectile_condition(false))),
            );
        }
        if class.general_damage_per_rank != 0.0 {
            doc.insert("general_damage".into(), damage_dealt(s.general, None));
        }
        if class.damage_resistance_per_rank != 0.0 {
            doc.insert(
                "damage_resistance".into(),
                json!({
                    "type": "origins:modify_damage_taken",
                    "modifier": multiply_base(-s.resistance)
                }),
            );
        }

        Value::Object(doc)
    }
}

fn attribute_modifier(attribute: &str, label: &str, value: i32) -> Value {
    json!({
        "attribute": attribute,
        "operation": "addition",
        "value": value,
        "name": format!("rankforge {label}")
    })
}

fn multiply_base(value: f64) -> Value {
    json!({
        "operation": "multiply_base",
        "value": value
    })
}

/// Inverted for melee (not a projectile), plain for ranged.
fn projectile_condition(inverted: bool) -> Value {
    json!({
        "type": "origins:projectile",
        "inverted": inverted
    })
}

fn damage_dealt(value: f64, condition: Option<Value>) -> Value {
    let mut power = json!({ "type": "origins:modify_damage_dealt" });
    if let Some(condition) = condition {
        power["damage_condition"] = condition;
    }
    power["modifier"] = multiply_base(value);
    power
}
