use serde_json::{json, Value};

use super::DocumentBuilder;
use crate::actions;
use crate::types::Character;

impl DocumentBuilder<'_> {
    /// `preventsouls.json`: blocks soulstone use at the final rank and pins
    /// the rank counter to `stage` whenever the origin is applied.
    pub fn terminal(&self, character: &Character, stage: u32) -> Value {
        json!({
            "name": "Max Rank",
            "description": "Soulstones can no longer be absorbed.",
            "hidden": true,
            "type": "origins:multiple",
            "block_soulstones": {
                "type": "origins:prevent_item_use",
                "item_condition": actions::ingredient(&self.config.soulstone_item)
            },
            "lock": {
                "type": "origins:action_on_callback",
                "entity_action_chosen": actions::execute_command(&format!(
                    "scoreboard players set @s {} {stage}",
                    Self::rank_objective(character)
                ))
            }
        })
    }
}
