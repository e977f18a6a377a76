use serde_json::{json, Value};

use super::{souls_required, star_string, DocumentBuilder, DocumentKind};
use crate::actions::{self, ResourceOperation, Spread};
use crate::types::Character;

/// Sound cues played on rank-up: (sound, volume, pitch).
const RANK_UP_SOUNDS: [(&str, f64, f64); 4] = [
    ("minecraft:entity.player.levelup", 1.0, 1.0),
    ("minecraft:block.beacon.activate", 1.0, 1.2),
    ("minecraft:block.respawn_anchor.charge", 1.0, 0.8),
    ("minecraft:particle.soul_escape", 1.0, 1.0),
];

/// Particle bursts on rank-up: (particle, count, speed).
const RANK_UP_PARTICLES: [(&str, u32, f64); 3] = [
    ("minecraft:soul", 40, 0.05),
    ("minecraft:sculk_soul", 25, 0.1),
    ("minecraft:totem_of_undying", 60, 0.5),
];

impl DocumentBuilder<'_> {
    /// `evo.json`: the soulcount resource, its rank-up trigger, soulstone
    /// absorption, and the reset on origin change.
    pub fn evolution(&self, character: &Character, stage: u32) -> Value {
        let soulcount = format!(
            "{}_soulcount",
            self.id(DocumentKind::Evolution, character, stage)
        );
        let soulstone = actions::ingredient(&self.config.soulstone_item);

        json!({
            "name": "Soulstone Stuffs",
            "description": "Handles resource bar and evolving.",
            "hidden": true,
            "type": "origins:multiple",
            "soulcount": {
                "type": "origins:resource",
                "min": 0,
                "max": souls_required(stage),
                "start_value": 0,
                "hud_render": {
                    "should_render": true,
                    "sprite_location": self.config.bar_sprite,
                    "bar_index": self.config.bar_index,
                    "condition": {
                        "type": "origins:equipped_item",
                        "equipment_slot": "mainhand",
                        "item_condition": soulstone.clone()
                    }
                },
                "max_action": self.rank_up_action(character, stage)
            },
            "absorb": {
                "type": "origins:action_on_item_use",
                "item_condition": soulstone,
                "entity_action": actions::change_resource(&soulcount, 1.0, ResourceOperation::Add),
                "item_action": {
                    "type": "origins:consume",
                    "amount": 1
                }
            },
            "reset": {
                "type": "origins:action_on_callback",
                "entity_action_chosen": actions::and(vec![
                    actions::change_resource(&soulcount, 0.0, ResourceOperation::Set),
                    actions::execute_command(&format!(
                        "scoreboard players set @s {} {stage}",
                        Self::rank_objective(character)
                    )),
                ])
            }
        })
    }

    fn rank_up_action(&self, character: &Character, stage: u32) -> Value {
        let next = stage + 1;
        let next_origin = self.id(DocumentKind::RankOrigin, character, next);

        let mut steps = Vec::with_capacity(2 + RANK_UP_SOUNDS.len() + RANK_UP_PARTICLES.len());
        steps.push(actions::execute_command(&format!(
            "origin set @s {} {next_origin}",
            self.config.rank_layer
        )));
        steps.push(actions::execute_command(&announcement(character, next)));
        for (sound, volume, pitch) in RANK_UP_SOUNDS {
            steps.push(actions::play_sound(sound, volume, pitch));
        }
        let spread = actions::vector(0.5, 1.0, 0.5);
        for (particle, count, speed) in RANK_UP_PARTICLES {
            steps.push(actions::spawn_particles(
                particle,
                count,
                speed,
                Spread::Shared(&spread),
            ));
        }
        actions::and(steps)
    }
}

/// `tellraw` broadcast announcing that the player reached `next`.
fn announcement(character: &Character, next: u32) -> String {
    let text = character.text_color().as_str();
    let secondary = character.secondary_color().as_str();
    let components = json!([
        "",
        { "selector": "@s", "color": secondary },
        { "text": " has evolved into ", "color": secondary },
        { "text": character.display_name(), "color": text, "bold": true },
        { "text": format!(" {}", star_string(next, character.ranks())), "color": text }
    ]);
    format!("tellraw @a {components}")
}
