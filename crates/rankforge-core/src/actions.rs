//! Reusable Origins action and condition fragments.
//!
//! Every constructor returns a freshly owned `Value`. A fragment attached to
//! more than one parent must be cloned first; `Spread::Shared` does that for
//! particle spreads.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// How `origins:change_resource` applies its `change`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceOperation {
    Add,
    Set,
}

impl ResourceOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceOperation::Add => "add",
            ResourceOperation::Set => "set",
        }
    }
}

/// Particle spread vector handed to [`spawn_particles`].
#[derive(Debug)]
pub enum Spread<'a> {
    /// A vector reused across several fragments; deep-copied on attach.
    Shared(&'a Value),
    /// A vector used exactly once; moved in.
    Owned(Value),
}

impl Spread<'_> {
    fn into_value(self) -> Value {
        match self {
            Spread::Shared(v) => v.clone(),
            Spread::Owned(v) => v,
        }
    }
}

/// `{x, y, z}` object as used by particle spreads.
pub fn vector(x: f64, y: f64, z: f64) -> Value {
    json!({ "x": x, "y": y, "z": z })
}

pub fn play_sound(sound: &str, volume: f64, pitch: f64) -> Value {
    json!({
        "type": "origins:play_sound",
        "sound": sound,
        "volume": volume,
        "pitch": pitch
    })
}

pub fn execute_command(command: &str) -> Value {
    json!({
        "type": "origins:execute_command",
        "command": command
    })
}

pub fn change_resource(resource: &str, change: f64, operation: ResourceOperation) -> Value {
    json!({
        "type": "origins:change_resource",
        "resource": resource,
        "change": change,
        "operation": operation.as_str()
    })
}

pub fn spawn_particles(particle: &str, count: u32, speed: f64, spread: Spread<'_>) -> Value {
    json!({
        "type": "origins:spawn_particles",
        "particle": particle,
        "count": count,
        "speed": speed,
        "spread": spread.into_value()
    })
}

/// `origins:and` wrapper running `actions` in order.
pub fn and(actions: Vec<Value>) -> Value {
    json!({
        "type": "origins:and",
        "actions": actions
    })
}

/// Item condition matching a single item id.
pub fn ingredient(item: &str) -> Value {
    json!({
        "type": "origins:ingredient",
        "ingredient": { "item": item }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_sound_shape() {
        let v = play_sound("minecraft:entity.player.levelup", 1.0, 0.5);
        assert_eq!(v["type"], "origins:play_sound");
        assert_eq!(v["sound"], "minecraft:entity.player.levelup");
        assert_eq!(v["volume"], 1.0);
        assert_eq!(v["pitch"], 0.5);
    }

    #[test]
    fn change_resource_operation_literal() {
        let v = change_resource("rf:x_soulcount", 1.0, ResourceOperation::Add);
        assert_eq!(v["type"], "origins:change_resource");
        assert_eq!(v["resource"], "rf:x_soulcount");
        assert_eq!(v["change"], 1.0);
        assert_eq!(v["operation"], "add");
        let v = change_resource("rf:x_soulcount", 0.0, ResourceOperation::Set);
        assert_eq!(v["operation"], "set");
    }

    #[test]
    fn shared_spread_is_deep_copied() {
        let spread = vector(0.5, 1.0, 0.5);
        let mut first = spawn_particles("minecraft:soul", 10, 0.1, Spread::Shared(&spread));
        let second = spawn_particles("minecraft:end_rod", 5, 0.2, Spread::Shared(&spread));

        first["spread"]["x"] = json!(9.0);

        assert_eq!(second["spread"]["x"], 0.5);
        assert_eq!(spread["x"], 0.5);
    }

    #[test]
    fn owned_spread_moves_in() {
        let v = spawn_particles("minecraft:soul", 3, 0.0, Spread::Owned(vector(1.0, 2.0, 3.0)));
        assert_eq!(v["spread"], json!({ "x": 1.0, "y": 2.0, "z": 3.0 }));
        assert_eq!(v["count"], 3);
    }

    #[test]
    fn and_keeps_order() {
        let v = and(vec![execute_command("say a"), execute_command("say b")]);
        assert_eq!(v["type"], "origins:and");
        assert_eq!(v["actions"][0]["command"], "say a");
        assert_eq!(v["actions"][1]["command"], "say b");
    }

    #[test]
    fn ingredient_condition() {
        let v = ingredient("minecraft:echo_shard");
        assert_eq!(v["ingredient"]["item"], "minecraft:echo_shard");
    }
}
