use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Workspace-level config file, read when present.
pub const WORKSPACE_CONFIG: &str = ".rankforge/config.json";

/// Generator settings. Every field has a default so config files may be partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Root of the generated tree (the datapack's `data/<namespace>` folder).
    pub output_dir: PathBuf,
    /// Datapack namespace used in every power and origin id.
    pub namespace: String,
    /// Item that feeds the evolution resource.
    pub soulstone_item: String,
    /// Item shown as the rank origin icon.
    pub icon_item: String,
    /// Origin layer holding the rank origins.
    pub rank_layer: String,
    pub bar_sprite: String,
    pub bar_index: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            namespace: "rf".to_string(),
            soulstone_item: "minecraft:echo_shard".to_string(),
            icon_item: "minecraft:nether_star".to_string(),
            rank_layer: "rf:ranks".to_string(),
            bar_sprite: "origins:textures/gui/resource_bar.png".to_string(),
            bar_index: 6,
        }
    }
}

impl GeneratorConfig {
    /// Resolve config: defaults, then the workspace file, then `explicit`.
    ///
    /// A missing workspace file is ignored; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = serde_json::to_value(Self::default())?;

        let workspace = Path::new(WORKSPACE_CONFIG);
        if workspace.is_file() {
            tracing::debug!(path = %workspace.display(), "loading workspace config");
            overlay(&mut merged, &read_layer(workspace)?);
        }

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            overlay(&mut merged, &read_layer(path)?);
        }

        let config: Self = serde_json::from_value(merged).context("invalid config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_namespace(&self.namespace) {
            bail!(
                "invalid namespace \"{}\": use lowercase letters, digits, '_', '-' or '.'",
                self.namespace
            );
        }
        for (field, id) in [
            ("soulstone_item", &self.soulstone_item),
            ("icon_item", &self.icon_item),
            ("rank_layer", &self.rank_layer),
            ("bar_sprite", &self.bar_sprite),
        ] {
            if !is_identifier(id) {
                bail!(
                    "{field} must be a namespaced id like \"minecraft:echo_shard\" \
                     in lowercase (got \"{id}\")"
                );
            }
        }
        Ok(())
    }
}

fn is_namespace(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_-.".contains(c))
}

/// `namespace:path`, the same resource location form the output schemas accept.
fn is_identifier(id: &str) -> bool {
    let Some((namespace, path)) = id.split_once(':') else {
        return false;
    };
    is_namespace(namespace)
        && !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_-./".contains(c))
}

fn read_layer(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    let data: Value = serde_json::from_str(&content)
        .with_context(|| format!("{}: invalid JSON", path.display()))?;
    if !data.is_object() {
        bail!("{}: config must be a JSON object", path.display());
    }
    Ok(data)
}

/// Overlay keys take precedence.
fn overlay(base: &mut Value, layer: &Value) {
    if let (Some(base_obj), Some(layer_obj)) = (base.as_object_mut(), layer.as_object()) {
        for (key, value) in layer_obj {
            base_obj.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = GeneratorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.namespace, "rf");
        assert_eq!(config.soulstone_item, "minecraft:echo_shard");
    }

    #[test]
    fn partial_file_overrides_only_its_keys() {
        let file = config_file(r#"{"namespace": "heroes", "bar_index": 2}"#);
        let config = GeneratorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.namespace, "heroes");
        assert_eq!(config.bar_index, 2);
        assert_eq!(config.icon_item, GeneratorConfig::default().icon_item);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(GeneratorConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn identifiers_match_resource_location_form() {
        assert!(is_identifier("minecraft:echo_shard"));
        assert!(is_identifier("origins:textures/gui/resource_bar.png"));
        assert!(is_identifier("my-pack.v2:items/soul_stone"));
        assert!(!is_identifier("echo_shard"));
        assert!(!is_identifier("minecraft:"));
        assert!(!is_identifier(":echo_shard"));
        assert!(!is_identifier("minecraft:Nether_Star"));
        assert!(!is_identifier("mine craft:stone"));
        assert!(!is_identifier("minecraft:a:b"));
    }

    #[test]
    fn unknown_keys_and_bad_values_are_rejected() {
        let file = config_file(r#"{"namespce": "typo"}"#);
        assert!(GeneratorConfig::load(Some(file.path())).is_err());

        let file = config_file(r#"{"namespace": "Bad Space"}"#);
        assert!(GeneratorConfig::load(Some(file.path())).is_err());

        let file = config_file(r#"{"soulstone_item": "echo_shard"}"#);
        assert!(GeneratorConfig::load(Some(file.path())).is_err());

        let file = config_file(r#"{"icon_item": "minecraft:Nether_Star"}"#);
        assert!(GeneratorConfig::load(Some(file.path())).is_err());

        let file = config_file(r#"{"soulstone_item": "Heroes:Soulstone"}"#);
        assert!(GeneratorConfig::load(Some(file.path())).is_err());

        let file = config_file("[1, 2]");
        assert!(GeneratorConfig::load(Some(file.path())).is_err());
    }
}
