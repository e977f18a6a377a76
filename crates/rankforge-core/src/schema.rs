//! Output contracts for generated documents.
//!
//! These schemas describe what rankforge promises to emit. They are checked
//! before every write; they are not a model of what the game accepts.

use std::collections::HashMap;

use jsonschema::Validator;
use serde_json::Value;

use crate::documents::DocumentKind;
use crate::errors::{SchemaError, SchemaIssue};

const EVOLUTION: &str = include_str!("../schema/evolution.schema.json");
const STAT_UPGRADES: &str = include_str!("../schema/stat_upgrades.schema.json");
const RANK_ORIGIN: &str = include_str!("../schema/rank_origin.schema.json");
const TERMINAL: &str = include_str!("../schema/terminal.schema.json");

/// Embedded schema text for `kind`.
fn schema_source(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Evolution => EVOLUTION,
        DocumentKind::StatUpgrades => STAT_UPGRADES,
        DocumentKind::RankOrigin => RANK_ORIGIN,
        DocumentKind::Terminal => TERMINAL,
    }
}

/// Compile the validator for one document kind.
pub fn validator_for(kind: DocumentKind) -> Result<Validator, SchemaError> {
    let schema: Value = serde_json::from_str(schema_source(kind))
        .map_err(|e| SchemaError::Compile(kind.as_str(), e.to_string()))?;
    Validator::new(&schema).map_err(|e| SchemaError::Compile(kind.as_str(), e.to_string()))
}

/// Validators for every document kind, compiled once.
pub struct DocumentSchemas {
    validators: HashMap<DocumentKind, Validator>,
}

impl DocumentSchemas {
    pub fn compile() -> Result<Self, SchemaError> {
        let mut validators = HashMap::new();
        for kind in DocumentKind::ALL {
            validators.insert(kind, validator_for(kind)?);
        }
        Ok(Self { validators })
    }

    pub fn check(&self, kind: DocumentKind, doc: &Value) -> Result<(), SchemaError> {
        let Some(validator) = self.validators.get(&kind) else {
            return Err(SchemaError::Compile(kind.as_str(), "not compiled".to_string()));
        };
        if validator.is_valid(doc) {
            return Ok(());
        }
        let issues = validator
            .iter_errors(doc)
            .map(|error| {
                let path = error.instance_path.to_string();
                SchemaIssue {
                    path: if path.is_empty() {
                        "(root)".to_string()
                    } else {
                        path
                    },
                    message: error.to_string(),
                }
            })
            .collect();
        Err(SchemaError::Violations {
            kind: kind.as_str(),
            issues,
        })
    }
}
