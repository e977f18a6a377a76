use std::path::{Path, PathBuf};

use anyhow::Result;
use rankforge_core::config::GeneratorConfig;
use rankforge_core::documents::DocumentBuilder;
use rankforge_core::errors::SchemaError;
use rankforge_core::schema::DocumentSchemas;
use rankforge_core::types::Character;

use crate::atomic::{atomic_write, ensure_dir};
use crate::layout::{plan, PlannedFile};
use crate::report::{Failure, FailureStep, GenerationReport, WrittenFile};

/// Why a single planned file was not written.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("cannot serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0:#}")]
    Write(anyhow::Error),
}

impl FileError {
    fn step(&self) -> FailureStep {
        match self {
            FileError::Schema(_) => FailureStep::Validate,
            FileError::Serialize(_) => FailureStep::Serialize,
            FileError::Write(_) => FailureStep::Write,
        }
    }
}

/// Materializes character trees under the configured output directory.
///
/// Failures are per file: one bad directory or write is recorded and the
/// remaining files are still attempted. Nothing is rolled back.
pub struct Generator<'a> {
    builder: DocumentBuilder<'a>,
    schemas: DocumentSchemas,
    output_dir: PathBuf,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Result<Self> {
        Ok(Self {
            builder: DocumentBuilder::new(config),
            schemas: DocumentSchemas::compile()?,
            output_dir: config.output_dir.clone(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn generate(&self, character: &Character) -> GenerationReport {
        let plan = plan(character.name(), character.ranks());
        let mut report = GenerationReport::new(character.name().as_str(), self.output_dir.clone());
        tracing::info!(
            character = %character.name(),
            ranks = character.ranks(),
            files = plan.files.len(),
            "generating"
        );

        for dir in &plan.directories {
            let full = self.output_dir.join(dir);
            if let Err(e) = ensure_dir(&full) {
                tracing::error!(path = %full.display(), "{e:#}");
                report.failures.push(Failure {
                    path: full,
                    step: FailureStep::CreateDirectory,
                    message: format!("{e:#}"),
                });
            }
        }

        for file in &plan.files {
            let full = self.output_dir.join(file.path());
            match self.write_file(character, file, &full) {
                Ok(()) => {
                    tracing::debug!(kind = %file.kind, stage = file.stage, path = %full.display(), "wrote");
                    report.written.push(WrittenFile {
                        kind: file.kind,
                        stage: file.stage,
                        path: full,
                    });
                }
                Err(e) => {
                    tracing::error!(kind = %file.kind, stage = file.stage, path = %full.display(), "{e}");
                    report.failures.push(Failure {
                        path: full,
                        step: e.step(),
                        message: e.to_string(),
                    });
                }
            }
        }

        if report.is_complete() {
            tracing::info!(character = %character.name(), written = report.written.len(), "done");
        } else {
            tracing::warn!(
                character = %character.name(),
                written = report.written.len(),
                failed = report.failures.len(),
                "generation finished with failures"
            );
        }
        report
    }

    pub fn generate_all(&self, characters: &[Character]) -> Vec<GenerationReport> {
        characters.iter().map(|c| self.generate(c)).collect()
    }

    fn write_file(
        &self,
        character: &Character,
        file: &PlannedFile,
        full: &Path,
    ) -> Result<(), FileError> {
        let doc = self.builder.build(file.kind, character, file.stage);
        self.schemas.check(file.kind, &doc)?;
        let mut json = serde_json::to_string_pretty(&doc)?;
        json.push('\n');
        atomic_write(full, json.as_bytes()).map_err(FileError::Write)
    }
}
