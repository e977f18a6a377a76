use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rankforge_core::documents::DocumentKind;
use serde::Serialize;

/// Which step of generation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStep {
    CreateDirectory,
    Validate,
    Serialize,
    Write,
}

#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub step: FailureStep,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    pub kind: DocumentKind,
    pub stage: u32,
    pub path: PathBuf,
}

/// Outcome of generating one character's tree.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub character: String,
    pub generated_at: DateTime<Utc>,
    pub output_dir: PathBuf,
    pub written: Vec<WrittenFile>,
    pub failures: Vec<Failure>,
}

impl GenerationReport {
    pub fn new(character: &str, output_dir: PathBuf) -> Self {
        Self {
            character: character.to_string(),
            generated_at: Utc::now(),
            output_dir,
            written: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn written_of(&self, kind: DocumentKind) -> usize {
        self.written.iter().filter(|w| w.kind == kind).count()
    }

    /// One-line summary for the terminal.
    pub fn summary(&self) -> String {
        if self.is_complete() {
            format!(
                "{}: wrote {} files under {}",
                self.character,
                self.written.len(),
                self.output_dir.display()
            )
        } else {
            format!(
                "{}: wrote {} files under {}, {} failed",
                self.character,
                self.written.len(),
                self.output_dir.display(),
                self.failures.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_mentions_failures() {
        let mut report = GenerationReport::new("hero", PathBuf::from("out"));
        report.written.push(WrittenFile {
            kind: DocumentKind::Evolution,
            stage: 0,
            path: PathBuf::from("out/powers/flavors/hero/0star/evo.json"),
        });
        assert!(report.is_complete());
        assert_eq!(report.summary(), "hero: wrote 1 files under out");

        report.failures.push(Failure {
            path: PathBuf::from("out/origins"),
            step: FailureStep::CreateDirectory,
            message: "denied".to_string(),
        });
        assert!(!report.is_complete());
        assert!(report.summary().ends_with("1 failed"));
        assert_eq!(report.written_of(DocumentKind::Evolution), 1);
        assert_eq!(report.written_of(DocumentKind::Terminal), 0);
    }

    #[test]
    fn serializes_step_names() {
        let failure = Failure {
            path: PathBuf::from("x"),
            step: FailureStep::CreateDirectory,
            message: "m".to_string(),
        };
        let v = serde_json::to_value(&failure).unwrap();
        assert_eq!(v["step"], "create_directory");
    }
}
