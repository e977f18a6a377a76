use std::path::PathBuf;

use rankforge_core::documents::{origin_dir, power_dir, DocumentKind};
use rankforge_core::types::CharacterName;
use serde::Serialize;

/// Shared directories, created once per output tree.
pub const BASE_DIRECTORIES: [&[&str]; 3] = [&["powers", "flavors"], &["origins"], &["origins", "ranks"]];

/// One document to materialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub kind: DocumentKind,
    pub stage: u32,
    /// Relative to the output root.
    pub dir: PathBuf,
    pub file_name: String,
}

impl PlannedFile {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Directories to create, then files to write, for one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WritePlan {
    pub name: String,
    pub ranks: u32,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PlannedFile>,
}

impl WritePlan {
    /// Framework ids of every planned document, in plan order.
    pub fn ids(&self, namespace: &str) -> Vec<String> {
        self.files
            .iter()
            .map(|f| f.kind.id(namespace, &self.name, f.stage))
            .collect()
    }

    pub fn files_of(&self, kind: DocumentKind) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }
}

/// Rank-ascending plan for `name` with `ranks` ranks (stages `0..=ranks`).
///
/// Within a stage files come in kind order: evolution, stat upgrades, rank
/// origin, terminal. Every file's directory precedes it in `directories`.
pub fn plan(name: &CharacterName, ranks: u32) -> WritePlan {
    let name = name.as_str();

    let mut directories: Vec<PathBuf> = BASE_DIRECTORIES
        .iter()
        .map(|parts| parts.iter().collect())
        .collect();
    for stage in 0..=ranks {
        directories.push(power_dir(name, stage));
        directories.push(origin_dir(name, stage));
    }

    let mut files = Vec::new();
    for stage in 0..=ranks {
        for kind in DocumentKind::ALL {
            if kind.applies_to(stage, ranks) {
                files.push(PlannedFile {
                    kind,
                    stage,
                    dir: kind.directory(name, stage),
                    file_name: kind.file_name(stage),
                });
            }
        }
    }

    WritePlan {
        name: name.to_string(),
        ranks,
        directories,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn hero_plan(ranks: u32) -> WritePlan {
        plan(&CharacterName::new("test_hero").unwrap(), ranks)
    }

    #[test]
    fn counts_per_kind() {
        let p = hero_plan(5);
        assert_eq!(p.files_of(DocumentKind::Evolution).count(), 5);
        assert_eq!(p.files_of(DocumentKind::StatUpgrades).count(), 4);
        assert_eq!(p.files_of(DocumentKind::RankOrigin).count(), 6);
        assert_eq!(p.files_of(DocumentKind::Terminal).count(), 1);

        let p = hero_plan(6);
        assert_eq!(p.files_of(DocumentKind::Evolution).count(), 6);
        assert_eq!(p.files_of(DocumentKind::StatUpgrades).count(), 5);
        assert_eq!(p.files_of(DocumentKind::RankOrigin).count(), 7);
        assert_eq!(p.files_of(DocumentKind::Terminal).count(), 1);
    }

    #[test]
    fn directory_layout() {
        let p = hero_plan(5);
        assert_eq!(p.directories.len(), 3 + 2 * 6);
        assert_eq!(p.directories[0], Path::new("powers/flavors"));
        assert_eq!(p.directories[1], Path::new("origins"));
        assert_eq!(p.directories[2], Path::new("origins/ranks"));
        assert_eq!(p.directories[3], Path::new("powers/flavors/test_hero/0star"));
        assert_eq!(p.directories[4], Path::new("origins/ranks/test_hero/0star"));
        assert_eq!(
            p.directories.last().unwrap(),
            Path::new("origins/ranks/test_hero/5star")
        );
    }

    #[test]
    fn file_paths() {
        let p = hero_plan(5);
        let paths: Vec<PathBuf> = p.files.iter().map(PlannedFile::path).collect();
        assert!(paths.contains(&PathBuf::from("powers/flavors/test_hero/0star/evo.json")));
        assert!(paths.contains(&PathBuf::from("powers/flavors/test_hero/4star/evo.json")));
        assert!(!paths.contains(&PathBuf::from("powers/flavors/test_hero/5star/evo.json")));
        assert!(!paths.contains(&PathBuf::from(
            "powers/flavors/test_hero/0star/stat_upgrades.json"
        )));
        assert!(paths.contains(&PathBuf::from(
            "powers/flavors/test_hero/4star/stat_upgrades.json"
        )));
        assert!(paths.contains(&PathBuf::from("origins/ranks/test_hero/0star.json")));
        assert!(paths.contains(&PathBuf::from("origins/ranks/test_hero/5star.json")));
        assert!(paths.contains(&PathBuf::from(
            "powers/flavors/test_hero/5star/preventsouls.json"
        )));
        assert_eq!(paths.len(), 16);
    }

    #[test]
    fn rank_ascending_order() {
        let p = hero_plan(6);
        let stages: Vec<u32> = p.files.iter().map(|f| f.stage).collect();
        let mut sorted = stages.clone();
        sorted.sort();
        assert_eq!(stages, sorted);

        let first_rank: Vec<DocumentKind> =
            p.files.iter().filter(|f| f.stage == 1).map(|f| f.kind).collect();
        assert_eq!(
            first_rank,
            vec![
                DocumentKind::Evolution,
                DocumentKind::StatUpgrades,
                DocumentKind::RankOrigin
            ]
        );
    }

    #[test]
    fn directories_cover_every_file() {
        let p = hero_plan(5);
        for file in &p.files {
            assert!(
                p.directories.iter().any(|d| d.starts_with(&file.dir)),
                "no planned directory creates {}",
                file.dir.display()
            );
        }
    }

    #[test]
    fn ids_follow_namespace() {
        let ids = hero_plan(5).ids("rf");
        assert_eq!(ids[0], "rf:flavors/test_hero/0star/evo");
        assert!(ids.contains(&"rf:ranks/test_hero/5star".to_string()));
        assert!(ids.contains(&"rf:flavors/test_hero/5star/preventsouls".to_string()));
    }
}
