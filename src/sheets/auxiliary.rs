//! Loading topics from an auxiliary directory of question pages.
//!
//! Company question lists are kept as one JSON document per scraped page.
//! Every page in the directory is read (in file-name order) and the problem
//! lists are concatenated.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::registry::AuxiliarySource;
use super::shape::{self, DataShape};
use crate::db::LogOnError;
use crate::domain::Topic;

/// Directory holding the pages for `source`.
pub fn source_dir(root: &Path, source: &AuxiliarySource) -> PathBuf {
    root.join(source.dir_name)
}

/// List the `.json` page files in a directory, sorted by name.
pub fn page_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Load every page for `source` under `root`.
///
/// A missing directory yields no topics. Unreadable or malformed pages are
/// skipped with a warning; other directory errors are returned.
pub fn load_topics(root: &Path, source: &AuxiliarySource, sheet: &str) -> io::Result<Vec<Topic>> {
    let dir = source_dir(root, source);
    let files = match page_files(&dir) {
        Ok(files) => files,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("Auxiliary directory for {} does not exist: {}", sheet, dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut topics = Vec::new();
    for file in &files {
        let Some(document) = read_page(file) else {
            continue;
        };
        let page = shape::normalize(DataShape::AuxiliaryPages, sheet, &document);
        topics.extend(page.into_iter().filter(|t| matches_difficulty(t, source)));
    }

    tracing::debug!(
        "Loaded {} topics for {} from {} pages in {}",
        topics.len(),
        sheet,
        files.len(),
        dir.display()
    );
    Ok(topics)
}

fn read_page(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path)
        .log_warn(&format!("Failed to read auxiliary page {}", path.display()))?;
    serde_json::from_str(&content)
        .log_warn(&format!("Invalid JSON in auxiliary page {}", path.display()))
}

fn matches_difficulty(topic: &Topic, source: &AuxiliarySource) -> bool {
    match source.difficulty {
        Some(difficulty) => topic.text_field("difficulty").as_deref() == Some(difficulty.as_str()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::registry::Difficulty;
    use serde_json::json;
    use tempfile::TempDir;

    const SOURCE: AuxiliarySource = AuxiliarySource {
        dir_name: "pages",
        difficulty: Some(Difficulty::Moderate),
    };

    fn write_page(dir: &Path, name: &str, items: Value) {
        fs::create_dir_all(dir).unwrap();
        let doc = json!({"data": {"problem_list": items}});
        fs::write(dir.join(name), doc.to_string()).unwrap();
    }

    fn ids(topics: &[Topic]) -> Vec<String> {
        topics.iter().filter_map(Topic::id).collect()
    }

    #[test]
    fn test_concatenates_pages_and_filters_difficulty() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pages");
        write_page(
            &dir,
            "page_1.json",
            json!([
                {"id": 1, "name": "A", "difficulty": "Moderate"},
                {"id": 2, "name": "B", "difficulty": "Easy"}
            ]),
        );
        write_page(&dir, "page_2.json", json!([{"id": 3, "name": "C", "difficulty": "Moderate"}]));

        let topics = load_topics(temp.path(), &SOURCE, "oracle_dsa").unwrap();
        assert_eq!(ids(&topics), vec!["1", "3"]);
    }

    #[test]
    fn test_no_difficulty_keeps_everything() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pages");
        write_page(&dir, "page_1.json", json!([{"id": 1, "difficulty": "Hard"}, {"id": 2}]));

        let source = AuxiliarySource {
            dir_name: "pages",
            difficulty: None,
        };
        assert_eq!(ids(&load_topics(temp.path(), &source, "x").unwrap()), vec!["1", "2"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(load_topics(temp.path(), &SOURCE, "oracle_dsa").unwrap().is_empty());
    }

    #[test]
    fn test_bad_pages_are_skipped() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pages");
        write_page(&dir, "page_1.json", json!([{"id": 1, "difficulty": "Moderate"}]));
        fs::write(dir.join("page_2.json"), "{not json").unwrap();
        fs::write(dir.join("page_3.json"), r#"{"data": {}}"#).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let topics = load_topics(temp.path(), &SOURCE, "oracle_dsa").unwrap();
        assert_eq!(ids(&topics), vec!["1"]);
    }

    #[test]
    fn test_page_files_sorted() {
        let temp = TempDir::new().unwrap();
        for name in ["page_2.json", "page_1.JSON", "page_10.json"] {
            fs::write(temp.path().join(name), "{}").unwrap();
        }
        let names: Vec<String> = page_files(temp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["page_1.JSON", "page_10.json", "page_2.json"]);
    }
}
