//! Whole-document backup export and import
//!
//! The persisted document is its own interchange format: export writes it
//! verbatim as pretty-printed JSON, import parses a file and hands back the
//! replacement document. Import never merges — the caller swaps the
//! document wholesale (re-running sanitation) or keeps the old one on error.

use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::library::Document;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid backup file: missing 'folders' array")]
    MissingFolders,
}

pub type Result<T> = std::result::Result<T, BackupError>;

/// Serialize the document verbatim to a backup file
pub fn export_document(document: &Document, path: &Path) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(document)?)?;
    info!("exported {} card(s) to {}", document.card_count(), path.display());
    Ok(())
}

/// Parse a backup file into a replacement document.
///
/// The file must be valid JSON with a top-level `folders` array; anything
/// else aborts with the existing document untouched. The caller is
/// responsible for the sanitation pass and persistence (see
/// [`crate::library::LibraryStorage::replace`]).
pub fn import_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    if !value.get("folders").map_or(false, |f| f.is_array()) {
        return Err(BackupError::MissingFolders);
    }

    let document: Document = serde_json::from_value(value)?;
    info!("parsed backup with {} card(s) from {}", document.card_count(), path.display());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Card, Folder};
    use tempfile::TempDir;

    fn sample_document() -> Document {
        let mut card = Card::new(7, "Art. 5".to_string(), "todos sao iguais".to_string());
        card.level = 8;
        card.last_studied_at = chrono::DateTime::from_timestamp_millis(1_700_000_000_000);
        card.winrate = 92;
        card.study_seconds = 340;
        Document { folders: vec![Folder { name: "Constitucional".to_string(), cards: vec![card] }] }
    }

    #[test]
    fn export_import_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backup.json");
        let document = sample_document();

        export_document(&document, &path).unwrap();
        let imported = import_document(&path).unwrap();

        assert_eq!(imported.folders.len(), 1);
        let card = &imported.folders[0].cards[0];
        let original = &document.folders[0].cards[0];
        assert_eq!(card.id, original.id);
        assert_eq!(card.level, original.level);
        assert_eq!(card.last_studied_at, original.last_studied_at);
        assert_eq!(card.winrate, original.winrate);
        assert_eq!(card.study_seconds, original.study_seconds);
    }

    #[test]
    fn import_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(import_document(&path), Err(BackupError::Json(_))));
    }

    #[test]
    fn import_rejects_missing_folders_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wrong.json");
        fs::write(&path, r#"{ "cards": [] }"#).unwrap();
        assert!(matches!(import_document(&path), Err(BackupError::MissingFolders)));

        fs::write(&path, r#"{ "folders": "not an array" }"#).unwrap();
        assert!(matches!(import_document(&path), Err(BackupError::MissingFolders)));
    }

    #[test]
    fn imported_out_of_range_levels_survive_until_sanitation() {
        // Import itself is verbatim; clamping belongs to the library's
        // replace/sanitize pass.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"{ "folders": [{ "name": "f", "cards": [
                { "id": 1, "title": "t", "text": "x", "level": 22 }
            ]}]}"#,
        )
        .unwrap();

        let mut imported = import_document(&path).unwrap();
        assert_eq!(imported.folders[0].cards[0].level, 22);
        assert_eq!(imported.sanitize(), 1);
        assert_eq!(imported.folders[0].cards[0].level, 10);
    }
}
