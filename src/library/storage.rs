//! Storage operations for the memorization library
//!
//! The entire library is one JSON document:
//! ```text
//! {data_dir}/document.json    # { "folders": [ { "name", "cards": [...] } ] }
//! ```
//! Every mutating operation loads the document, applies the change, and
//! overwrites the file wholesale. Single-user, single-device: no locking.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use super::models::{Card, Document, Folder};
use crate::training::CompletionRecord;

#[derive(Error, Debug)]
pub enum LibraryStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Card not found: {0}")]
    CardNotFound(i64),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("No data directory available")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, LibraryStorageError>;

/// What editing a card's content does to its tracked progress.
///
/// The original behavior reset level and timestamp on every edit; keeping
/// progress when only the title changed is the friendlier default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditResetPolicy {
    /// Any edit drops the card back to unstudied
    Always,
    /// Only edits that change the text drop the card back to unstudied
    #[default]
    WhenTextChanged,
}

/// Storage manager for the library document
pub struct LibraryStorage {
    data_dir: PathBuf,
    edit_reset: EditResetPolicy,
}

impl LibraryStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir, edit_reset: EditResetPolicy::default() }
    }

    pub fn with_edit_policy(mut self, policy: EditResetPolicy) -> Self {
        self.edit_reset = policy;
        self
    }

    /// Default data directory (e.g. ~/.local/share/engram)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join("engram"))
            .ok_or(LibraryStorageError::NoDataDir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self) -> PathBuf {
        self.data_dir.join("document.json")
    }

    /// Create the data directory and an empty document if none exists
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.document_path();
        if !path.exists() {
            self.save(&Document::default())?;
        }
        Ok(())
    }

    /// Load the document, running the sanitation pass.
    ///
    /// Out-of-range levels in legacy data are clamped and written back;
    /// this is a silent repair, not an error.
    pub fn load(&self) -> Result<Document> {
        let path = self.document_path();
        if !path.exists() {
            return Ok(Document::default());
        }

        let content = fs::read_to_string(&path)?;
        let mut document: Document = serde_json::from_str(&content)?;

        let repaired = document.sanitize();
        if repaired > 0 {
            info!("sanitation clamped {} card level(s) into [0, 10]", repaired);
            self.save(&document)?;
        }

        Ok(document)
    }

    /// Overwrite the persisted document
    pub fn save(&self, document: &Document) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        fs::write(self.document_path(), serde_json::to_string_pretty(document)?)?;
        Ok(())
    }

    /// Replace the document wholesale (import path), sanitizing first
    pub fn replace(&self, mut document: Document) -> Result<Document> {
        let repaired = document.sanitize();
        if repaired > 0 {
            info!("import sanitation clamped {} card level(s)", repaired);
        }
        self.save(&document)?;
        Ok(document)
    }

    // ==================== Folder Operations ====================

    pub fn create_folder(&self, name: &str) -> Result<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryStorageError::EmptyField("folder name"));
        }

        let mut document = self.load()?;
        let folder = Folder::new(name.to_string());
        document.folders.push(folder.clone());
        self.save(&document)?;
        Ok(folder)
    }

    pub fn rename_folder(&self, name: &str, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(LibraryStorageError::EmptyField("folder name"));
        }

        let mut document = self.load()?;
        let folder = find_folder_mut(&mut document, name)?;
        folder.name = new_name.to_string();
        self.save(&document)?;
        Ok(())
    }

    /// Delete a folder and every card it owns
    pub fn delete_folder(&self, name: &str) -> Result<()> {
        let mut document = self.load()?;
        let pos = document
            .folders
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| LibraryStorageError::FolderNotFound(name.to_string()))?;
        let removed = document.folders.remove(pos);
        info!("deleted folder '{}' with {} card(s)", removed.name, removed.cards.len());
        self.save(&document)?;
        Ok(())
    }

    // ==================== Card Operations ====================

    pub fn create_card(
        &self,
        folder_name: &str,
        title: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let title = title.trim();
        let text = text.trim();
        if title.is_empty() {
            return Err(LibraryStorageError::EmptyField("card title"));
        }
        if text.is_empty() {
            return Err(LibraryStorageError::EmptyField("card text"));
        }

        let mut document = self.load()?;
        let id = next_card_id(&document, now);
        let card = Card::new(id, title.to_string(), text.to_string());
        find_folder_mut(&mut document, folder_name)?.cards.push(card.clone());
        self.save(&document)?;
        Ok(card)
    }

    pub fn get_card(&self, card_id: i64) -> Result<Card> {
        let document = self.load()?;
        let card = document
            .all_cards()
            .find(|(_, c)| c.id == card_id)
            .map(|(_, c)| c.clone())
            .ok_or(LibraryStorageError::CardNotFound(card_id));
        card
    }

    /// Edit a card's title and text.
    ///
    /// Whether this forfeits tracked progress depends on the configured
    /// [`EditResetPolicy`].
    pub fn update_card(&self, card_id: i64, title: &str, text: &str) -> Result<Card> {
        let title = title.trim();
        let text = text.trim();
        if title.is_empty() {
            return Err(LibraryStorageError::EmptyField("card title"));
        }
        if text.is_empty() {
            return Err(LibraryStorageError::EmptyField("card text"));
        }

        let mut document = self.load()?;
        let card = find_card_mut(&mut document, card_id)?;

        let text_changed = card.text != text;
        card.title = title.to_string();
        card.text = text.to_string();

        match self.edit_reset {
            EditResetPolicy::Always => card.reset_progress(),
            EditResetPolicy::WhenTextChanged if text_changed => card.reset_progress(),
            EditResetPolicy::WhenTextChanged => {}
        }

        let updated = card.clone();
        self.save(&document)?;
        Ok(updated)
    }

    pub fn delete_card(&self, card_id: i64) -> Result<()> {
        let mut document = self.load()?;
        let mut found = false;
        for folder in &mut document.folders {
            let before = folder.cards.len();
            folder.cards.retain(|c| c.id != card_id);
            if folder.cards.len() != before {
                found = true;
                break;
            }
        }
        if !found {
            return Err(LibraryStorageError::CardNotFound(card_id));
        }
        self.save(&document)?;
        Ok(())
    }

    // ==================== Session Completion ====================

    /// Apply a finished training session to its card and persist.
    ///
    /// This is the only path that raises a card's level: the card jumps to
    /// maximum, the decay clock restarts, and session stats accumulate.
    pub fn apply_completion(&self, card_id: i64, record: &CompletionRecord) -> Result<Card> {
        let mut document = self.load()?;
        let card = find_card_mut(&mut document, card_id)?;

        card.level = record.level;
        card.last_studied_at = Some(record.studied_at);
        card.winrate = record.winrate;
        card.study_seconds += record.seconds;

        let updated = card.clone();
        self.save(&document)?;
        info!("card {} completed training: level {}, winrate {}%", card_id, updated.level, updated.winrate);
        Ok(updated)
    }
}

fn find_folder_mut<'a>(document: &'a mut Document, name: &str) -> Result<&'a mut Folder> {
    document
        .folders
        .iter_mut()
        .find(|f| f.name == name)
        .ok_or_else(|| LibraryStorageError::FolderNotFound(name.to_string()))
}

fn find_card_mut(document: &mut Document, card_id: i64) -> Result<&mut Card> {
    document
        .folders
        .iter_mut()
        .flat_map(|f| f.cards.iter_mut())
        .find(|c| c.id == card_id)
        .ok_or(LibraryStorageError::CardNotFound(card_id))
}

/// Assign a fresh card id from epoch milliseconds, bumping past collisions
fn next_card_id(document: &Document, now: DateTime<Utc>) -> i64 {
    let mut id = now.timestamp_millis();
    while document.all_cards().any(|(_, c)| c.id == id) {
        id += 1;
    }
    id
}
