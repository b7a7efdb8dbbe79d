//! Data models for the memorization library

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest proficiency level a card can hold
pub const MIN_LEVEL: i32 = 0;

/// Highest proficiency level a card can hold
pub const MAX_LEVEL: i32 = 10;

/// A short text to memorize, with its proficiency tracking state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier, assigned from epoch milliseconds at creation
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Persisted proficiency level, always within [0, 10]
    #[serde(default)]
    pub level: i32,
    /// When the card last completed a training session, if ever
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_studied_at: Option<DateTime<Utc>>,
    /// Accuracy of the most recent completed session, integer percent
    #[serde(default = "default_winrate")]
    pub winrate: i32,
    /// Accumulated training time across all sessions, in seconds
    #[serde(default)]
    pub study_seconds: u64,
}

fn default_winrate() -> i32 {
    100
}

impl Card {
    pub fn new(id: i64, title: String, text: String) -> Self {
        Self {
            id,
            title,
            text,
            level: MIN_LEVEL,
            last_studied_at: None,
            winrate: default_winrate(),
            study_seconds: 0,
        }
    }

    /// Whether the card ever completed a training session.
    ///
    /// A card without a timestamp is treated as level 0 everywhere,
    /// regardless of the stored level.
    pub fn is_studied(&self) -> bool {
        self.last_studied_at.is_some()
    }

    /// Clamp the stored level into [0, 10]. Returns true if a repair was made.
    pub fn clamp_level(&mut self) -> bool {
        let clamped = self.level.clamp(MIN_LEVEL, MAX_LEVEL);
        if clamped != self.level {
            self.level = clamped;
            true
        } else {
            false
        }
    }

    /// Drop the card back to unstudied state (level 0, no timestamp).
    pub fn reset_progress(&mut self) {
        self.level = MIN_LEVEL;
        self.last_studied_at = None;
    }
}

/// A named collection of cards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Folder {
    pub fn new(name: String) -> Self {
        Self { name, cards: Vec::new() }
    }
}

/// The entire persisted state: one document, overwritten wholesale on save.
///
/// This is also the interchange format for backup export/import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub folders: Vec<Folder>,
}

impl Document {
    /// Repair out-of-range levels left behind by legacy data.
    ///
    /// Returns how many cards were clamped. Run at load time and after
    /// import; a repair, not a reported error.
    pub fn sanitize(&mut self) -> usize {
        let mut repaired = 0;
        for folder in &mut self.folders {
            for card in &mut folder.cards {
                if card.clamp_level() {
                    repaired += 1;
                }
            }
        }
        repaired
    }

    /// Iterate over every card with its owning folder name.
    pub fn all_cards(&self) -> impl Iterator<Item = (&str, &Card)> {
        self.folders
            .iter()
            .flat_map(|f| f.cards.iter().map(move |c| (f.name.as_str(), c)))
    }

    /// Total number of cards across all folders.
    pub fn card_count(&self) -> usize {
        self.folders.iter().map(|f| f.cards.len()).sum()
    }
}
