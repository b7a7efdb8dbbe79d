//! Dashboard aggregates
//!
//! Derived view-data only: everything here is recomputed from the document
//! and an injected `now` on each call, using decayed levels uniformly (a
//! card's stored level is never shown directly). Rendering surfaces consume
//! these values; no logic decision flows back from display.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::decay::{compute_decay, DecayCurve};
use crate::library::Document;

/// Band counts and totals for the dashboard header
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Cards with effective level below the critical threshold
    pub critical: usize,
    /// Cards between the critical and safe thresholds
    pub attention: usize,
    /// Cards at or above the safe threshold
    pub safe: usize,
    pub total_cards: usize,
    pub total_study_seconds: u64,
    pub folder_averages: Vec<FolderAverage>,
    /// All cards sorted most-urgent first (lowest exact level)
    pub urgency: Vec<UrgencyEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderAverage {
    pub name: String,
    /// Mean exact (fractional) level of the folder's cards; 0 when empty
    pub mean_exact_level: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencyEntry {
    pub card_id: i64,
    pub title: String,
    pub folder: String,
    pub exact_level: f64,
    pub ms_until_next_drop: u64,
    /// Fully cold: nothing left to lose, study now
    pub needs_study: bool,
}

/// Compute all dashboard aggregates from decayed levels
pub fn dashboard_stats(document: &Document, now: DateTime<Utc>, curve: &DecayCurve) -> DashboardStats {
    let mut stats = DashboardStats::default();

    for folder in &document.folders {
        let mut level_sum = 0.0;

        for card in &folder.cards {
            let decay = compute_decay(card.level, card.last_studied_at, now, curve);
            let exact = decay.exact_level();

            stats.total_cards += 1;
            stats.total_study_seconds += card.study_seconds;

            if decay.effective_level < curve.critical_below {
                stats.critical += 1;
            } else if decay.effective_level < curve.safe_at {
                stats.attention += 1;
            } else {
                stats.safe += 1;
            }

            level_sum += exact;

            stats.urgency.push(UrgencyEntry {
                card_id: card.id,
                title: card.title.clone(),
                folder: folder.name.clone(),
                exact_level: exact,
                ms_until_next_drop: decay.ms_until_next_drop,
                needs_study: decay.effective_level == 0 && exact == 0.0,
            });
        }

        let mean = if folder.cards.is_empty() { 0.0 } else { level_sum / folder.cards.len() as f64 };
        stats.folder_averages.push(FolderAverage { name: folder.name.clone(), mean_exact_level: mean });
    }

    stats
        .urgency
        .sort_by(|a, b| a.exact_level.partial_cmp(&b.exact_level).unwrap_or(std::cmp::Ordering::Equal));

    stats
}

/// Format accumulated study time as `mm:ss`
pub fn format_study_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format time until the next level drop as `Xh Ym`
pub fn format_drop_eta(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    format!("{}h {}m", hours, minutes)
}
