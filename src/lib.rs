//! engram — text memorization trainer
//!
//! Tracks memorization strength of short texts ("cards") grouped into
//! folders, erodes memorized text to force active recall, and models the
//! drift of proficiency over time since last study.
//!
//! Core components:
//! - [`decay`] — pure decay engine: stored level + elapsed time → effective
//!   level, stability percentage, time to next drop
//! - [`training`] — the erosion/consolidation session state machine
//!
//! Around them: [`library`] (folders, cards, JSON persistence, sanitation),
//! [`stats`] (dashboard aggregates from decayed levels) and [`backup`]
//! (whole-document export/import).

pub mod backup;
pub mod decay;
pub mod library;
pub mod stats;
pub mod training;

pub use decay::{compute_decay, DecayCurve, DecayResult};
pub use library::{Card, Document, Folder, LibraryStorage};
pub use training::{SessionPolicy, TrainingSession};
