//! Occlusion-based training
//!
//! This module provides:
//! - Whitespace tokenization with connector/content classification
//! - Diacritic-insensitive normalization shared by tokens and user input
//! - The two-phase session state machine (erosion, then cyclic
//!   full-blind consolidation)

pub mod normalize;
pub mod session;

pub use normalize::{normalize, tokenize, Token};
pub use session::{
    CompletionRecord, IndexPicker, Outcome, Phase, RandomPicker, SessionPolicy, TrainingSession,
    WordDisplay, WordView,
};
