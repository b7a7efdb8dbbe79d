//! Training session state machine
//!
//! A session drives one card through two phases:
//!
//! - **Erosion** — one content word at a time is blanked, chosen at random
//!   among the words not yet occluded. Each round re-blanks everything
//!   occluded so far; once every blank is correctly refilled, the next word
//!   joins the set. When no content word is left un-occluded the session
//!   moves on.
//! - **Consolidation** — every content word is blanked (connectors stay
//!   visible) and must be typed back in strict left-to-right order, repeated
//!   for a fixed number of cycles.
//!
//! All transitions happen synchronously inside [`TrainingSession::submit_attempt`];
//! the presentation layer observes the returned [`Outcome`] and renders
//! [`TrainingSession::word_views`]. Nothing here reads the clock, spawns
//! timers, or touches persistence — completion hands back a
//! [`CompletionRecord`] for the library to apply.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::normalize::{normalize, tokenize, Token};
use crate::decay::DecayCurve;
use crate::library::{Card, MAX_LEVEL};

/// Cycle counts and penalties. Policy constants for the state machine;
/// nothing else in the crate hard-codes these.
#[derive(Debug, Clone)]
pub struct SessionPolicy {
    /// Consolidation cycles after an erosion entry (cold or hint-forced)
    pub erosion_cycles: u32,
    /// Consolidation cycles when entering at or above the high threshold
    pub top_cycles: u32,
    /// Consolidation cycles when entering between the mid and high thresholds
    pub standard_cycles: u32,
    /// Errors charged for revealing the full text
    pub hint_penalty: u32,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self { erosion_cycles: 3, top_cycles: 1, standard_cycles: 3, hint_penalty: 5 }
    }
}

/// Uniform selection among `0..len`. Injected so tests can supply a
/// deterministic sequence.
pub trait IndexPicker {
    /// Pick an index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG picker for normal operation
#[derive(Debug, Default)]
pub struct RandomPicker;

impl IndexPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Erosion,
    Consolidation { cycle: u32 },
    Complete,
}

/// What a committed attempt did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Input normalized to nothing; no attempt was recorded
    Ignored,
    /// Matched a blank (erosion) or the cursor word (consolidation)
    Correct,
    /// No match; recorded as an error, nothing advanced
    Incorrect,
    /// All current blanks refilled; one more word is now occluded
    RoundComplete,
    /// Every content word occluded and refilled; consolidation begins
    ErosionComplete,
    /// Full pass typed; the next consolidation cycle begins
    CycleComplete { cycle: u32 },
    /// Final cycle finished; the session is complete
    SessionComplete,
}

/// Per-word display state fed to the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordDisplay {
    /// Content word, currently shown
    Visible,
    /// Stopword, always shown, never recalled
    Connector,
    /// Occluded, awaiting recall
    Blank,
    /// Recalled correctly in the current round/cycle
    Revealed,
}

#[derive(Debug, Clone, Copy)]
pub struct WordView<'a> {
    pub original: &'a str,
    pub display: WordDisplay,
}

/// What a completed session writes back to the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    /// Always the maximum level; completing a session restarts the decay clock
    pub level: i32,
    pub studied_at: DateTime<Utc>,
    /// Session accuracy, integer percent
    pub winrate: i32,
    /// Seconds spent in this session
    pub seconds: u64,
}

/// One in-flight training session. Ephemeral: dropped without persisting
/// when the user leaves; only completion reaches storage.
#[derive(Debug)]
pub struct TrainingSession {
    card_id: i64,
    card_text: String,
    tokens: Vec<Token>,
    /// Token indices eligible for occlusion/recall, in text order
    content_indices: Vec<usize>,
    /// Token indices occluded so far, in occlusion order. Grows only.
    occluded: Vec<usize>,
    /// Occluded indices refilled in the current erosion round
    filled: Vec<usize>,
    /// Position within `content_indices` during consolidation
    cursor: usize,
    target_cycles: u32,
    phase: Phase,
    correct: u32,
    errors: u32,
    elapsed_seconds: u64,
    policy: SessionPolicy,
}

impl TrainingSession {
    /// Start a session for a card.
    ///
    /// `effective_level` is the decay-adjusted level at session start; the
    /// thresholds on `curve` and the cycle counts on `policy` decide the
    /// entry phase:
    /// - never studied → erosion;
    /// - at or above `curve.high_level` → consolidation, one cycle;
    /// - at or above `curve.mid_level` → consolidation, standard cycles;
    /// - below → erosion.
    pub fn start(
        card: &Card,
        effective_level: i32,
        curve: &DecayCurve,
        policy: SessionPolicy,
        picker: &mut dyn IndexPicker,
    ) -> Self {
        let tokens = tokenize(&card.text);
        let content_indices: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_content())
            .map(|(i, _)| i)
            .collect();

        let mut session = Self {
            card_id: card.id,
            card_text: card.text.clone(),
            tokens,
            content_indices,
            occluded: Vec::new(),
            filled: Vec::new(),
            cursor: 0,
            target_cycles: policy.erosion_cycles,
            phase: Phase::Erosion,
            correct: 0,
            errors: 0,
            elapsed_seconds: 0,
            policy,
        };

        if card.is_studied() && effective_level >= curve.high_level {
            session.target_cycles = session.policy.top_cycles;
            session.begin_consolidation(1);
        } else if card.is_studied() && effective_level >= curve.mid_level {
            session.target_cycles = session.policy.standard_cycles;
            session.begin_consolidation(1);
        } else {
            session.target_cycles = session.policy.erosion_cycles;
            session.begin_erosion(picker);
        }

        session
    }

    /// Commit one attempt. This is the only way the machine advances;
    /// per-keystroke feedback is a presentation concern.
    pub fn submit_attempt(&mut self, raw: &str, picker: &mut dyn IndexPicker) -> Outcome {
        let input = normalize(raw);
        if input.is_empty() {
            return Outcome::Ignored;
        }

        match self.phase {
            Phase::Complete => Outcome::Ignored,
            Phase::Erosion => self.submit_erosion(&input, picker),
            Phase::Consolidation { cycle } => self.submit_consolidation(&input, cycle),
        }
    }

    fn submit_erosion(&mut self, input: &str, picker: &mut dyn IndexPicker) -> Outcome {
        let matched = self
            .occluded
            .iter()
            .copied()
            .find(|i| !self.filled.contains(i) && self.tokens[*i].clean == input);

        match matched {
            Some(index) => {
                self.filled.push(index);
                self.correct += 1;
                if self.filled.len() == self.occluded.len() {
                    self.next_erosion_round(picker)
                } else {
                    Outcome::Correct
                }
            }
            None => {
                self.errors += 1;
                Outcome::Incorrect
            }
        }
    }

    fn submit_consolidation(&mut self, input: &str, cycle: u32) -> Outcome {
        let expected = match self.content_indices.get(self.cursor) {
            Some(&index) => &self.tokens[index].clean,
            None => return Outcome::Ignored,
        };

        if expected != input {
            self.errors += 1;
            return Outcome::Incorrect;
        }

        self.correct += 1;
        self.cursor += 1;
        if self.cursor < self.content_indices.len() {
            return Outcome::Correct;
        }

        if cycle < self.target_cycles {
            self.begin_consolidation(cycle + 1);
            Outcome::CycleComplete { cycle: cycle + 1 }
        } else {
            self.phase = Phase::Complete;
            Outcome::SessionComplete
        }
    }

    /// Occlude one more word, or hand over to consolidation when none remain.
    /// Every round re-blanks the whole accumulated set.
    fn next_erosion_round(&mut self, picker: &mut dyn IndexPicker) -> Outcome {
        let available: Vec<usize> = self
            .content_indices
            .iter()
            .copied()
            .filter(|i| !self.occluded.contains(i))
            .collect();

        if available.is_empty() {
            self.begin_consolidation(1);
            if self.phase == Phase::Complete {
                return Outcome::SessionComplete;
            }
            return Outcome::ErosionComplete;
        }

        let choice = available[picker.pick(available.len())];
        self.occluded.push(choice);
        self.filled.clear();
        Outcome::RoundComplete
    }

    fn begin_erosion(&mut self, picker: &mut dyn IndexPicker) {
        self.phase = Phase::Erosion;
        self.occluded.clear();
        self.filled.clear();
        self.cursor = 0;
        // Texts made entirely of connectors have nothing to erode
        if self.content_indices.is_empty() {
            self.begin_consolidation(1);
            return;
        }
        self.next_erosion_round(picker);
    }

    fn begin_consolidation(&mut self, cycle: u32) {
        if self.content_indices.is_empty() {
            self.phase = Phase::Complete;
            return;
        }
        self.phase = Phase::Consolidation { cycle };
        self.cursor = 0;
    }

    // ==================== Hint / Reveal ====================

    /// Reveal the full source text, charging the fixed penalty.
    pub fn reveal_hint(&mut self) -> &str {
        self.errors += self.policy.hint_penalty;
        &self.card_text
    }

    /// Dismissing the hint restarts the session from erosion with the
    /// standard cycle target, regardless of the level that selected the
    /// original entry phase. The persisted card is untouched; only
    /// completing the restarted session writes anything back.
    pub fn dismiss_hint(&mut self, picker: &mut dyn IndexPicker) {
        self.target_cycles = self.policy.erosion_cycles;
        self.begin_erosion(picker);
    }

    // ==================== Derived view data ====================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn card_id(&self) -> i64 {
        self.card_id
    }

    pub fn target_cycles(&self) -> u32 {
        self.target_cycles
    }

    pub fn content_count(&self) -> usize {
        self.content_indices.len()
    }

    pub fn occluded_count(&self) -> usize {
        self.occluded.len()
    }

    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Session accuracy in percent; 100 when nothing was attempted
    pub fn accuracy_percent(&self) -> i32 {
        let total = self.correct + self.errors;
        if total == 0 {
            return 100;
        }
        ((self.correct as f64 / total as f64) * 100.0).round() as i32
    }

    /// Single 0–100 progress value across both phases.
    ///
    /// Erosion counts occluded words against the content total;
    /// consolidation weighs the cursor into the inter-cycle schedule.
    pub fn progress_percent(&self) -> f64 {
        let content = self.content_indices.len();
        match self.phase {
            Phase::Complete => 100.0,
            Phase::Erosion => {
                if content == 0 {
                    return 100.0;
                }
                (self.occluded.len() as f64 / content as f64) * 100.0
            }
            Phase::Consolidation { cycle } => {
                if content == 0 || self.target_cycles == 0 {
                    return 100.0;
                }
                let intra = self.cursor as f64 / content as f64;
                let pct = ((cycle - 1) as f64 + intra) / self.target_cycles as f64 * 100.0;
                pct.min(100.0)
            }
        }
    }

    /// Display-only elapsed counter, fed by the presentation's 1 s tick.
    /// Never triggers a transition.
    pub fn tick_second(&mut self) {
        self.elapsed_seconds += 1;
    }

    /// Bulk form of [`tick_second`](Self::tick_second) for presentations
    /// that track time themselves
    pub fn set_elapsed_seconds(&mut self, seconds: u64) {
        self.elapsed_seconds = seconds;
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Per-word display states for the rendering surface
    pub fn word_views(&self) -> Vec<WordView<'_>> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| {
                let display = if !token.is_content() {
                    WordDisplay::Connector
                } else {
                    match self.phase {
                        Phase::Complete => WordDisplay::Visible,
                        Phase::Erosion => {
                            if self.filled.contains(&index) {
                                WordDisplay::Revealed
                            } else if self.occluded.contains(&index) {
                                WordDisplay::Blank
                            } else {
                                WordDisplay::Visible
                            }
                        }
                        Phase::Consolidation { .. } => {
                            let position = self
                                .content_indices
                                .iter()
                                .position(|&i| i == index)
                                .unwrap_or(usize::MAX);
                            if position < self.cursor {
                                WordDisplay::Revealed
                            } else {
                                WordDisplay::Blank
                            }
                        }
                    }
                };
                WordView { original: &token.original, display }
            })
            .collect()
    }

    /// What a finished session writes back: level to maximum, decay clock
    /// restarted, accuracy and time recorded. Call once `is_complete()`.
    pub fn completion(&self, now: DateTime<Utc>) -> CompletionRecord {
        CompletionRecord {
            level: MAX_LEVEL,
            studied_at: now,
            winrate: self.accuracy_percent(),
            seconds: self.elapsed_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic picker: replays a fixed index sequence
    struct SeqPicker {
        sequence: Vec<usize>,
        at: usize,
    }

    impl SeqPicker {
        fn new(sequence: Vec<usize>) -> Self {
            Self { sequence, at: 0 }
        }

        fn zeros() -> Self {
            Self::new(Vec::new())
        }
    }

    impl IndexPicker for SeqPicker {
        fn pick(&mut self, len: usize) -> usize {
            let raw = self.sequence.get(self.at).copied().unwrap_or(0);
            self.at += 1;
            raw % len
        }
    }

    fn card(text: &str) -> Card {
        Card::new(1, "test".to_string(), text.to_string())
    }

    fn studied_card(text: &str, level: i32) -> Card {
        let mut c = card(text);
        c.level = level;
        c.last_studied_at = DateTime::from_timestamp_millis(1_700_000_000_000);
        c
    }

    fn start(card: &Card, effective_level: i32, picker: &mut dyn IndexPicker) -> TrainingSession {
        TrainingSession::start(
            card,
            effective_level,
            &DecayCurve::default(),
            SessionPolicy::default(),
            picker,
        )
    }

    #[test]
    fn unstudied_card_enters_erosion_with_three_cycles() {
        let mut picker = SeqPicker::zeros();
        let session = start(&card("o sol brilha hoje"), 0, &mut picker);

        assert_eq!(session.phase(), Phase::Erosion);
        assert_eq!(session.content_count(), 3); // "o" is a connector
        assert_eq!(session.target_cycles(), 3);
        assert_eq!(session.occluded_count(), 1); // first blank opens immediately
    }

    #[test]
    fn entry_phase_follows_level_thresholds() {
        let mut picker = SeqPicker::zeros();

        let high = start(&studied_card("sol brilha", 9), 9, &mut picker);
        assert_eq!(high.phase(), Phase::Consolidation { cycle: 1 });
        assert_eq!(high.target_cycles(), 1);

        let mid = start(&studied_card("sol brilha", 6), 6, &mut picker);
        assert_eq!(mid.phase(), Phase::Consolidation { cycle: 1 });
        assert_eq!(mid.target_cycles(), 3);

        let low = start(&studied_card("sol brilha", 3), 3, &mut picker);
        assert_eq!(low.phase(), Phase::Erosion);
        assert_eq!(low.target_cycles(), 3);
    }

    #[test]
    fn stored_level_without_timestamp_still_enters_erosion() {
        let mut picker = SeqPicker::zeros();
        let mut c = card("sol brilha");
        c.level = 9; // legacy data: high level but never studied
        let session = start(&c, 9, &mut picker);
        assert_eq!(session.phase(), Phase::Erosion);
    }

    #[test]
    fn erosion_round_refills_then_occludes_one_more() {
        let mut picker = SeqPicker::new(vec![0, 0]);
        let mut session = start(&card("sol brilha forte"), 0, &mut picker);

        // picker chose index 0: "sol" is the first blank
        assert_eq!(session.submit_attempt("sol", &mut picker), Outcome::RoundComplete);
        assert_eq!(session.occluded_count(), 2);

        // new round re-blanks everything: both words must be typed again
        assert_eq!(session.submit_attempt("sol", &mut picker), Outcome::Correct);
        assert_eq!(session.submit_attempt("brilha", &mut picker), Outcome::RoundComplete);
        assert_eq!(session.occluded_count(), 3);
    }

    #[test]
    fn erosion_set_grows_monotonically_and_is_bounded() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&card("um texto com quatro palavras uteis aqui"), 0, &mut picker);

        let mut previous = session.occluded_count();
        while session.phase() == Phase::Erosion {
            // Refill every blank in occlusion order
            let blanks: Vec<String> = session
                .word_views()
                .iter()
                .filter(|v| v.display == WordDisplay::Blank)
                .map(|v| v.original.to_string())
                .collect();
            for word in blanks {
                session.submit_attempt(&word, &mut picker);
            }
            assert!(session.occluded_count() >= previous);
            assert!(session.occluded_count() <= session.content_count());
            previous = session.occluded_count();
        }
        assert_eq!(session.phase(), Phase::Consolidation { cycle: 1 });
    }

    #[test]
    fn erosion_mismatch_records_error_and_changes_nothing() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&card("sol brilha"), 0, &mut picker);

        assert_eq!(session.submit_attempt("lua", &mut picker), Outcome::Incorrect);
        assert_eq!(session.error_count(), 1);
        assert_eq!(session.occluded_count(), 1);
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn empty_input_is_ignored_not_an_error() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&card("sol brilha"), 0, &mut picker);

        assert_eq!(session.submit_attempt("   ", &mut picker), Outcome::Ignored);
        assert_eq!(session.submit_attempt("...", &mut picker), Outcome::Ignored);
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn consolidation_requires_strict_left_to_right_order() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&studied_card("o sol brilha hoje", 9), 9, &mut picker);

        // "brilha" is correct text but not the cursor word
        assert_eq!(session.submit_attempt("brilha", &mut picker), Outcome::Incorrect);
        assert_eq!(session.submit_attempt("sol", &mut picker), Outcome::Correct);
        assert_eq!(session.submit_attempt("brilha", &mut picker), Outcome::Correct);
        assert_eq!(session.submit_attempt("hoje", &mut picker), Outcome::SessionComplete);
        assert!(session.is_complete());
    }

    #[test]
    fn connectors_stay_visible_in_consolidation() {
        let mut picker = SeqPicker::zeros();
        let session = start(&studied_card("o sol brilha", 9), 9, &mut picker);

        let views = session.word_views();
        assert_eq!(views[0].display, WordDisplay::Connector);
        assert_eq!(views[1].display, WordDisplay::Blank);
        assert_eq!(views[2].display, WordDisplay::Blank);
    }

    #[test]
    fn consolidation_cycles_until_target_then_completes() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&studied_card("sol brilha", 6), 6, &mut picker);
        assert_eq!(session.target_cycles(), 3);

        assert_eq!(session.submit_attempt("sol", &mut picker), Outcome::Correct);
        assert_eq!(
            session.submit_attempt("brilha", &mut picker),
            Outcome::CycleComplete { cycle: 2 }
        );
        assert_eq!(session.phase(), Phase::Consolidation { cycle: 2 });

        // Cycle 2 re-blanks everything
        assert!(session
            .word_views()
            .iter()
            .filter(|v| v.display != WordDisplay::Connector)
            .all(|v| v.display == WordDisplay::Blank));

        session.submit_attempt("sol", &mut picker);
        assert_eq!(
            session.submit_attempt("brilha", &mut picker),
            Outcome::CycleComplete { cycle: 3 }
        );
        session.submit_attempt("sol", &mut picker);
        assert_eq!(session.submit_attempt("brilha", &mut picker), Outcome::SessionComplete);

        // Cycle count never exceeded the target
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.submit_attempt("sol", &mut picker), Outcome::Ignored);
    }

    #[test]
    fn matching_is_diacritic_and_case_insensitive() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&studied_card("coração humano", 9), 9, &mut picker);

        assert_eq!(session.submit_attempt("CORACAO", &mut picker), Outcome::Correct);
        assert_eq!(session.submit_attempt("humano.", &mut picker), Outcome::SessionComplete);
    }

    #[test]
    fn completion_record_resets_the_decay_clock() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&studied_card("sol brilha", 9), 9, &mut picker);
        session.tick_second();
        session.tick_second();

        session.submit_attempt("lua", &mut picker); // one error
        session.submit_attempt("sol", &mut picker);
        assert_eq!(session.submit_attempt("brilha", &mut picker), Outcome::SessionComplete);

        let now = DateTime::from_timestamp_millis(1_700_000_500_000).unwrap();
        let record = session.completion(now);
        assert_eq!(record.level, MAX_LEVEL);
        assert_eq!(record.studied_at, now);
        assert_eq!(record.seconds, 2);
        assert_eq!(record.winrate, 67); // 2 correct / 3 attempts
    }

    #[test]
    fn accuracy_defaults_to_one_hundred() {
        let mut picker = SeqPicker::zeros();
        let session = start(&card("sol brilha"), 0, &mut picker);
        assert_eq!(session.accuracy_percent(), 100);
    }

    #[test]
    fn hint_charges_penalty_and_dismissal_restarts_erosion() {
        let mut picker = SeqPicker::zeros();
        // High-level entry: consolidation with a single cycle
        let mut session = start(&studied_card("sol brilha hoje", 9), 9, &mut picker);
        assert_eq!(session.phase(), Phase::Consolidation { cycle: 1 });
        assert_eq!(session.target_cycles(), 1);

        assert_eq!(session.reveal_hint(), "sol brilha hoje");
        assert_eq!(session.error_count(), 5);

        session.dismiss_hint(&mut picker);
        assert_eq!(session.phase(), Phase::Erosion);
        assert_eq!(session.target_cycles(), 3);
        assert_eq!(session.occluded_count(), 1);
        // Tallies carry across the restart
        assert_eq!(session.error_count(), 5);
    }

    #[test]
    fn progress_spans_both_phases() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&card("sol brilha forte"), 0, &mut picker);

        // Erosion: occluded / content
        assert!((session.progress_percent() - 100.0 / 3.0).abs() < 1e-9);

        // Fill through to consolidation
        while session.phase() == Phase::Erosion {
            let blanks: Vec<String> = session
                .word_views()
                .iter()
                .filter(|v| v.display == WordDisplay::Blank)
                .map(|v| v.original.to_string())
                .collect();
            for word in blanks {
                session.submit_attempt(&word, &mut picker);
            }
        }
        assert_eq!(session.progress_percent(), 0.0); // cycle 1, cursor 0

        session.submit_attempt("sol", &mut picker);
        let one_third_cycle = (1.0 / 3.0) / 3.0 * 100.0;
        assert!((session.progress_percent() - one_third_cycle).abs() < 1e-9);

        for word in ["brilha", "forte", "sol", "brilha", "forte", "sol", "brilha", "forte"] {
            session.submit_attempt(word, &mut picker);
        }
        assert!(session.is_complete());
        assert_eq!(session.progress_percent(), 100.0);
    }

    #[test]
    fn ticks_never_advance_the_machine() {
        let mut picker = SeqPicker::zeros();
        let mut session = start(&card("sol brilha"), 0, &mut picker);
        for _ in 0..3600 {
            session.tick_second();
        }
        assert_eq!(session.phase(), Phase::Erosion);
        assert_eq!(session.elapsed_seconds(), 3600);
    }

    #[test]
    fn all_connector_text_completes_immediately() {
        let mut picker = SeqPicker::zeros();
        let session = start(&card("o a de para"), 0, &mut picker);
        assert!(session.is_complete());
        assert_eq!(session.progress_percent(), 100.0);
    }
}
