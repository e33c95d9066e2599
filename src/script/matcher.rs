//! Locating spoken content within a pre-segmented reference script.

use tracing::debug;

use crate::script::keywords::extract_keywords;
use crate::script::similarity::{keyword_overlap, lcs_ratio};
use crate::types::PositionReport;

/// One unit of the reference script. Immutable during a session.
#[derive(Debug, Clone)]
pub struct ScriptSegment {
    pub index: usize,
    pub text: String,
    pub slide_number: u32,
    pub keywords: Vec<String>,
}

impl ScriptSegment {
    /// Build a segment, extracting keywords from the text when none are
    /// supplied by the script surface.
    pub fn new(index: usize, text: impl Into<String>, slide_number: u32, keywords: Vec<String>) -> Self {
        let text = text.into();
        let keywords = if keywords.is_empty() {
            extract_keywords(&text)
        } else {
            keywords
        };
        Self {
            index,
            text,
            slide_number,
            keywords,
        }
    }
}

/// Empirically chosen scoring parameters; configurable rather than
/// hard-wired, with no claim of optimality.
#[derive(Debug, Clone, Copy)]
pub struct MatcherWeights {
    pub text_weight: f32,
    pub keyword_weight: f32,
    /// Best combined score must exceed this to move the cursor.
    pub accept_threshold: f32,
    /// Pairwise keyword similarity above this counts as a counterpart.
    pub pair_similarity_cutoff: f32,
}

impl Default for MatcherWeights {
    fn default() -> Self {
        Self {
            text_weight: 0.4,
            keyword_weight: 0.6,
            accept_threshold: 0.25,
            pair_similarity_cutoff: 0.6,
        }
    }
}

/// Outcome of matching one finalized utterance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome {
    Matched { index: usize, confidence: f32 },
    NoMatch,
}

/// Manual cursor navigation; authoritative and never confirmed by text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigate {
    Next,
    Prev,
    First,
    Last,
}

/// Fuzzy aligner holding the script and the current-position cursor.
#[derive(Debug)]
pub struct ScriptMatcher {
    segments: Vec<ScriptSegment>,
    weights: MatcherWeights,
    current_index: usize,
    confidence: f32,
}

impl ScriptMatcher {
    pub fn new(segments: Vec<ScriptSegment>, weights: MatcherWeights) -> Self {
        Self {
            segments,
            weights,
            current_index: 0,
            confidence: 0.0,
        }
    }

    pub fn segments(&self) -> &[ScriptSegment] {
        &self.segments
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Score every segment against the transcript and move the cursor to
    /// the best match when it clears the acceptance threshold. Degrades to
    /// `NoMatch` on empty or garbage input; never errors.
    pub fn match_transcript(&mut self, transcript: &str) -> MatchOutcome {
        let transcript = transcript.trim();
        if transcript.is_empty() || self.segments.is_empty() {
            return MatchOutcome::NoMatch;
        }

        let transcript_keywords = extract_keywords(transcript);
        let mut best: Option<(usize, f32)> = None;
        for segment in &self.segments {
            let text_similarity = lcs_ratio(transcript, &segment.text);
            let overlap = keyword_overlap(
                &transcript_keywords,
                &segment.keywords,
                self.weights.pair_similarity_cutoff,
            );
            let score =
                self.weights.text_weight * text_similarity + self.weights.keyword_weight * overlap;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((segment.index, score));
            }
        }

        match best {
            Some((index, score)) if score > self.weights.accept_threshold => {
                self.current_index = index;
                self.confidence = score;
                debug!(index, score, "transcript matched script segment");
                MatchOutcome::Matched { index, confidence: score }
            }
            _ => MatchOutcome::NoMatch,
        }
    }

    /// Deterministic manual navigation; clamps to the segment range and
    /// zeroes the match confidence.
    pub fn navigate(&mut self, nav: Navigate) {
        if self.segments.is_empty() {
            return;
        }
        let last = self.segments.len() - 1;
        self.current_index = match nav {
            Navigate::Next => (self.current_index + 1).min(last),
            Navigate::Prev => self.current_index.saturating_sub(1),
            Navigate::First => 0,
            Navigate::Last => last,
        };
        self.confidence = 0.0;
    }

    /// Pull-based position snapshot for the display/backend.
    pub fn position(&self) -> PositionReport {
        let (slide_number, progress_percent) = match self.segments.get(self.current_index) {
            Some(segment) => (
                segment.slide_number,
                (self.current_index + 1) as f32 / self.segments.len() as f32 * 100.0,
            ),
            None => (0, 0.0),
        };
        PositionReport {
            current_index: self.current_index,
            slide_number,
            confidence: self.confidence,
            progress_percent,
        }
    }
}
