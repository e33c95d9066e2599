use tracing::trace;

use crate::dispatch::Dispatcher;
use crate::pipeline::traits::{FeatureExtractor, GestureDetector};
use crate::script::matcher::{MatchOutcome, Navigate, ScriptMatcher};
use crate::types::{Command, Frame, GestureEvent, HandFeatures, PositionReport};

/// The assembled control core. `process_frame` and `process_transcript`
/// are the two worker entry points; they mutate disjoint state (dispatcher
/// vs. alignment cursor), so the pose and speech producers can each drive
/// their half from its own thread without a shared lock. Every call is
/// pure computation and completes well within a frame interval.
pub struct ControlCore {
    extractor: Box<dyn FeatureExtractor>,
    detectors: Vec<Box<dyn GestureDetector>>,
    dispatcher: Dispatcher,
    matcher: ScriptMatcher,
}

pub(crate) struct ControlCoreParts {
    pub extractor: Box<dyn FeatureExtractor>,
    pub detectors: Vec<Box<dyn GestureDetector>>,
    pub dispatcher: Dispatcher,
    pub matcher: ScriptMatcher,
}

impl ControlCore {
    pub(crate) fn from_parts(parts: ControlCoreParts) -> Self {
        Self {
            extractor: parts.extractor,
            detectors: parts.detectors,
            dispatcher: parts.dispatcher,
            matcher: parts.matcher,
        }
    }

    /// Classify one frame and run the dispatch decision. At most one
    /// command per call; `None` is the common outcome and never an error.
    pub fn process_frame(&mut self, frame: &Frame) -> Option<Command> {
        let features: Vec<HandFeatures> = frame
            .hands
            .iter()
            .filter_map(|hand| self.extractor.extract(hand))
            .collect();

        let mut events: Vec<GestureEvent> = Vec::new();
        for detector in &mut self.detectors {
            events.extend(detector.detect(&features, frame.timestamp_s));
        }
        if !events.is_empty() {
            trace!(count = events.len(), t = frame.timestamp_s, "gesture events");
        }

        self.dispatcher.evaluate(&events, frame.timestamp_s)
    }

    /// Align one finalized utterance against the script.
    pub fn process_transcript(&mut self, transcript: &str) -> MatchOutcome {
        self.matcher.match_transcript(transcript)
    }

    /// Manual cursor navigation, bypassing matching entirely.
    pub fn navigate(&mut self, nav: Navigate) {
        self.matcher.navigate(nav);
    }

    /// Pull-based position snapshot.
    pub fn position(&self) -> PositionReport {
        self.matcher.position()
    }

    pub fn set_cooldown(&mut self, cooldown_s: f64) {
        self.dispatcher.set_cooldown(cooldown_s);
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn matcher(&self) -> &ScriptMatcher {
        &self.matcher
    }
}
