//! Instantaneous pose classification from one hand's features.

use crate::types::{GestureEvent, GestureKind, HandFeatures};

/// Pinch fires when the thumb-tip/index-tip gap drops below this (pixels).
pub const PINCH_MAX_GAP_PX: f32 = 40.0;

const PATTERN_CONFIDENCE: f32 = 0.9;

/// Classify one hand. Several labels may co-occur in a frame (a pinch can
/// overlap a finger pattern); conflict resolution is left to the
/// dispatcher's threshold and cooldown machinery.
pub fn classify(features: &HandFeatures, now_s: f64) -> Vec<GestureEvent> {
    let mut events = Vec::new();
    let [_thumb, index, middle, ring, pinky] = features.fingers.0;

    let mut emit = |label: &'static str, confidence: f32| {
        events.push(GestureEvent {
            label,
            kind: GestureKind::Static,
            confidence,
            timestamp_s: now_s,
        });
    };

    if features.fingers.all_folded() {
        emit("fist", 1.0);
    } else if features.fingers.all_extended() {
        emit("open_palm", 1.0);
    } else if index && !middle && !ring && !pinky {
        emit("pointing", PATTERN_CONFIDENCE);
    } else if index && middle && !ring && !pinky {
        emit("peace", PATTERN_CONFIDENCE);
    } else if index && !middle && !ring && pinky {
        emit("rock", PATTERN_CONFIDENCE);
    }

    if features.pinch_gap_px < PINCH_MAX_GAP_PX {
        // Distance-derived confidence, tighter pinch scoring higher;
        // stays within (0.5, 1.0].
        let confidence = 1.0 - features.pinch_gap_px / (2.0 * PINCH_MAX_GAP_PX);
        emit("pinch", confidence);
    }

    events
}
