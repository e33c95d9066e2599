//! Two-hand relationship classification.

use crate::types::{GestureEvent, GestureKind, HandFeatures};

/// Inter-palm distance (pixels) beyond which the hands read as spread apart.
pub const SPREAD_MIN_PX: f32 = 450.0;
/// Inter-palm distance (pixels) below which the hands read as together.
pub const TOGETHER_MAX_PX: f32 = 80.0;

const DISTANCE_CONFIDENCE: f32 = 0.9;

/// Classify the relationship between two simultaneous hands. Anything other
/// than exactly two feature sets silently yields nothing.
pub fn classify(features: &[HandFeatures], now_s: f64) -> Vec<GestureEvent> {
    let [left, right] = match features {
        [a, b] => [a, b],
        _ => return Vec::new(),
    };

    let mut events = Vec::new();
    let mut emit = |label: &'static str, confidence: f32| {
        events.push(GestureEvent {
            label,
            kind: GestureKind::DualHand,
            confidence,
            timestamp_s: now_s,
        });
    };

    let palm_gap = left.palm.distance(&right.palm);
    if palm_gap > SPREAD_MIN_PX {
        emit("spread", DISTANCE_CONFIDENCE);
    } else if palm_gap < TOGETHER_MAX_PX {
        emit("together", DISTANCE_CONFIDENCE);
    }

    if left.fingers.all_folded() && right.fingers.all_folded() {
        emit("double_fist", 1.0);
    }

    events
}
