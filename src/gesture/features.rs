//! Geometric pose features from a single hand skeleton.
//!
//! The 5-bit finger vector uses a fixed geometric rule, not a trained
//! classifier: the four fingers compare the tip against the joint two
//! segments down the same finger (image y grows downward), while the thumb
//! compares the tip against its proximal IP joint on the horizontal axis.
//! Downstream pattern matching depends on exactly this semantics.

use crate::types::{FingerState, HandFeatures, HandSkeleton, LANDMARK_COUNT};

#[cfg(test)]
use crate::types::Point;

const WRIST: usize = 0;
const THUMB_IP: usize = 3;
const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
/// Finger MCP knuckles used for the palm-center estimate.
const MCP_JOINTS: [usize; 4] = [5, 9, 13, 17];
/// Fingertips of the four non-thumb fingers.
const FINGER_TIPS: [usize; 4] = [8, 12, 16, 20];

/// Extract per-finger extension flags, palm center, and the pinch gap from
/// one skeleton. A skeleton with fewer than 21 landmarks yields `None`.
pub fn extract_features(skeleton: &HandSkeleton) -> Option<HandFeatures> {
    let lm = &skeleton.landmarks;
    if lm.len() < LANDMARK_COUNT {
        return None;
    }

    let mut fingers = [false; 5];
    fingers[0] = lm[THUMB_TIP].x > lm[THUMB_IP].x;
    for (i, &tip) in FINGER_TIPS.iter().enumerate() {
        fingers[i + 1] = lm[tip].y < lm[tip - 2].y;
    }

    let mut palm = lm[WRIST];
    for &j in &MCP_JOINTS {
        palm.x += lm[j].x;
        palm.y += lm[j].y;
    }
    let n = (MCP_JOINTS.len() + 1) as f32;
    palm.x /= n;
    palm.y /= n;

    Some(HandFeatures {
        fingers: FingerState(fingers),
        palm,
        pinch_gap_px: lm[THUMB_TIP].distance(&lm[INDEX_TIP]),
    })
}

#[cfg(test)]
pub(crate) fn skeleton_with(fingers: [bool; 5]) -> HandSkeleton {
    // Build a synthetic skeleton around a wrist at (100, 200). Extended
    // fingers place the tip above its pip joint; folded fingers below.
    // The thumb extends along +x past its IP joint.
    let mut lm = vec![Point::new(100.0, 200.0); LANDMARK_COUNT];
    lm[THUMB_IP] = Point::new(120.0, 180.0);
    lm[THUMB_TIP] = if fingers[0] {
        Point::new(140.0, 175.0)
    } else {
        Point::new(110.0, 175.0)
    };
    for (i, &tip) in FINGER_TIPS.iter().enumerate() {
        let x = 90.0 + 20.0 * i as f32;
        lm[tip - 2] = Point::new(x, 150.0);
        lm[tip] = if fingers[i + 1] {
            Point::new(x, 120.0)
        } else {
            Point::new(x, 170.0)
        };
    }
    HandSkeleton::new(lm)
}
