use crate::types::{GestureEvent, HandFeatures, HandSkeleton};

/// Converts one hand skeleton into low-level features. Pure computation;
/// a malformed skeleton yields `None`, never an error.
pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, skeleton: &HandSkeleton) -> Option<HandFeatures>;
}

/// One gesture classifier. Receives every hand's features for the frame in
/// slot order and emits zero or more confidence-scored events. Detectors
/// may keep cross-frame state (rolling windows); insufficient input
/// silently emits nothing.
pub trait GestureDetector: Send {
    fn detect(&mut self, features: &[HandFeatures], now_s: f64) -> Vec<GestureEvent>;
}
