use crate::gesture::dual_hand;
use crate::gesture::features::extract_features;
use crate::gesture::motion::MotionClassifier;
use crate::gesture::static_pose;
use crate::pipeline::traits::{FeatureExtractor, GestureDetector};
use crate::types::{GestureEvent, HandFeatures, HandSkeleton, Point};

pub struct GeometricFeatureExtractor;

impl FeatureExtractor for GeometricFeatureExtractor {
    fn extract(&self, skeleton: &HandSkeleton) -> Option<HandFeatures> {
        extract_features(skeleton)
    }
}

pub struct StaticPoseDetector;

impl GestureDetector for StaticPoseDetector {
    fn detect(&mut self, features: &[HandFeatures], now_s: f64) -> Vec<GestureEvent> {
        features
            .iter()
            .flat_map(|hand| static_pose::classify(hand, now_s))
            .collect()
    }
}

pub struct MotionDetector {
    classifier: MotionClassifier,
}

impl MotionDetector {
    pub fn new() -> Self {
        Self {
            classifier: MotionClassifier::new(),
        }
    }
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector for MotionDetector {
    fn detect(&mut self, features: &[HandFeatures], now_s: f64) -> Vec<GestureEvent> {
        let palms: Vec<Point> = features.iter().map(|f| f.palm).collect();
        self.classifier.update(&palms, now_s)
    }
}

pub struct DualHandDetector;

impl GestureDetector for DualHandDetector {
    fn detect(&mut self, features: &[HandFeatures], now_s: f64) -> Vec<GestureEvent> {
        dual_hand::classify(features, now_s)
    }
}

/// The standard detector set: static pose, motion, dual-hand, all emitting
/// independently into one event set.
pub fn default_detectors() -> Vec<Box<dyn GestureDetector>> {
    vec![
        Box::new(StaticPoseDetector),
        Box::new(MotionDetector::new()),
        Box::new(DualHandDetector),
    ]
}
