use std::path::Path;

use crate::config::{self, PodiumConfig};
use crate::dispatch::{Dispatcher, GestureRule};
use crate::error::PodiumError;
use crate::pipeline::defaults::{default_detectors, GeometricFeatureExtractor};
use crate::pipeline::runtime::{ControlCore, ControlCoreParts};
use crate::pipeline::traits::{FeatureExtractor, GestureDetector};
use crate::script::matcher::{ScriptMatcher, ScriptSegment};

/// Assembles a [`ControlCore`] from configuration, with override points at
/// every seam for tests and embedders.
pub struct ControlCoreBuilder {
    config: PodiumConfig,
    extractor: Option<Box<dyn FeatureExtractor>>,
    detectors: Option<Vec<Box<dyn GestureDetector>>>,
    rules: Option<Vec<GestureRule>>,
    segments: Option<Vec<ScriptSegment>>,
}

impl ControlCoreBuilder {
    pub fn new(config: PodiumConfig) -> Self {
        Self {
            config,
            extractor: None,
            detectors: None,
            rules: None,
            segments: None,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn FeatureExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_detectors(mut self, detectors: Vec<Box<dyn GestureDetector>>) -> Self {
        self.detectors = Some(detectors);
        self
    }

    pub fn with_rules(mut self, rules: Vec<GestureRule>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_segments(mut self, segments: Vec<ScriptSegment>) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Load the rule and script surfaces (leniently, with built-in
    /// fallbacks), validate the rule table, and assemble the core.
    pub fn build(self) -> Result<ControlCore, PodiumError> {
        let rules = self
            .rules
            .unwrap_or_else(|| config::load_rules_or_default(Path::new(&self.config.rules_path)));
        let segments = self
            .segments
            .unwrap_or_else(|| config::load_script_or_default(Path::new(&self.config.script_path)));

        let dispatcher = Dispatcher::new(rules, self.config.cooldown_s)?;
        let matcher = ScriptMatcher::new(segments, self.config.weights);

        Ok(ControlCore::from_parts(ControlCoreParts {
            extractor: self
                .extractor
                .unwrap_or_else(|| Box::new(GeometricFeatureExtractor)),
            detectors: self.detectors.unwrap_or_else(default_detectors),
            dispatcher,
            matcher,
        }))
    }
}
