pub mod config;
pub mod dispatch;
pub mod error;
pub mod gesture;
pub mod pipeline;
pub mod script;
pub mod types;

pub use config::PodiumConfig;
pub use dispatch::{Dispatcher, GestureRule};
pub use error::PodiumError;
pub use pipeline::builder::ControlCoreBuilder;
pub use pipeline::runtime::ControlCore;
pub use pipeline::traits::{FeatureExtractor, GestureDetector};
pub use script::matcher::{MatchOutcome, MatcherWeights, Navigate, ScriptMatcher, ScriptSegment};
pub use types::{
    Command, FingerState, Frame, GestureEvent, GestureKind, HandFeatures, HandSkeleton, Point,
    PositionReport,
};
