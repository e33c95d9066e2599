pub mod dual_hand;
pub mod features;
pub mod motion;
pub mod static_pose;
