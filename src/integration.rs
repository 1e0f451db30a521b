//! Integration module for connecting detectors, trackers and frame sources
//! with the follower.
//!
//! This module provides the collaborator traits, the three target strategies
//! (fiducial markers, pedestrians, body keypoints) and the pipeline that runs
//! the control loop.

mod builder;
mod detector;
mod keypoint;
mod marker;
mod pedestrian;
mod pipeline;

pub use builder::{DetectionBuilder, POINT_PADDING};
pub use detector::{ShortHorizonTracker, TargetSource};
pub use keypoint::{
    KeypointError, KeypointModel, KeypointOutput, KeypointTargetSource, decode, preprocess,
};
pub use marker::{DEFAULT_MARKER_IDS, Marker, MarkerDetector, MarkerTargetSource};
pub use pedestrian::{PedestrianDetector, PedestrianTargetSource, PersonCandidate};
pub use pipeline::{FollowPipeline, Outcome};
