//! Vision-driven target following for differential-drive robots.
//!
//! Per frame, the [`Acquisition`] state machine decides whether to trust a
//! full detector ([`TargetSource`]) or a lightweight frame-to-frame tracker
//! ([`ShortHorizonTracker`]); the [`SteeringController`] turns the target's
//! position and size into wheel speeds; the [`CommandChannel`] sends them to
//! the robot as sequenced text commands. [`FollowPipeline`] ties these
//! together into a single-threaded control loop with a one-shot shutdown.

pub mod channel;
pub mod config;
pub mod control;
pub mod error;
pub mod frame;
pub mod integration;
pub mod lifecycle;
pub mod tracker;

pub use channel::{ChannelConfig, Command, CommandChannel, Transport};
pub use config::{FollowerConfig, FrameConfig, Variant};
pub use control::{SpeedProfile, SteeringCommand, SteeringConfig, SteeringController};
pub use error::{ChannelError, ConfigError, FollowError};
pub use frame::{Frame, FrameSource};
pub use integration::{
    DetectionBuilder, FollowPipeline, KeypointTargetSource, MarkerTargetSource, Outcome,
    PedestrianTargetSource, ShortHorizonTracker, TargetSource,
};
pub use lifecycle::{ShutdownToken, install_signal_handler};
pub use tracker::{
    Acquisition, AcquisitionConfig, AcquisitionState, Decision, Detection, Rect, SkipReason,
    StopReason, Target, TemplateTracker, TrackUpdate,
};
