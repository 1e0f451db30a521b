//! Acquisition state machine: decides per frame whether to trust the detector
//! or the short-horizon tracker.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::FollowError;
use crate::frame::Frame;
use crate::integration::{ShortHorizonTracker, TargetSource};
use crate::tracker::rect::Rect;
use crate::tracker::track_state::AcquisitionState;

/// Configuration for the acquisition state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Largest accepted `bbox.w / W`; wider targets are too close to approach.
    pub oversize_ratio: f64,
    /// Minimum detection confidence, `None` for detectors without a score.
    pub min_confidence: Option<f64>,
    /// Tracked frames allowed before the detector must confirm the target again.
    pub redetect_after: u32,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            oversize_ratio: 1.0 / 3.0,
            min_confidence: None,
            redetect_after: 20,
        }
    }
}

/// Why a stop command is issued for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StopReason {
    /// The detector found nothing
    NoTarget,
    /// The target fills too much of the frame
    Oversize { relative_width: f64 },
    /// The detector is not sure enough
    LowConfidence { confidence: f64 },
}

/// Why no command at all is issued for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The tracker reported failure
    TrackerLost,
    /// The target has been tracked for too long without re-detection
    Stale { age: u32 },
}

/// A target position the robot should steer toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Horizontal center in pixels
    pub center_x: f64,
    /// Current bounding box
    pub bbox: Rect,
    /// Detector confidence, `None` when the position came from the tracker
    pub confidence: Option<f64>,
    /// Frames tracked since the last detection
    pub age: u32,
}

/// Outcome of one acquisition step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Issue a stop command
    Stop(StopReason),
    /// Steer toward the target
    Follow(Target),
    /// Issue nothing this frame
    Skip(SkipReason),
}

/// Per-frame search/track state machine.
///
/// While searching, every frame goes through the target source; the first
/// acceptable detection switches to tracking and is followed in the same frame.
/// While tracking, frames go through the short-horizon tracker until it fails
/// or the target has gone unconfirmed for too long, at which point the frame is
/// dropped and searching resumes.
pub struct Acquisition<S: TargetSource, K: ShortHorizonTracker> {
    source: S,
    tracker: K,
    config: AcquisitionConfig,
    frame_width: f64,
    state: AcquisitionState,
}

impl<S: TargetSource, K: ShortHorizonTracker> Acquisition<S, K> {
    /// Create a state machine in the searching state.
    pub fn new(source: S, tracker: K, config: AcquisitionConfig, frame_width: f64) -> Self {
        Self {
            source,
            tracker,
            config,
            frame_width,
            state: AcquisitionState::Searching,
        }
    }

    /// Process one frame.
    pub fn step(&mut self, frame: &Frame) -> Result<Decision, FollowError> {
        match self.state {
            AcquisitionState::Searching => self.search(frame),
            AcquisitionState::Tracking { age, .. } => self.track(frame, age),
        }
    }

    fn search(&mut self, frame: &Frame) -> Result<Decision, FollowError> {
        let detection = self
            .source
            .detect(frame)
            .map_err(|e| FollowError::Detector(Box::new(e)))?;

        let Some(detection) = detection else {
            debug!("no target");
            return Ok(Decision::Stop(StopReason::NoTarget));
        };

        let relative_width = detection.relative_width(self.frame_width);
        if relative_width > self.config.oversize_ratio {
            warn!(
                x = detection.center_x,
                bbox = ?detection.bbox.to_tlwh(),
                relative_width,
                "target too close"
            );
            return Ok(Decision::Stop(StopReason::Oversize { relative_width }));
        }

        if let Some(min_confidence) = self.config.min_confidence {
            if detection.confidence < min_confidence {
                warn!(
                    x = detection.center_x,
                    bbox = ?detection.bbox.to_tlwh(),
                    confidence = detection.confidence,
                    "target confidence too low"
                );
                return Ok(Decision::Stop(StopReason::LowConfidence {
                    confidence: detection.confidence,
                }));
            }
        }

        self.tracker
            .init(frame, detection.bbox)
            .map_err(|e| FollowError::Tracker(Box::new(e)))?;
        self.state = AcquisitionState::Tracking {
            bbox: detection.bbox,
            age: 0,
        };
        info!(
            x = detection.center_x,
            bbox = ?detection.bbox.to_tlwh(),
            confidence = detection.confidence,
            "target acquired"
        );

        Ok(Decision::Follow(Target {
            center_x: detection.center_x,
            bbox: detection.bbox,
            confidence: Some(detection.confidence),
            age: 0,
        }))
    }

    fn track(&mut self, frame: &Frame, age: u32) -> Result<Decision, FollowError> {
        let update = self
            .tracker
            .update(frame)
            .map_err(|e| FollowError::Tracker(Box::new(e)))?;

        if !update.ok || age > self.config.redetect_after {
            let reason = if update.ok {
                SkipReason::Stale { age }
            } else {
                SkipReason::TrackerLost
            };
            warn!(?reason, bbox = ?update.bbox.to_tlwh(), "dropping track, searching again");
            self.tracker.reset();
            self.state = AcquisitionState::Searching;
            return Ok(Decision::Skip(reason));
        }

        let age = age + 1;
        self.state = AcquisitionState::Tracking {
            bbox: update.bbox,
            age,
        };

        Ok(Decision::Follow(Target {
            center_x: update.bbox.center_x(),
            bbox: update.bbox,
            confidence: None,
            age,
        }))
    }

    /// Current state.
    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Width of the frames this machine measures targets against.
    pub fn frame_width(&self) -> f64 {
        self.frame_width
    }

    /// Get a reference to the underlying target source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying target source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &K {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut K {
        &mut self.tracker
    }
}
