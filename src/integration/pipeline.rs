//! FollowPipeline: the per-frame control loop.

use tracing::{debug, error, info, warn};

use crate::channel::{Command, CommandChannel};
use crate::config::FollowerConfig;
use crate::control::SteeringController;
use crate::error::FollowError;
use crate::frame::{Frame, FrameSource};
use crate::lifecycle::{OneShot, ShutdownToken};
use crate::tracker::{Acquisition, Decision};

use super::{ShortHorizonTracker, TargetSource};

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Decision of the acquisition state machine
    pub decision: Decision,
    /// Command issued for the frame, if any
    pub command: Option<Command>,
    /// Sequence id the command went out with, `None` when skipped or disabled
    pub id: Option<u64>,
}

/// A follower that bundles a frame source, the acquisition state machine,
/// the steering controller and the command channel.
///
/// One iteration reads one frame and issues at most one command.
pub struct FollowPipeline<F: FrameSource, S: TargetSource, K: ShortHorizonTracker> {
    frames: F,
    acquisition: Acquisition<S, K>,
    steering: SteeringController,
    channel: CommandChannel,
    finished: OneShot,
}

impl<F, S, K> FollowPipeline<F, S, K>
where
    F: FrameSource,
    S: TargetSource,
    K: ShortHorizonTracker,
{
    /// Create a pipeline from its parts.
    pub fn new(
        frames: F,
        acquisition: Acquisition<S, K>,
        steering: SteeringController,
        channel: CommandChannel,
    ) -> Self {
        Self {
            frames,
            acquisition,
            steering,
            channel,
            finished: OneShot::new(),
        }
    }

    /// Create a pipeline with the thresholds and speeds from `config`.
    pub fn from_config(
        config: &FollowerConfig,
        frames: F,
        source: S,
        tracker: K,
        channel: CommandChannel,
    ) -> Self {
        let width = f64::from(config.frame.width);
        Self::new(
            frames,
            Acquisition::new(source, tracker, config.acquisition.clone(), width),
            SteeringController::new(config.steering, width),
            channel,
        )
    }

    /// Read the next frame and process it.
    pub fn step(&mut self) -> Result<Outcome, FollowError> {
        let frame = self
            .frames
            .read()
            .map_err(|e| FollowError::Frame(Box::new(e)))?;
        self.process(&frame)
    }

    /// Run one frame through the state machine and issue its command.
    pub fn process(&mut self, frame: &Frame) -> Result<Outcome, FollowError> {
        let decision = self.acquisition.step(frame)?;

        let command = match decision {
            Decision::Stop(_) => Some(Command::Stop),
            Decision::Follow(target) => {
                let steer = self.steering.steer(target.center_x, target.bbox.width);
                debug!(
                    x = target.center_x,
                    bbox = ?target.bbox.to_tlwh(),
                    age = target.age,
                    left = steer.left,
                    right = steer.right,
                    "steering"
                );
                Some(Command::Move {
                    left: steer.left,
                    right: steer.right,
                })
            }
            Decision::Skip(_) => None,
        };

        let id = match command {
            Some(command) => self.channel.send(command)?,
            None => None,
        };

        Ok(Outcome {
            decision,
            command,
            id,
        })
    }

    /// Process frames until `token` is cancelled or an error occurs, then shut down.
    ///
    /// A failing iteration still runs the shutdown sequence before its error
    /// is returned.
    pub fn run(&mut self, token: &ShutdownToken) -> Result<(), FollowError> {
        info!("follower started");
        while !token.is_cancelled() {
            if let Err(e) = self.step() {
                error!(error = %e, "control loop failed");
                if let Err(shutdown_err) = self.shutdown() {
                    warn!(error = %shutdown_err, "shutdown after failure incomplete");
                }
                return Err(e);
            }
        }
        self.shutdown()
    }

    /// Stop the robot, close the channel and release the frame source.
    ///
    /// Runs at most once; later calls return `Ok(())` without touching anything.
    pub fn shutdown(&mut self) -> Result<(), FollowError> {
        if !self.finished.fire() {
            return Ok(());
        }

        let stopped = if self.channel.is_connected() {
            self.channel.stop().map(|_| ())
        } else {
            Ok(())
        };
        if let Err(e) = &stopped {
            warn!(error = %e, "final stop failed");
        }
        let closed = self.channel.close();
        self.frames.release();
        info!("follower stopped");

        stopped.and(closed).map_err(FollowError::from)
    }

    /// Whether the shutdown sequence has run.
    pub fn is_shut_down(&self) -> bool {
        self.finished.has_fired()
    }

    /// Get a reference to the acquisition state machine.
    pub fn acquisition(&self) -> &Acquisition<S, K> {
        &self.acquisition
    }

    /// Get a mutable reference to the acquisition state machine.
    pub fn acquisition_mut(&mut self) -> &mut Acquisition<S, K> {
        &mut self.acquisition
    }

    /// Get a reference to the steering controller.
    pub fn steering(&self) -> &SteeringController {
        &self.steering
    }

    /// Get a reference to the command channel.
    pub fn channel(&self) -> &CommandChannel {
        &self.channel
    }

    /// Get a reference to the frame source.
    pub fn frames(&self) -> &F {
        &self.frames
    }
}
