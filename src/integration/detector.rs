//! Traits for the per-frame collaborators of the follower.

use crate::frame::Frame;
use crate::tracker::{Detection, Rect, TrackUpdate};

/// Trait for target detection backends.
///
/// Implement this trait to connect any detector to the follower. The
/// follower only ever needs the single best candidate for a frame.
///
/// # Example
///
/// ```ignore
/// use followbot_rs::{Detection, Frame, TargetSource};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl TargetSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &Frame) -> Result<Option<Detection>, Self::Error> {
///         // Run inference and return the best candidate
///         Ok(None)
///     }
/// }
/// ```
pub trait TargetSource {
    /// Error type for detection failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run detection on a frame and return at most one target candidate.
    ///
    /// `Ok(None)` means "no target this frame" and is not an error.
    fn detect(&mut self, frame: &Frame) -> Result<Option<Detection>, Self::Error>;
}

/// Trait for lightweight frame-to-frame trackers.
///
/// The follower calls [`init`](ShortHorizonTracker::init) every time it starts
/// tracking, with a bounding box detected in that same frame, and
/// [`reset`](ShortHorizonTracker::reset) every time it goes back to searching.
pub trait ShortHorizonTracker {
    /// Error type for tracker failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start following the target inside `bbox` on `frame`.
    fn init(&mut self, frame: &Frame, bbox: Rect) -> Result<(), Self::Error>;

    /// Follow the target into `frame`.
    fn update(&mut self, frame: &Frame) -> Result<TrackUpdate, Self::Error>;

    /// Discard any internal model state.
    fn reset(&mut self) {}
}
