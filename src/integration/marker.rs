//! Fiducial marker target strategy.

use crate::frame::Frame;
use crate::tracker::Detection;

use super::{DetectionBuilder, POINT_PADDING, TargetSource};

/// Marker ids the follower accepts by default.
pub const DEFAULT_MARKER_IDS: [u32; 4] = [0, 2, 5, 8];

/// A square fiducial marker found in a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: u32,
    /// Corner points in image coordinates
    pub corners: [(f64, f64); 4],
}

/// Trait for fiducial marker detectors (e.g. ArUco 4x4 dictionaries).
pub trait MarkerDetector {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All markers visible in the frame, in detector order.
    fn detect_markers(&mut self, frame: &Frame) -> Result<Vec<Marker>, Self::Error>;
}

/// Follows the first marker a detector reports, if its id is accepted.
///
/// Markers carry no score, so every accepted detection has confidence 1.0.
pub struct MarkerTargetSource<D: MarkerDetector> {
    detector: D,
    accepted_ids: Vec<u32>,
}

impl<D: MarkerDetector> MarkerTargetSource<D> {
    pub fn new(detector: D) -> Self {
        Self::with_ids(detector, DEFAULT_MARKER_IDS.to_vec())
    }

    pub fn with_ids(detector: D, accepted_ids: Vec<u32>) -> Self {
        Self {
            detector,
            accepted_ids,
        }
    }

    pub fn accepted_ids(&self) -> &[u32] {
        &self.accepted_ids
    }
}

impl<D: MarkerDetector> TargetSource for MarkerTargetSource<D> {
    type Error = D::Error;

    fn detect(&mut self, frame: &Frame) -> Result<Option<Detection>, Self::Error> {
        let markers = self.detector.detect_markers(frame)?;
        let Some(marker) = markers.first() else {
            return Ok(None);
        };
        if !self.accepted_ids.contains(&marker.id) {
            return Ok(None);
        }
        Ok(Some(
            DetectionBuilder::new()
                .points(&marker.corners, POINT_PADDING)
                .build(),
        ))
    }
}
