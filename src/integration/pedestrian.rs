//! Pedestrian detector target strategy.

use crate::frame::Frame;
use crate::tracker::{Detection, Rect};

use super::{DetectionBuilder, TargetSource};

/// A person found by a classifier, with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonCandidate {
    pub bbox: Rect,
    pub weight: f64,
}

/// Trait for pedestrian detectors (e.g. HOG + linear SVM).
pub trait PedestrianDetector {
    type Error: std::error::Error + Send + Sync + 'static;

    /// People visible in the frame, in detector order.
    fn detect_people(&mut self, frame: &Frame) -> Result<Vec<PersonCandidate>, Self::Error>;
}

/// Follows the first person a detector reports; the classifier weight becomes
/// the detection confidence.
pub struct PedestrianTargetSource<D: PedestrianDetector> {
    detector: D,
}

impl<D: PedestrianDetector> PedestrianTargetSource<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }
}

impl<D: PedestrianDetector> TargetSource for PedestrianTargetSource<D> {
    type Error = D::Error;

    fn detect(&mut self, frame: &Frame) -> Result<Option<Detection>, Self::Error> {
        let people = self.detector.detect_people(frame)?;
        Ok(people.first().map(|person| {
            let [x, y, w, h] = person.bbox.to_tlwh();
            DetectionBuilder::new()
                .tlwh(x, y, w, h)
                .center_x(x + w / 2.0)
                .confidence(person.weight)
                .build()
        }))
    }
}
