//! Builder for creating Detection objects from various input formats.

use crate::tracker::{Detection, Rect};

/// Padding added around point-derived bounding boxes, in pixels.
pub const POINT_PADDING: f64 = 5.0;

/// Builder for creating `Detection` objects from various input formats.
#[derive(Debug, Clone)]
pub struct DetectionBuilder {
    bbox: Rect,
    center_x: Option<f64>,
    confidence: f64,
}

impl Default for DetectionBuilder {
    fn default() -> Self {
        Self {
            bbox: Rect::default(),
            center_x: None,
            confidence: 1.0,
        }
    }
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: f64, y: f64, w: f64, h: f64) -> Self {
        self.bbox = Rect::new(x, y, w, h);
        self
    }

    /// Derive the target from a point set (marker corners, body keypoints).
    ///
    /// The center is the floored mean x of the points and the bounding box is
    /// their extent grown by `padding`. An empty point set leaves the builder
    /// unchanged.
    pub fn points(mut self, points: &[(f64, f64)], padding: f64) -> Self {
        if let Some(bbox) = Rect::enclosing(points, padding) {
            let sum_x: f64 = points.iter().map(|p| p.0).sum();
            self.center_x = Some((sum_x / points.len() as f64).floor());
            self.bbox = bbox;
        }
        self
    }

    /// Override the horizontal center (defaults to the bounding box center).
    pub fn center_x(mut self, x: f64) -> Self {
        self.center_x = Some(x);
        self
    }

    /// Set the confidence score.
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        let center_x = self.center_x.unwrap_or_else(|| self.bbox.center_x());
        Detection::new(center_x, self.bbox, self.confidence)
    }
}
