//! Per-frame target candidates.

use crate::tracker::rect::Rect;

/// A single target candidate produced by a target source for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Horizontal center of the target in pixels
    pub center_x: f64,
    /// Bounding box in TLWH format
    pub bbox: Rect,
    /// Detection confidence score
    pub confidence: f64,
}

impl Detection {
    pub fn new(center_x: f64, bbox: Rect, confidence: f64) -> Self {
        Self {
            center_x,
            bbox,
            confidence,
        }
    }

    /// Detection centered on its own bounding box.
    pub fn from_rect(bbox: Rect, confidence: f64) -> Self {
        Self {
            center_x: bbox.center_x(),
            bbox,
            confidence,
        }
    }

    /// Bounding box width relative to the frame width.
    pub fn relative_width(&self, frame_width: f64) -> f64 {
        self.bbox.relative_width(frame_width)
    }
}

/// Result of one short-horizon tracker update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackUpdate {
    /// Whether the tracker still holds the target
    pub ok: bool,
    /// Updated bounding box (meaningless when `ok` is false)
    pub bbox: Rect,
}

impl TrackUpdate {
    pub fn found(bbox: Rect) -> Self {
        Self { ok: true, bbox }
    }

    pub fn lost(bbox: Rect) -> Self {
        Self { ok: false, bbox }
    }
}
