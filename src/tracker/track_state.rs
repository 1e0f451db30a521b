use crate::tracker::rect::Rect;

/// Acquisition state of the follower.
///
/// `Searching` runs the authoritative detector every frame. `Tracking` follows
/// the last accepted bounding box with the short-horizon tracker and counts how
/// many frames have passed since the detector last confirmed the target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AcquisitionState {
    /// Looking for a target with the detector
    #[default]
    Searching,
    /// Following a previously detected target
    Tracking {
        /// Last bounding box reported for the target
        bbox: Rect,
        /// Frames tracked since the last detection
        age: u32,
    },
}

impl AcquisitionState {
    pub fn is_tracking(&self) -> bool {
        matches!(self, AcquisitionState::Tracking { .. })
    }

    /// Frames tracked since the last detection, zero while searching.
    pub fn age(&self) -> u32 {
        match self {
            AcquisitionState::Searching => 0,
            AcquisitionState::Tracking { age, .. } => *age,
        }
    }
}
