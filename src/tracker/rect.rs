/// Axis-aligned bounding box in pixel coordinates.
///
/// Stored in TLWH form (top-left x, top-left y, width, height), which is the
/// form detectors and trackers hand over. Conversions:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f64,
    /// Top-left y coordinate
    pub y: f64,
    /// Width of the bounding box
    pub width: f64,
    /// Height of the bounding box
    pub height: f64,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of a point set, grown by `padding` pixels on every side.
    ///
    /// Coordinates are truncated toward zero so the box lands on whole pixels.
    /// Returns `None` for an empty point set.
    pub fn enclosing(points: &[(f64, f64)], padding: f64) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut sx, mut sy, mut ex, mut ey) = (first.0, first.1, first.0, first.1);
        for &(x, y) in rest {
            sx = sx.min(x);
            sy = sy.min(y);
            ex = ex.max(x);
            ey = ey.max(y);
        }
        Some(Self::new(
            (sx - padding).trunc(),
            (sy - padding).trunc(),
            (ex - sx + 2.0 * padding).trunc(),
            (ey - sy + 2.0 * padding).trunc(),
        ))
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f64; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Horizontal center, computed as `(2x + w) / 2`.
    #[inline]
    pub fn center_x(&self) -> f64 {
        (self.x * 2.0 + self.width) / 2.0
    }

    /// Width of the box as a fraction of the frame width.
    #[inline]
    pub fn relative_width(&self, frame_width: f64) -> f64 {
        self.width / frame_width
    }
}
