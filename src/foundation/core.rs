use crate::foundation::error::{PlaceheatError, PlaceheatResult};

/// Height used by the Y-axis inversion applied to every parsed row.
pub const CANVAS_HEIGHT: u32 = 1000;

/// Width of the fixed output canvas.
pub const CANVAS_WIDTH: u32 = 1000;

/// The fixed 1000x1000 canvas shared by the renderer and the compositor.
pub const CANVAS: Canvas = Canvas {
    width: CANVAS_WIDTH,
    height: CANVAS_HEIGHT,
};

/// Opaque background the heatmap is flattened onto.
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Pixel grid bounds, origin at `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    pub fn validate(self) -> PlaceheatResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(PlaceheatError::render("canvas width/height must be non-zero"));
        }
        Ok(self)
    }

    pub fn contains(self, col: i64, row: i64) -> bool {
        col >= 0 && row >= 0 && col < i64::from(self.width) && row < i64::from(self.height)
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// A point in renderer space (Cartesian, y grows upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from raw data coordinates, inverting Y against [`CANVAS_HEIGHT`].
    pub fn from_data(x: i64, y: i64) -> Self {
        Self {
            x: x as f64,
            y: f64::from(CANVAS_HEIGHT) - y as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_data_inverts_y_only() {
        assert_eq!(Point::from_data(10, 990), Point::new(10.0, 10.0));
        assert_eq!(Point::from_data(0, 0), Point::new(0.0, 1000.0));
        assert_eq!(Point::from_data(-5, 1200), Point::new(-5.0, -200.0));
    }

    #[test]
    fn zero_canvas_is_rejected() {
        assert!(Canvas { width: 0, height: 5 }.validate().is_err());
        assert!(CANVAS.validate().is_ok());
    }

    #[test]
    fn contains_is_half_open() {
        assert!(CANVAS.contains(0, 0));
        assert!(CANVAS.contains(999, 999));
        assert!(!CANVAS.contains(1000, 0));
        assert!(!CANVAS.contains(0, -1));
    }
}
