//! Axis-aligned boxes in model input pixel space.

/// Axis-aligned box given by its edges.
///
/// Boxes produced by the decoder satisfy `left <= right` and `top <= bottom`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBox {
    /// Left edge (x min).
    pub left: f32,
    /// Top edge (y min).
    pub top: f32,
    /// Right edge (x max).
    pub right: f32,
    /// Bottom edge (y max).
    pub bottom: f32,
}

impl BBox {
    /// Creates a box from its edges.
    #[inline]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a box from a centre point and size.
    #[inline]
    pub fn from_center_size(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            left: cx - half_w,
            top: cy - half_h,
            right: cx + half_w,
            bottom: cy + half_h,
        }
    }

    /// Clamps every edge to `[0, extent]`.
    #[inline]
    pub fn clamped(self, extent: f32) -> Self {
        use crate::util::math::clamp_coord;
        Self {
            left: clamp_coord(self.left, extent),
            top: clamp_coord(self.top, extent),
            right: clamp_coord(self.right, extent),
            bottom: clamp_coord(self.bottom, extent),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Returns the centre point.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Scales x and y independently, e.g. from model space to a display.
    #[inline]
    pub fn scaled(self, sx: f32, sy: f32) -> Self {
        Self {
            left: self.left * sx,
            top: self.top * sy,
            right: self.right * sx,
            bottom: self.bottom * sy,
        }
    }

    /// Intersection-over-union with another box, see [`iou`].
    #[inline]
    pub fn iou(&self, other: &BBox) -> f32 {
        iou(self, other)
    }

    /// Returns the edges as `[left, top, right, bottom]`.
    #[inline]
    pub fn to_ltrb(&self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

/// Intersection-over-union of two boxes, in `[0, 1]`.
///
/// Non-overlapping boxes give 0. When the union area is zero (both boxes
/// degenerate) the result is 0 instead of a division by zero.
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    let left = a.left.max(b.left);
    let top = a.top.max(b.top);
    let right = a.right.min(b.right);
    let bottom = a.bottom.min(b.bottom);

    let intersection = (right - left).max(0.0) * (bottom - top).max(0.0);
    let union = a.area() + b.area() - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_size_conversion() {
        let b = BBox::from_center_size(320.0, 320.0, 100.0, 50.0);
        assert_eq!(b.to_ltrb(), [270.0, 295.0, 370.0, 345.0]);
        assert_eq!(b.center(), (320.0, 320.0));
        assert_eq!(b.area(), 5000.0);
    }

    #[test]
    fn clamping_keeps_box_in_extent() {
        let b = BBox::from_center_size(10.0, 630.0, 40.0, 40.0).clamped(640.0);
        assert_eq!(b.to_ltrb(), [0.0, 610.0, 30.0, 640.0]);
    }

    #[test]
    fn iou_partial_overlap() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, 5.0, 15.0, 15.0);
        // 25 / (100 + 100 - 25)
        assert!((iou(&a, &b) - 25.0 / 175.0).abs() < 1e-6);
    }

    #[test]
    fn iou_touching_edges_is_zero() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(10.0, 0.0, 20.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_of_degenerate_boxes_is_zero() {
        let a = BBox::new(5.0, 5.0, 5.0, 5.0);
        assert_eq!(iou(&a, &a), 0.0);
    }

    #[test]
    fn scaled_uses_independent_factors() {
        let b = BBox::new(10.0, 20.0, 30.0, 40.0).scaled(2.0, 0.5);
        assert_eq!(b.to_ltrb(), [20.0, 10.0, 60.0, 20.0]);
    }
}
