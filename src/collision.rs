//! Axis-aligned rectangle overlap test.

use crate::entities::Rect;

/// True when `a` and `b` share interior area.  Rectangles that only touch
/// along an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.bottom() > b.top() && a.top() < b.bottom() && a.right() > b.left() && a.left() < b.right()
}
