//! Anchor-relative placement of an element inside its container

use super::{Point, Size};

/// Where an element's offset is measured from inside its container.
///
/// For anchors on the right or bottom edge the offset points inward, so an
/// offset of `(1, 0)` with [`Placement::TopRight`] leaves one free column to
/// the right of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Placement {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
    CenterLeft,
    CenterRight,
    TopCenter,
    BottomCenter,
}

impl Placement {
    /// Every anchor, in declaration order
    pub const ALL: [Placement; 9] = [
        Placement::TopLeft,
        Placement::TopRight,
        Placement::BottomLeft,
        Placement::BottomRight,
        Placement::Center,
        Placement::CenterLeft,
        Placement::CenterRight,
        Placement::TopCenter,
        Placement::BottomCenter,
    ];

    /// Resolve an offset into absolute container coordinates.
    ///
    /// Halving uses integer division, which truncates toward zero. Extreme
    /// offsets saturate at the `i32` bounds.
    pub const fn resolve(self, container: Size, content: Size, offset: Point) -> Point {
        let (cw, ch) = (container.width, container.height);
        let (w, h) = (content.width, content.height);
        let (ox, oy) = (offset.x, offset.y);

        let left = ox;
        let right = (cw - w).saturating_sub(ox);
        let h_center = (cw / 2 - w / 2).saturating_add(ox);
        let top = oy;
        let bottom = (ch - h).saturating_sub(oy);
        let v_center = (ch / 2 - h / 2).saturating_add(oy);

        match self {
            Placement::TopLeft => Point::new(left, top),
            Placement::TopRight => Point::new(right, top),
            Placement::BottomLeft => Point::new(left, bottom),
            Placement::BottomRight => Point::new(right, bottom),
            Placement::Center => Point::new(h_center, v_center),
            Placement::CenterLeft => Point::new(left, v_center),
            Placement::CenterRight => Point::new(right, v_center),
            Placement::TopCenter => Point::new(h_center, top),
            Placement::BottomCenter => Point::new(h_center, bottom),
        }
    }
}
