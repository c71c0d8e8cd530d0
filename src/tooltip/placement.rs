/// A point in viewport (client) coordinates, CSS px
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner for a tooltip of `tooltip` size near `pointer`.
///
/// The tooltip sits below-right of the pointer. On an axis where that would
/// overflow the viewport it flips to the other side of the pointer. A flipped
/// coordinate that would go negative is pinned to 0 so the tooltip's leading
/// edge stays on screen.
#[must_use]
pub fn place(pointer: Point, tooltip: Size, viewport: Size, offset: f64) -> Point {
    Point::new(
        place_axis(pointer.x, tooltip.width, viewport.width, offset),
        place_axis(pointer.y, tooltip.height, viewport.height, offset),
    )
}

fn place_axis(pointer: f64, extent: f64, viewport: f64, offset: f64) -> f64 {
    let preferred = pointer + offset;
    if preferred + extent <= viewport {
        return preferred;
    }
    (pointer - extent - offset).max(0.0)
}
