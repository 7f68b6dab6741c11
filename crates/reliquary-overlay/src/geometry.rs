//! Viewport geometry and tooltip placement

/// A point in viewport coordinates (pixels, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered size of a box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Size {
    /// Create a size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Visible area the tooltip must stay inside
pub type Viewport = Size;

/// Compute the tooltip position for a pointer anchor
///
/// The returned `x` is the horizontal centre line of the box and `y` its top
/// edge. The default is `(px, py + offset)`. At most one horizontal and one
/// vertical correction is applied:
///
/// - right overflow (`px + w > W`): `x = px - w - offset`
/// - otherwise left overflow (`px - w < 0`): `x = px + offset`
/// - bottom overflow (`py + offset + h > H`): `y = py - h - offset`
///
/// # Examples
///
/// ```
/// use reliquary_overlay::{place, Point, Size};
///
/// let viewport = Size::new(800.0, 600.0);
/// let tooltip = Size::new(100.0, 50.0);
///
/// let p = place(Point::new(400.0, 300.0), tooltip, viewport, 10.0);
/// assert_eq!(p, Point::new(400.0, 310.0));
///
/// let p = place(Point::new(750.0, 580.0), tooltip, viewport, 10.0);
/// assert_eq!(p, Point::new(640.0, 520.0));
/// ```
pub fn place(anchor: Point, size: Size, viewport: Viewport, offset: f64) -> Point {
    let mut x = anchor.x;
    let mut y = anchor.y + offset;

    if x + size.width > viewport.width {
        x = anchor.x - size.width - offset;
    } else if x - size.width < 0.0 {
        x = anchor.x + offset;
    }

    if y + size.height > viewport.height {
        y = anchor.y - size.height - offset;
    }

    Point { x, y }
}
