//! Physical pixel coordinates used by the paging widgets.
//!
//! # Key Types
//!
//! - [`Px`] - A single physical pixel value. Negative values are allowed so
//!   that frames can slide off the left edge during a recentre.
//! - [`PxPosition`] - A 2D position (x, y).
//! - [`PxSize`] - A 2D size (width, height).
//! - [`PxRect`] - A rectangle, the unit every frame in the widget is expressed
//!   in.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner
//! - X-axis increases to the right
//! - Y-axis increases downward
//!
//! # Example
//!
//! ```
//! use pagemenu_ui::px::{Px, PxRect};
//!
//! let slot = PxRect::new(Px(320), Px(0), Px(320), Px(480));
//! let span = PxRect::new(Px(0), Px(0), Px(960), Px(480));
//! assert!(slot.intersects(&span));
//! assert_eq!(slot.translate(Px(-640), Px(0)).right(), Px(0));
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::dp::Dp;

/// A physical pixel coordinate value.
///
/// Arithmetic on `Px` is integer arithmetic. Fractional work (drag progress,
/// easing) is done in `f32` and brought back with
/// [`saturating_from_f32`](Self::saturating_from_f32).
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// A constant representing zero pixels.
    pub const ZERO: Self = Self(0);

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts the pixel value to f32.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Creates a `Px` from an f32 value, saturating at the numeric bounds
    /// instead of overflowing.
    ///
    /// ```
    /// use pagemenu_ui::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(42.7), Px(42));
    /// assert_eq!(Px::saturating_from_f32(-1e12), Px(i32::MIN));
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        let clamped_value = value.clamp(i32::MIN as f32, i32::MAX as f32);
        Px(clamped_value as i32)
    }

    /// Rounds an f32 to the nearest pixel, saturating at the numeric bounds.
    pub fn round_from_f32(value: f32) -> Self {
        Self::saturating_from_f32(value.round())
    }

    /// Saturating integer addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Linear interpolation between two pixel values, rounded to the nearest
    /// pixel.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let from = self.to_f32();
        Px::round_from_f32(from + (to.to_f32() - from) * t)
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px(-self.0)
    }
}

impl Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl Div<i32> for Px {
    type Output = Self;

    fn div(self, rhs: i32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

impl From<Dp> for Px {
    fn from(dp: Dp) -> Self {
        Px::saturating_from_f32(dp.to_pixels_f32())
    }
}

/// A 2D position in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// The x-coordinate.
    pub x: Px,
    /// The y-coordinate.
    pub y: Px,
}

impl PxPosition {
    /// Creates a new position.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by the given deltas.
    pub fn offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A 2D size in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// The width.
    pub width: Px,
    /// The height.
    pub height: Px,
}

impl PxSize {
    /// A constant representing an empty size.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// A rectangle in physical pixel space.
///
/// Page slots, the content span of the container and the menu indicator are
/// all `PxRect`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxRect {
    /// The x-coordinate of the top-left corner
    pub x: Px,
    /// The y-coordinate of the top-left corner
    pub y: Px,
    /// The width of the rectangle
    pub width: Px,
    /// The height of the rectangle
    pub height: Px,
}

impl PxRect {
    /// A zero rectangle (0×0 at the origin).
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new rectangle.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The x-coordinate one past the right edge.
    pub fn right(&self) -> Px {
        self.x + self.width
    }

    /// The y-coordinate one past the bottom edge.
    pub fn bottom(&self) -> Px {
        self.y + self.height
    }

    /// Whether the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= Px::ZERO || self.height <= Px::ZERO
    }

    /// Whether the two rectangles share any area. Touching edges do not count.
    ///
    /// ```
    /// use pagemenu_ui::px::{Px, PxRect};
    ///
    /// let left = PxRect::new(Px(0), Px(0), Px(100), Px(100));
    /// let right = PxRect::new(Px(100), Px(0), Px(100), Px(100));
    /// assert!(!left.intersects(&right));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether `point` lies inside the rectangle.
    pub fn contains(&self, point: PxPosition) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns this rectangle moved by the given deltas.
    pub fn translate(&self, dx: Px, dy: Px) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Interpolates every edge toward `to` by `t` in `[0, 1]`.
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.x.lerp(to.x, t),
            self.y.lerp(to.y, t),
            self.width.lerp(to.width, t),
            self.height.lerp(to.height, t),
        )
    }
}
