//! Integer sizes and locations on the tile grid

use std::fmt;
use std::ops::Add;

/// A width/height pair, in tiles or pixels depending on context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ONE: Size = Size::new(1, 1);

    /// Create a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }

    /// Create a square size
    pub const fn square(side: u32) -> Self {
        Size::new(side, side)
    }

    /// Number of cells covered (`width * height`)
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Component-wise product, `None` on overflow
    pub fn checked_mul(&self, other: Size) -> Option<Size> {
        Some(Size::new(
            self.width.checked_mul(other.width)?,
            self.height.checked_mul(other.height)?,
        ))
    }

    /// Component-wise division, `None` when a divisor component is zero
    pub fn checked_div(&self, other: Size) -> Option<Size> {
        Some(Size::new(
            self.width.checked_div(other.width)?,
            self.height.checked_div(other.height)?,
        ))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A signed 2D position (cell coordinates or pixel offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const ORIGIN: Location = Location::new(0, 0);

    /// Create a new location
    pub const fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }
}

impl Add for Location {
    type Output = Location;

    fn add(self, rhs: Location) -> Location {
        Location::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
