//! Global tile identifiers (GIDs) and their flip flags.
//!
//! A GID is a 32-bit value:
//!
//! | bits  | meaning              |
//! |-------|----------------------|
//! | 31    | horizontal flip      |
//! | 30    | vertical flip        |
//! | 29    | diagonal flip        |
//! | 0..29 | base id              |
//!
//! GID 0 means "no tile".

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Flip flags carried in the high bits of a GID
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FlipFlags: u32 {
        const HORIZONTAL = 0x8000_0000;
        const VERTICAL = 0x4000_0000;
        const DIAGONAL = 0x2000_0000;
    }
}

/// Mask selecting the base id bits of a GID
pub const GID_MASK: u32 = !FlipFlags::all().bits();

/// GID value meaning "empty cell"
pub const EMPTY_GID: u32 = 0;

impl FlipFlags {
    /// Build the flag set from individual booleans
    pub fn from_bools(horizontal: bool, vertical: bool, diagonal: bool) -> Self {
        let mut flags = FlipFlags::empty();
        flags.set(FlipFlags::HORIZONTAL, horizontal);
        flags.set(FlipFlags::VERTICAL, vertical);
        flags.set(FlipFlags::DIAGONAL, diagonal);
        flags
    }

    pub fn horizontal(&self) -> bool {
        self.contains(FlipFlags::HORIZONTAL)
    }

    pub fn vertical(&self) -> bool {
        self.contains(FlipFlags::VERTICAL)
    }

    pub fn diagonal(&self) -> bool {
        self.contains(FlipFlags::DIAGONAL)
    }

    /// Rendering hint for this flag combination
    pub fn render_hint(&self) -> RenderHint {
        render_hint(self.horizontal(), self.vertical(), self.diagonal())
    }
}

/// A GID split into its base id and flip flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecomposedGid {
    pub base_id: u32,
    pub flags: FlipFlags,
}

impl DecomposedGid {
    pub fn horizontal(&self) -> bool {
        self.flags.horizontal()
    }

    pub fn vertical(&self) -> bool {
        self.flags.vertical()
    }

    pub fn diagonal(&self) -> bool {
        self.flags.diagonal()
    }

    /// Pack back into a raw GID
    pub fn compose(&self) -> u32 {
        self.base_id | self.flags.bits()
    }
}

/// Split a raw GID into base id and flip flags.
///
/// The flags are tested and cleared from the highest bit down (horizontal,
/// vertical, diagonal); what remains is the base id.
pub fn decompose(gid: u32) -> DecomposedGid {
    let mut rest = gid;
    let mut flags = FlipFlags::empty();
    for flag in [FlipFlags::HORIZONTAL, FlipFlags::VERTICAL, FlipFlags::DIAGONAL] {
        if rest & flag.bits() != 0 {
            flags |= flag;
            rest &= !flag.bits();
        }
    }
    DecomposedGid {
        base_id: rest,
        flags,
    }
}

/// Pack a base id and flip flags into a raw GID.
pub fn compose(base_id: u32, horizontal: bool, vertical: bool, diagonal: bool) -> u32 {
    base_id | FlipFlags::from_bools(horizontal, vertical, diagonal).bits()
}

/// Clockwise rotation applied when drawing a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Rotation angle in radians
    pub fn radians(&self) -> f32 {
        f32::from(self.degrees()).to_radians()
    }
}

/// Mirror axis applied when drawing a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mirror {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// How a host should draw a flipped tile: mirror first, then rotate
/// clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderHint {
    pub rotation: Rotation,
    pub mirror: Mirror,
}

impl RenderHint {
    pub const IDENTITY: RenderHint = RenderHint::new(Rotation::None, Mirror::None);

    pub const fn new(rotation: Rotation, mirror: Mirror) -> Self {
        RenderHint { rotation, mirror }
    }

    pub fn is_identity(&self) -> bool {
        *self == RenderHint::IDENTITY
    }
}

impl fmt::Display for RenderHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotate {}° mirror {:?}", self.rotation.degrees(), self.mirror)
    }
}

/// Render hints indexed by `h << 2 | v << 1 | d`.
///
/// The authoring tool applies the diagonal flip (a transpose) first, then
/// the horizontal and vertical flips. Each entry is the equivalent
/// "mirror, then rotate clockwise" pair, preferring a horizontal mirror
/// where two decompositions exist.
const RENDER_HINTS: [RenderHint; 8] = [
    // h=0 v=0 d=0
    RenderHint::new(Rotation::None, Mirror::None),
    // h=0 v=0 d=1
    RenderHint::new(Rotation::Clockwise270, Mirror::Horizontal),
    // h=0 v=1 d=0
    RenderHint::new(Rotation::None, Mirror::Vertical),
    // h=0 v=1 d=1
    RenderHint::new(Rotation::Clockwise270, Mirror::None),
    // h=1 v=0 d=0
    RenderHint::new(Rotation::None, Mirror::Horizontal),
    // h=1 v=0 d=1
    RenderHint::new(Rotation::Clockwise90, Mirror::None),
    // h=1 v=1 d=0
    RenderHint::new(Rotation::Clockwise180, Mirror::None),
    // h=1 v=1 d=1
    RenderHint::new(Rotation::Clockwise90, Mirror::Horizontal),
];

/// Look up the rendering hint for a flip flag combination.
pub fn render_hint(horizontal: bool, vertical: bool, diagonal: bool) -> RenderHint {
    let index =
        (usize::from(horizontal) << 2) | (usize::from(vertical) << 1) | usize::from(diagonal);
    RENDER_HINTS[index]
}
