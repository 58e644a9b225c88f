use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString, VariantArray};

use crate::graph::Payload;

/// Stable vertex identity, unique within a level and assigned when the level is loaded.
pub type Uid = u32;

type Coord = f32;

/// A point in scene space. Only `x` and `y` matter for the planar rule; `z` is carried for the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
    pub z: Coord,
}

impl Position {
    pub fn new(x: Coord, y: Coord, z: Coord) -> Self {
        Self { x, y, z }
    }

    /// A point on the `z = 0` plane.
    pub fn flat(x: Coord, y: Coord) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Project onto the `(x, y)` plane.
    #[inline]
    pub(crate) fn xy(&self) -> (Coord, Coord) {
        (self.x, self.y)
    }
}

impl From<(Coord, Coord)> for Position {
    fn from(value: (Coord, Coord)) -> Self {
        Self::flat(value.0, value.1)
    }
}

impl From<(Coord, Coord, Coord)> for Position {
    fn from(value: (Coord, Coord, Coord)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Paint and selection state of a vertex.
///
/// [`White`](Color::White) is the unset sentinel every vertex starts with.
/// Colors parse from and print as lowercase names, matching the names the UI layer uses for its materials.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum Color {
    #[default]
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Cyan,
    Gold,
}

impl Color {
    /// Whether this color is the unset sentinel.
    #[inline]
    pub fn is_unset(&self) -> bool {
        *self == Self::White
    }

    /// Every color a player may paint with, i.e. all but the unset sentinel.
    pub fn paints() -> impl Iterator<Item = Self> {
        Self::VARIANTS.iter().copied().filter(|color| !color.is_unset())
    }
}

/// The payload carried by every vertex of a level's graph.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub uid: Uid,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Color,
    // partner on mirror levels; the loader guarantees the relation is symmetric
    #[cfg_attr(feature = "serde", serde(default))]
    pub mirror: Option<Uid>,
}

impl Node {
    /// An unpainted node with no mirror partner.
    pub fn new(uid: Uid, position: impl Into<Position>) -> Self {
        Self {
            uid,
            position: position.into(),
            color: Color::default(),
            mirror: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_mirror(mut self, mirror: Uid) -> Self {
        self.mirror = Some(mirror);
        self
    }
}

impl Payload for Node {
    fn uid(&self) -> Uid {
        self.uid
    }
}
