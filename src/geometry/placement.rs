use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{FloatposError, FloatposResult};

/// One of the four sides of the reference element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Above the reference.
    Top,
    /// Right of the reference.
    Right,
    /// Below the reference.
    Bottom,
    /// Left of the reference.
    Left,
}

impl Side {
    /// All sides in canonical order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The side facing this one.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Axis the side moves along: `y` for top/bottom, `x` for left/right.
    pub fn axis(self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Y,
            Side::Left | Side::Right => Axis::X,
        }
    }

    /// Return `true` for the sides that sit at the coordinate origin (top, left).
    pub fn is_origin_side(self) -> bool {
        matches!(self, Side::Top | Side::Left)
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

/// Alignment of the floating element along the reference edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Flush with the start edge.
    Start,
    /// Flush with the end edge.
    End,
}

impl Alignment {
    /// Swap start and end.
    pub fn opposite(self) -> Alignment {
        match self {
            Alignment::Start => Alignment::End,
            Alignment::End => Alignment::Start,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Start => "start",
            Alignment::End => "end",
        }
    }
}

/// Coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// The perpendicular axis.
    pub fn opposite(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Extent measured along this axis.
    pub fn length(self) -> Length {
        match self {
            Axis::X => Length::Width,
            Axis::Y => Length::Height,
        }
    }

    /// Side at the low end of the axis.
    pub fn min_side(self) -> Side {
        match self {
            Axis::X => Side::Left,
            Axis::Y => Side::Top,
        }
    }

    /// Side at the high end of the axis.
    pub fn max_side(self) -> Side {
        self.min_side().opposite()
    }
}

/// Rectangle extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

/// Where the floating element sits relative to the reference: a side plus an optional alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Above, centered.
    Top,
    /// Above, start-aligned.
    TopStart,
    /// Above, end-aligned.
    TopEnd,
    /// Right, centered.
    Right,
    /// Right, start-aligned.
    RightStart,
    /// Right, end-aligned.
    RightEnd,
    /// Below, centered.
    #[default]
    Bottom,
    /// Below, start-aligned.
    BottomStart,
    /// Below, end-aligned.
    BottomEnd,
    /// Left, centered.
    Left,
    /// Left, start-aligned.
    LeftStart,
    /// Left, end-aligned.
    LeftEnd,
}

impl Placement {
    /// All twelve placements, grouped by side in `top, right, bottom, left` order.
    pub const ALL: [Placement; 12] = [
        Placement::Top,
        Placement::TopStart,
        Placement::TopEnd,
        Placement::Right,
        Placement::RightStart,
        Placement::RightEnd,
        Placement::Bottom,
        Placement::BottomStart,
        Placement::BottomEnd,
        Placement::Left,
        Placement::LeftStart,
        Placement::LeftEnd,
    ];

    /// Compose a placement from its parts.
    pub fn new(side: Side, alignment: Option<Alignment>) -> Placement {
        use Alignment::{End, Start};
        match (side, alignment) {
            (Side::Top, None) => Placement::Top,
            (Side::Top, Some(Start)) => Placement::TopStart,
            (Side::Top, Some(End)) => Placement::TopEnd,
            (Side::Right, None) => Placement::Right,
            (Side::Right, Some(Start)) => Placement::RightStart,
            (Side::Right, Some(End)) => Placement::RightEnd,
            (Side::Bottom, None) => Placement::Bottom,
            (Side::Bottom, Some(Start)) => Placement::BottomStart,
            (Side::Bottom, Some(End)) => Placement::BottomEnd,
            (Side::Left, None) => Placement::Left,
            (Side::Left, Some(Start)) => Placement::LeftStart,
            (Side::Left, Some(End)) => Placement::LeftEnd,
        }
    }

    /// Side component.
    pub fn side(self) -> Side {
        match self {
            Placement::Top | Placement::TopStart | Placement::TopEnd => Side::Top,
            Placement::Right | Placement::RightStart | Placement::RightEnd => Side::Right,
            Placement::Bottom | Placement::BottomStart | Placement::BottomEnd => Side::Bottom,
            Placement::Left | Placement::LeftStart | Placement::LeftEnd => Side::Left,
        }
    }

    /// Alignment component, `None` when centered.
    pub fn alignment(self) -> Option<Alignment> {
        match self {
            Placement::TopStart
            | Placement::RightStart
            | Placement::BottomStart
            | Placement::LeftStart => Some(Alignment::Start),
            Placement::TopEnd | Placement::RightEnd | Placement::BottomEnd | Placement::LeftEnd => {
                Some(Alignment::End)
            }
            _ => None,
        }
    }

    /// Return `true` for the four centered placements.
    pub fn is_base(self) -> bool {
        self.alignment().is_none()
    }

    /// Main axis: the axis the side moves along (`y` for top/bottom).
    pub fn side_axis(self) -> Axis {
        self.side().axis()
    }

    /// Cross axis: the axis along the reference edge.
    pub fn alignment_axis(self) -> Axis {
        self.side_axis().opposite()
    }

    /// Same alignment on the opposite side.
    pub fn opposite(self) -> Placement {
        Placement::new(self.side().opposite(), self.alignment())
    }

    /// Same side with start/end swapped; centered placements are unchanged.
    pub fn opposite_alignment(self) -> Placement {
        Placement::new(self.side(), self.alignment().map(Alignment::opposite))
    }

    /// Default fallbacks for an aligned placement: alignment-swapped, opposite side, and both.
    pub fn expanded(self) -> Vec<Placement> {
        let opposite = self.opposite();
        vec![
            self.opposite_alignment(),
            opposite,
            opposite.opposite_alignment(),
        ]
    }

    /// Placements on the perpendicular axis, ordered towards `start` or `end` first.
    pub fn opposite_axis_placements(
        self,
        flip_alignment: bool,
        start_first: bool,
        rtl: bool,
    ) -> Vec<Placement> {
        let sides = match self.side() {
            Side::Top | Side::Bottom => {
                if start_first != rtl {
                    [Side::Left, Side::Right]
                } else {
                    [Side::Right, Side::Left]
                }
            }
            Side::Left | Side::Right => {
                if start_first {
                    [Side::Top, Side::Bottom]
                } else {
                    [Side::Bottom, Side::Top]
                }
            }
        };

        let Some(alignment) = self.alignment() else {
            return sides.iter().map(|s| Placement::new(*s, None)).collect();
        };

        let mut out: Vec<Placement> = sides
            .iter()
            .map(|s| Placement::new(*s, Some(alignment)))
            .collect();
        if flip_alignment {
            let swapped: Vec<Placement> = out.iter().map(|p| p.opposite_alignment()).collect();
            out.extend(swapped);
        }
        out
    }

    /// Wire name, e.g. `top-start`.
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::TopStart => "top-start",
            Placement::TopEnd => "top-end",
            Placement::Right => "right",
            Placement::RightStart => "right-start",
            Placement::RightEnd => "right-end",
            Placement::Bottom => "bottom",
            Placement::BottomStart => "bottom-start",
            Placement::BottomEnd => "bottom-end",
            Placement::Left => "left",
            Placement::LeftStart => "left-start",
            Placement::LeftEnd => "left-end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = FloatposError;

    fn from_str(s: &str) -> FloatposResult<Self> {
        Placement::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FloatposError::validation(format!("unknown placement '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/placement.rs"]
mod tests;
