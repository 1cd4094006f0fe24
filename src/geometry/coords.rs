use crate::{
    foundation::core::{Coords, ElementRects},
    geometry::placement::{Alignment, Axis, Placement, Side},
};

/// Initial coordinates for `placement`: flush against the reference on the main axis and
/// centered (or start/end aligned) on the cross axis. No middleware adjustments are applied.
pub fn compute_coords_from_placement(
    rects: &ElementRects,
    placement: Placement,
    rtl: bool,
) -> Coords {
    let reference = rects.reference;
    let floating = rects.floating;
    let alignment_axis = placement.alignment_axis();
    let align_length = alignment_axis.length();
    let is_vertical = placement.side_axis() == Axis::Y;

    let common_x = reference.x + reference.width / 2.0 - floating.width / 2.0;
    let common_y = reference.y + reference.height / 2.0 - floating.height / 2.0;
    let common_align = reference.length(align_length) / 2.0 - floating.length(align_length) / 2.0;

    let mut coords = match placement.side() {
        Side::Top => Coords::new(common_x, reference.y - floating.height),
        Side::Bottom => Coords::new(common_x, reference.bottom()),
        Side::Right => Coords::new(reference.right(), common_y),
        Side::Left => Coords::new(reference.x - floating.width, common_y),
    };

    let rtl_sign = if rtl && is_vertical { -1.0 } else { 1.0 };
    match placement.alignment() {
        Some(Alignment::Start) => {
            let v = coords.get(alignment_axis) - common_align * rtl_sign;
            coords.set(alignment_axis, v);
        }
        Some(Alignment::End) => {
            let v = coords.get(alignment_axis) + common_align * rtl_sign;
            coords.set(alignment_axis, v);
        }
        None => {}
    }
    coords
}

/// The two sides along the cross axis an aligned placement can overflow, the side the
/// floating element extends towards first.
pub fn alignment_sides(placement: Placement, rects: &ElementRects, rtl: bool) -> (Side, Side) {
    let alignment_axis = placement.alignment_axis();
    let length = alignment_axis.length();
    let alignment = placement.alignment();

    let mut main = match alignment_axis {
        Axis::X => {
            let towards_right = if rtl {
                Some(Alignment::End)
            } else {
                Some(Alignment::Start)
            };
            if alignment == towards_right {
                Side::Right
            } else {
                Side::Left
            }
        }
        Axis::Y => {
            if alignment == Some(Alignment::Start) {
                Side::Bottom
            } else {
                Side::Top
            }
        }
    };

    if rects.reference.length(length) > rects.floating.length(length) {
        main = main.opposite();
    }
    (main, main.opposite())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/coords.rs"]
mod tests;
