use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Coords,
    foundation::error::FloatposResult,
    geometry::placement::{Alignment, Axis, Placement},
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareDatum, MiddlewareReturn, MiddlewareState},
};

/// Distances along the main and cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OffsetAxes {
    /// Gap between reference and floating element.
    pub main_axis: f64,
    /// Skid along the reference edge.
    pub cross_axis: f64,
    /// Skid for aligned placements; overrides `cross_axis` and is inverted for `end`.
    pub alignment_axis: Option<f64>,
}

/// Offset option: a bare main-axis distance or per-axis distances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffsetValue {
    /// Main-axis distance.
    Distance(f64),
    /// Per-axis distances.
    Axes(OffsetAxes),
}

impl Default for OffsetValue {
    fn default() -> Self {
        OffsetValue::Distance(0.0)
    }
}

impl From<f64> for OffsetValue {
    fn from(v: f64) -> Self {
        OffsetValue::Distance(v)
    }
}

impl From<OffsetAxes> for OffsetValue {
    fn from(v: OffsetAxes) -> Self {
        OffsetValue::Axes(v)
    }
}

/// Published by [`Offset`]: the translation applied and the placement it was computed for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffsetData {
    /// Horizontal translation.
    pub x: f64,
    /// Vertical translation.
    pub y: f64,
    /// Placement in effect.
    pub placement: Placement,
}

/// Translates the floating element away from (main axis) or along (cross axis) the reference.
pub struct Offset<E> {
    value: Derivable<OffsetValue, E>,
}

/// Offset by a fixed value.
pub fn offset<E>(value: impl Into<OffsetValue>) -> Offset<E> {
    Offset {
        value: Derivable::Static(value.into()),
    }
}

/// Offset by a value computed from the current state on every pass.
pub fn offset_fn<E, V>(f: impl Fn(&MiddlewareState<'_, E>) -> V + 'static) -> Offset<E>
where
    V: Into<OffsetValue>,
{
    Offset {
        value: Derivable::computed(move |state| f(state).into()),
    }
}

impl<E> Offset<E> {
    /// Build from an already wrapped option.
    pub fn new(value: Derivable<OffsetValue, E>) -> Self {
        Self { value }
    }
}

impl<E> Middleware<E> for Offset<E> {
    fn name(&self) -> &str {
        "offset"
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let diff = offset_to_coords(state, self.value.resolve(state))?;
        tracing::trace!(dx = diff.x, dy = diff.y, "offset");
        Ok(
            MiddlewareReturn::at(Coords::new(state.x + diff.x, state.y + diff.y)).with_data(
                MiddlewareDatum::Offset(OffsetData {
                    x: diff.x,
                    y: diff.y,
                    placement: state.placement,
                }),
            ),
        )
    }
}

fn offset_to_coords<E>(state: &MiddlewareState<'_, E>, value: OffsetValue) -> FloatposResult<Coords> {
    let placement = state.placement;
    let rtl = state.is_rtl()?;
    let is_vertical = placement.side_axis() == Axis::Y;
    let main_multi = if placement.side().is_origin_side() {
        -1.0
    } else {
        1.0
    };
    let cross_multi = if rtl && is_vertical { -1.0 } else { 1.0 };

    let OffsetAxes {
        main_axis,
        mut cross_axis,
        alignment_axis,
    } = match value {
        OffsetValue::Distance(d) => OffsetAxes {
            main_axis: d,
            ..OffsetAxes::default()
        },
        OffsetValue::Axes(a) => a,
    };

    if let (Some(alignment), Some(skid)) = (placement.alignment(), alignment_axis) {
        cross_axis = if alignment == Alignment::End { -skid } else { skid };
    }

    Ok(if is_vertical {
        Coords::new(cross_axis * cross_multi, main_axis * main_multi)
    } else {
        Coords::new(main_axis * main_multi, cross_axis * cross_multi)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/offset.rs"]
mod tests;
