use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Coords, SideObject},
    foundation::error::FloatposResult,
    foundation::math::clamp,
    geometry::placement::Axis,
    overflow::detect::{DetectOverflowOptions, detect_overflow},
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareDatum, MiddlewareReturn, MiddlewareState},
};

/// Options of [`Shift`].
///
/// The main axis is the axis along the reference edge (`x` for `top`/`bottom`), the cross
/// axis is the side axis.
pub struct ShiftOptions<E> {
    /// Keep the floating element inside the boundary along the reference edge.
    pub main_axis: bool,
    /// Also clamp on the side axis, letting the floating element overlap the reference.
    pub cross_axis: bool,
    /// Limits how far the element may be shifted.
    pub limiter: Option<LimitShift<E>>,
    /// Boundary and padding for overflow detection.
    pub detect_overflow: DetectOverflowOptions<E>,
}

impl<E> Default for ShiftOptions<E> {
    fn default() -> Self {
        Self {
            main_axis: true,
            cross_axis: false,
            limiter: None,
            detect_overflow: DetectOverflowOptions::default(),
        }
    }
}

impl<E: Clone> Clone for ShiftOptions<E> {
    fn clone(&self) -> Self {
        Self {
            main_axis: self.main_axis,
            cross_axis: self.cross_axis,
            limiter: self.limiter.clone(),
            detect_overflow: self.detect_overflow.clone(),
        }
    }
}

impl<E> ShiftOptions<E> {
    /// Toggle cross-axis shifting.
    pub fn with_cross_axis(mut self, on: bool) -> Self {
        self.cross_axis = on;
        self
    }

    /// Install a limiter.
    pub fn with_limiter(mut self, limiter: LimitShift<E>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Overflow detection options.
    pub fn with_detect_overflow(mut self, options: DetectOverflowOptions<E>) -> Self {
        self.detect_overflow = options;
        self
    }
}

/// Axes [`Shift`] was allowed to move on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEnabled {
    /// Horizontal shifting was requested.
    pub x: bool,
    /// Vertical shifting was requested.
    pub y: bool,
}

/// What the limiter took back from the raw shift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LimitShiftData {
    /// Horizontal correction applied by the limiter.
    pub x: f64,
    /// Vertical correction applied by the limiter.
    pub y: f64,
    /// The limiter changed the clamped coordinates.
    pub constrained: bool,
}

/// Published by [`Shift`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftData {
    /// Horizontal translation relative to the entering coordinates.
    pub x: f64,
    /// Vertical translation relative to the entering coordinates.
    pub y: f64,
    /// Axes that were checked.
    pub enabled: ShiftEnabled,
    /// Limiter report, when a limiter is installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<LimitShiftData>,
}

/// Moves the floating element back inside its clipping boundary.
pub struct Shift<E> {
    options: Derivable<ShiftOptions<E>, E>,
}

/// Shift with fixed options.
pub fn shift<E>(options: ShiftOptions<E>) -> Shift<E> {
    Shift {
        options: Derivable::Static(options),
    }
}

/// Shift with options computed per pass.
pub fn shift_fn<E>(f: impl Fn(&MiddlewareState<'_, E>) -> ShiftOptions<E> + 'static) -> Shift<E> {
    Shift {
        options: Derivable::computed(f),
    }
}

impl<E: Clone> Middleware<E> for Shift<E> {
    fn name(&self) -> &str {
        "shift"
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let options = self.options.resolve(state);
        let overflow = detect_overflow(state, &options.detect_overflow)?;

        let cross_axis = state.placement.side_axis();
        let main_axis = cross_axis.opposite();
        let mut coords = state.coords();
        if options.main_axis {
            clamp_axis(&mut coords, main_axis, &overflow);
        }
        if options.cross_axis {
            clamp_axis(&mut coords, cross_axis, &overflow);
        }

        let (limited, limit) = match &options.limiter {
            Some(limiter) => {
                let limited = limiter.limit(&state.with_coords(coords));
                let report = LimitShiftData {
                    x: limited.x - coords.x,
                    y: limited.y - coords.y,
                    constrained: limited != coords,
                };
                (limited, Some(report))
            }
            None => (coords, None),
        };

        let mut enabled = ShiftEnabled::default();
        match main_axis {
            Axis::X => {
                enabled.x = options.main_axis;
                enabled.y = options.cross_axis;
            }
            Axis::Y => {
                enabled.y = options.main_axis;
                enabled.x = options.cross_axis;
            }
        }

        tracing::trace!(x = limited.x, y = limited.y, "shift");
        Ok(
            MiddlewareReturn::at(limited).with_data(MiddlewareDatum::Shift(ShiftData {
                x: limited.x - state.x,
                y: limited.y - state.y,
                enabled,
                limit,
            })),
        )
    }
}

fn clamp_axis(coords: &mut Coords, axis: Axis, overflow: &SideObject) {
    let value = coords.get(axis);
    let min = value + overflow.get(axis.min_side());
    let max = value - overflow.get(axis.max_side());
    coords.set(axis, clamp(min, value, max));
}

/// Per-axis limiter offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LimitShiftAxes {
    /// How far before detaching along the reference edge shifting stops.
    pub main_axis: f64,
    /// How far before overlapping the reference shifting on the side axis stops.
    pub cross_axis: f64,
}

/// Limiter offset: a main-axis distance or per-axis distances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitShiftOffset {
    /// Main-axis distance.
    Distance(f64),
    /// Per-axis distances.
    Axes(LimitShiftAxes),
}

impl Default for LimitShiftOffset {
    fn default() -> Self {
        LimitShiftOffset::Distance(0.0)
    }
}

impl From<f64> for LimitShiftOffset {
    fn from(v: f64) -> Self {
        LimitShiftOffset::Distance(v)
    }
}

impl From<LimitShiftAxes> for LimitShiftOffset {
    fn from(v: LimitShiftAxes) -> Self {
        LimitShiftOffset::Axes(v)
    }
}

impl LimitShiftOffset {
    fn axes(self) -> LimitShiftAxes {
        match self {
            LimitShiftOffset::Distance(d) => LimitShiftAxes {
                main_axis: d,
                cross_axis: 0.0,
            },
            LimitShiftOffset::Axes(a) => a,
        }
    }
}

/// Limiter for [`Shift`] that stops shifting once the floating element would detach from
/// the reference edge.
pub struct LimitShift<E> {
    /// Distance from detaching at which shifting stops.
    pub offset: Derivable<LimitShiftOffset, E>,
    /// Limit along the reference edge.
    pub main_axis: bool,
    /// Limit on the side axis.
    pub cross_axis: bool,
}

/// Limiter with zero offset on both axes.
pub fn limit_shift<E>() -> LimitShift<E> {
    LimitShift {
        offset: Derivable::default(),
        main_axis: true,
        cross_axis: true,
    }
}

impl<E> Clone for LimitShift<E> {
    fn clone(&self) -> Self {
        Self {
            offset: self.offset.clone(),
            main_axis: self.main_axis,
            cross_axis: self.cross_axis,
        }
    }
}

impl<E> LimitShift<E> {
    /// Fixed offset.
    pub fn with_offset(mut self, offset: impl Into<LimitShiftOffset>) -> Self {
        self.offset = Derivable::Static(offset.into());
        self
    }

    /// Offset computed from the state being limited.
    pub fn with_offset_fn<V>(mut self, f: impl Fn(&MiddlewareState<'_, E>) -> V + 'static) -> Self
    where
        V: Into<LimitShiftOffset>,
    {
        self.offset = Derivable::computed(move |state| f(state).into());
        self
    }

    /// Toggle the main-axis limit.
    pub fn with_main_axis(mut self, on: bool) -> Self {
        self.main_axis = on;
        self
    }

    /// Toggle the side-axis limit.
    pub fn with_cross_axis(mut self, on: bool) -> Self {
        self.cross_axis = on;
        self
    }

    /// Limit the already shifted coordinates in `state`.
    pub fn limit(&self, state: &MiddlewareState<'_, E>) -> Coords {
        let reference = state.rects.reference;
        let floating = state.rects.floating;
        let placement = state.placement;
        let cross_axis = placement.side_axis();
        let main_axis = cross_axis.opposite();
        let offset = self.offset.resolve(state).axes();
        let mut coords = state.coords();

        if self.main_axis {
            let len = main_axis.length();
            let min = reference.origin(main_axis) - floating.length(len) + offset.main_axis;
            let max = reference.origin(main_axis) + reference.length(len) - offset.main_axis;
            coords.set(main_axis, limit_into(coords.get(main_axis), min, max));
        }

        if self.cross_axis {
            let len = cross_axis.length();
            let is_origin_side = placement.side().is_origin_side();
            let offset_skid = state
                .middleware_data
                .offset()
                .map(|d| Coords::new(d.x, d.y).get(cross_axis))
                .unwrap_or(0.0);
            let (min_extra, max_extra) = if is_origin_side {
                (offset_skid, -offset.cross_axis)
            } else {
                (offset.cross_axis, offset_skid)
            };
            let min = reference.origin(cross_axis) - floating.length(len) + min_extra;
            let max = reference.origin(cross_axis) + reference.length(len) + max_extra;
            coords.set(cross_axis, limit_into(coords.get(cross_axis), min, max));
        }

        coords
    }
}

fn limit_into(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/shift.rs"]
mod tests;
