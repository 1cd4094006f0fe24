use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::FloatposResult,
    geometry::placement::{Alignment, Axis, Side},
    overflow::detect::{DetectOverflowOptions, detect_overflow},
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareDatum, MiddlewareReturn, MiddlewareState, Reset},
};

/// Arguments handed to the `apply` callback of [`Size`].
pub struct SizeApplyArgs<'a, E> {
    /// State the size was computed from.
    pub state: MiddlewareState<'a, E>,
    /// Width the floating element may occupy before overflowing.
    pub available_width: f64,
    /// Height the floating element may occupy before overflowing.
    pub available_height: f64,
}

/// Callback that applies the available size to the floating element.
pub type SizeApply<E> = Rc<dyn Fn(&SizeApplyArgs<'_, E>) -> FloatposResult<()>>;

/// Options of [`Size`].
pub struct SizeOptions<E> {
    /// Invoked with the available size on every pass.
    pub apply: Option<SizeApply<E>>,
    /// Boundary and padding for overflow detection.
    pub detect_overflow: DetectOverflowOptions<E>,
}

impl<E> Default for SizeOptions<E> {
    fn default() -> Self {
        Self {
            apply: None,
            detect_overflow: DetectOverflowOptions::default(),
        }
    }
}

impl<E: Clone> Clone for SizeOptions<E> {
    fn clone(&self) -> Self {
        Self {
            apply: self.apply.clone(),
            detect_overflow: self.detect_overflow.clone(),
        }
    }
}

impl<E> SizeOptions<E> {
    /// Install the apply callback.
    pub fn with_apply(
        mut self,
        apply: impl Fn(&SizeApplyArgs<'_, E>) -> FloatposResult<()> + 'static,
    ) -> Self {
        self.apply = Some(Rc::new(apply));
        self
    }

    /// Overflow detection options.
    pub fn with_detect_overflow(mut self, options: DetectOverflowOptions<E>) -> Self {
        self.detect_overflow = options;
        self
    }
}

/// Published by [`Size`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeData {
    /// Available width, never negative.
    pub available_width: f64,
    /// Available height, never negative.
    pub available_height: f64,
}

/// Computes the space available to the floating element and hands it to a callback.
pub struct Size<E> {
    options: Derivable<SizeOptions<E>, E>,
}

/// Size with fixed options.
pub fn size<E>(options: SizeOptions<E>) -> Size<E> {
    Size {
        options: Derivable::Static(options),
    }
}

/// Size with options computed per pass.
pub fn size_fn<E>(f: impl Fn(&MiddlewareState<'_, E>) -> SizeOptions<E> + 'static) -> Size<E> {
    Size {
        options: Derivable::computed(f),
    }
}

impl<E: Clone> Middleware<E> for Size<E> {
    fn name(&self) -> &str {
        "size"
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let options = self.options.resolve(state);
        let overflow = detect_overflow(state, &options.detect_overflow)?;
        let placement = state.placement;
        let side = placement.side();
        let alignment = placement.alignment();
        let width = state.rects.floating.width;
        let height = state.rects.floating.height;

        let (height_side, width_side) = match side {
            Side::Top | Side::Bottom => {
                let towards_left = if state.is_rtl()? {
                    Alignment::Start
                } else {
                    Alignment::End
                };
                let width_side = if alignment == Some(towards_left) {
                    Side::Left
                } else {
                    Side::Right
                };
                (side, width_side)
            }
            Side::Left | Side::Right => {
                let height_side = if alignment == Some(Alignment::End) {
                    Side::Top
                } else {
                    Side::Bottom
                };
                (height_side, side)
            }
        };

        let max_clipping_height = height - overflow.top - overflow.bottom;
        let max_clipping_width = width - overflow.left - overflow.right;
        let mut available_height = (height - overflow.get(height_side)).min(max_clipping_height);
        let mut available_width = (width - overflow.get(width_side)).min(max_clipping_width);

        let shift = state.middleware_data.shift();
        if shift.is_some_and(|s| s.enabled.x) {
            available_width = max_clipping_width;
        }
        if shift.is_some_and(|s| s.enabled.y) {
            available_height = max_clipping_height;
        }

        if shift.is_none() && alignment.is_none() {
            let x_min = overflow.left.max(0.0);
            let x_max = overflow.right.max(0.0);
            let y_min = overflow.top.max(0.0);
            let y_max = overflow.bottom.max(0.0);
            if placement.side_axis() == Axis::Y {
                let used = if x_min != 0.0 || x_max != 0.0 {
                    x_min + x_max
                } else {
                    overflow.left.max(overflow.right)
                };
                available_width = width - 2.0 * used;
            } else {
                let used = if y_min != 0.0 || y_max != 0.0 {
                    y_min + y_max
                } else {
                    overflow.top.max(overflow.bottom)
                };
                available_height = height - 2.0 * used;
            }
        }

        let data = SizeData {
            available_width: available_width.max(0.0),
            available_height: available_height.max(0.0),
        };
        tracing::trace!(
            width = data.available_width,
            height = data.available_height,
            "size"
        );

        if let Some(apply) = &options.apply {
            apply(&SizeApplyArgs {
                state: *state,
                available_width: data.available_width,
                available_height: data.available_height,
            })?;
        }

        let ret = MiddlewareReturn::none().with_data(MiddlewareDatum::Size(data));
        let next = state.platform.get_dimensions(state.elements.floating)?;
        if next.width != width || next.height != height {
            return Ok(ret.with_reset(Reset::recompute_rects()));
        }
        Ok(ret)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/size.rs"]
mod tests;
