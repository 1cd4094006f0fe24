use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Padding,
    foundation::error::FloatposResult,
    foundation::math::clamp,
    geometry::placement::Axis,
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareDatum, MiddlewareReturn, MiddlewareState},
};

/// Options of [`Arrow`].
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowOptions<E> {
    /// The arrow element, measured through the platform.
    pub element: E,
    /// Minimum distance between the arrow and the floating element's edges.
    pub padding: Padding,
}

impl<E> ArrowOptions<E> {
    /// Arrow without padding.
    pub fn new(element: E) -> Self {
        Self {
            element,
            padding: Padding::default(),
        }
    }

    /// Set the edge padding.
    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }
}

/// Published by [`Arrow`]: the arrow's offset inside the floating element along the
/// alignment axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowData {
    /// Left offset for `top`/`bottom` placements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Top offset for `left`/`right` placements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Distance between the ideal center and the reported offset.
    pub center_offset: f64,
    /// Shift applied to an aligned floating element so the arrow can still reach a
    /// reference smaller than the arrow padding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_offset: Option<f64>,
    /// The arrow could not point at the reference center.
    pub clamped: bool,
}

/// Positions an arrow so it points at the reference center.
pub struct Arrow<E> {
    options: Derivable<ArrowOptions<E>, E>,
}

/// Arrow with fixed options.
pub fn arrow<E>(options: ArrowOptions<E>) -> Arrow<E> {
    Arrow {
        options: Derivable::Static(options),
    }
}

/// Arrow with options computed per pass.
pub fn arrow_fn<E>(f: impl Fn(&MiddlewareState<'_, E>) -> ArrowOptions<E> + 'static) -> Arrow<E> {
    Arrow {
        options: Derivable::computed(f),
    }
}

impl<E: Clone> Middleware<E> for Arrow<E> {
    fn name(&self) -> &str {
        "arrow"
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let options = self.options.resolve(state);
        let padding = options.padding.to_sides();
        let axis = state.placement.alignment_axis();
        let length = axis.length();
        let reference = state.rects.reference;
        let floating = state.rects.floating;
        let arrow_length = state.platform.get_dimensions(&options.element)?.get(length);

        let coord = state.coords().get(axis);
        let end_diff =
            reference.length(length) + reference.origin(axis) - coord - floating.length(length);
        let start_diff = coord - reference.origin(axis);
        let center_to_reference = end_diff / 2.0 - start_diff / 2.0;

        let client_size = floating.length(length);
        let largest_padding = client_size / 2.0 - arrow_length / 2.0 - 1.0;
        let min_padding = padding.get(axis.min_side()).min(largest_padding);
        let max_padding = padding.get(axis.max_side()).min(largest_padding);

        let min = min_padding;
        let max = client_size - arrow_length - max_padding;
        let center = client_size / 2.0 - arrow_length / 2.0 + center_to_reference;
        let offset = clamp(min, center, max);

        let near_padding = if center < min { min_padding } else { max_padding };
        let alignment_offset = (state.placement.alignment().is_some()
            && center != offset
            && reference.length(length) / 2.0 - near_padding - arrow_length / 2.0 < 0.0)
            .then(|| if center < min { center - min } else { center - max });
        let shift = alignment_offset.unwrap_or(0.0);

        let (x, y) = match axis {
            Axis::X => (Some(offset), None),
            Axis::Y => (None, Some(offset)),
        };
        tracing::trace!(offset, center, shift, "arrow");
        let mut coords = state.coords();
        coords.set(axis, coord + shift);
        Ok(
            MiddlewareReturn::at(coords).with_data(MiddlewareDatum::Arrow(ArrowData {
                x,
                y,
                center_offset: center - offset - shift,
                alignment_offset,
                clamped: center != offset,
            })),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/arrow.rs"]
mod tests;
