use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{ElementRects, Padding, Rect},
    foundation::error::FloatposResult,
    geometry::placement::{Axis, Placement, Side},
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareReturn, MiddlewareState, Reset},
};

/// Options of [`Inline`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineOptions {
    /// Pointer x in viewport space, used to pick one of two disjoint lines.
    pub x: Option<f64>,
    /// Pointer y in viewport space.
    pub y: Option<f64>,
    /// Tolerance around each line when matching the pointer.
    pub padding: Padding,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            padding: Padding::Uniform(2.0),
        }
    }
}

impl InlineOptions {
    /// Options with a pointer position.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// Anchors to the line boxes of a reference that wraps across several lines.
pub struct Inline<E> {
    options: Derivable<InlineOptions, E>,
}

/// Inline with fixed options.
pub fn inline<E>(options: InlineOptions) -> Inline<E> {
    Inline {
        options: Derivable::Static(options),
    }
}

/// Inline with options computed per pass.
pub fn inline_fn<E>(f: impl Fn(&MiddlewareState<'_, E>) -> InlineOptions + 'static) -> Inline<E> {
    Inline {
        options: Derivable::computed(f),
    }
}

impl<E> Middleware<E> for Inline<E> {
    fn name(&self) -> &str {
        "inline"
    }

    /// One replacement per placement the pipeline settles on.
    fn max_resets(&self) -> usize {
        Placement::ALL.len() + 1
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let options = self.options.resolve(state);
        let native: Vec<Rect> = state
            .platform
            .get_client_rects(state.elements.reference)?
            .into_iter()
            .map(Rect::from)
            .collect();
        let Some(bounding) = Rect::bounding(&native) else {
            return Ok(MiddlewareReturn::none());
        };

        let lines = rects_by_line(&native);
        let chosen = line_box(&lines, bounding, state.placement, &options);
        let measured = state
            .platform
            .get_element_rects(state.elements.reference, state.elements.floating, state.strategy)?
            .reference;
        let next = chosen.translate(measured.x - bounding.x, measured.y - bounding.y);
        if next == state.rects.reference {
            return Ok(MiddlewareReturn::none());
        }

        tracing::trace!(lines = lines.len(), "inline reference rect replaced");
        Ok(MiddlewareReturn::none().with_reset(Reset::replace_rects(ElementRects {
            reference: next,
            floating: state.rects.floating,
        })))
    }
}

/// Group rects into lines: a rect starts a new line when its top is more than half the
/// previous rect's height below the previous top.
fn rects_by_line(rects: &[Rect]) -> Vec<Rect> {
    let mut sorted = rects.to_vec();
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut groups: Vec<Vec<Rect>> = Vec::new();
    let mut prev: Option<Rect> = None;
    for rect in sorted {
        match (prev, groups.last_mut()) {
            (Some(p), Some(group)) if rect.y - p.y <= p.height / 2.0 => group.push(rect),
            _ => groups.push(vec![rect]),
        }
        prev = Some(rect);
    }
    groups
        .iter()
        .filter_map(|group| Rect::bounding(group))
        .collect()
}

fn line_box(lines: &[Rect], fallback: Rect, placement: Placement, options: &InlineOptions) -> Rect {
    if let ([first, second], Some(x), Some(y)) = (lines, options.x, options.y)
        && first.x > second.right()
    {
        let pad = options.padding.to_sides();
        return lines
            .iter()
            .copied()
            .find(|r| {
                x > r.x - pad.left
                    && x < r.right() + pad.right
                    && y > r.y - pad.top
                    && y < r.bottom() + pad.bottom
            })
            .unwrap_or(fallback);
    }

    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return fallback;
    };
    if lines.len() < 2 {
        return fallback;
    }

    if placement.side_axis() == Axis::Y {
        let edge = if placement.side() == Side::Top {
            first
        } else {
            last
        };
        let top = first.y;
        return Rect::new(edge.x, top, edge.width, last.bottom() - top);
    }

    let min_left = lines.iter().map(|r| r.x).fold(f64::INFINITY, f64::min);
    let max_right = lines
        .iter()
        .map(|r| r.right())
        .fold(f64::NEG_INFINITY, f64::max);
    let measured: Vec<&Rect> = lines
        .iter()
        .filter(|r| {
            if placement.side() == Side::Left {
                r.x == min_left
            } else {
                r.right() == max_right
            }
        })
        .collect();
    match (measured.first(), measured.last()) {
        (Some(top), Some(bottom)) => Rect::new(
            min_left,
            top.y,
            max_right - min_left,
            bottom.bottom() - top.y,
        ),
        _ => fallback,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/inline.rs"]
mod tests;
