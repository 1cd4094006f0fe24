use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{ClientRect, Coords, Padding, Rect, SideObject},
    foundation::error::FloatposResult,
    pipeline::state::MiddlewareState,
    platform::backend::{Boundary, ClippingRectQuery, ConvertRectQuery, RootBoundary},
};

/// Which element's rectangle is tested for overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementContext {
    /// The anchor element.
    Reference,
    /// The positioned element.
    #[default]
    Floating,
}

impl ElementContext {
    /// The other element.
    pub fn opposite(self) -> ElementContext {
        match self {
            ElementContext::Reference => ElementContext::Floating,
            ElementContext::Floating => ElementContext::Reference,
        }
    }
}

/// Options shared by every overflow-based middleware.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectOverflowOptions<E> {
    /// Clipping boundary.
    pub boundary: Boundary<E>,
    /// Root boundary intersected with `boundary`.
    pub root_boundary: RootBoundary,
    /// Element tested for overflow.
    pub element_context: ElementContext,
    /// Use the clipping ancestors of the other element.
    pub alt_boundary: bool,
    /// Inset of the clipping rect.
    pub padding: Padding,
    /// Rectangle to test instead of the element-context rectangle.
    pub rect: Option<Rect>,
}

impl<E> Default for DetectOverflowOptions<E> {
    fn default() -> Self {
        Self {
            boundary: Boundary::ClippingAncestors,
            root_boundary: RootBoundary::Viewport,
            element_context: ElementContext::Floating,
            alt_boundary: false,
            padding: Padding::default(),
            rect: None,
        }
    }
}

impl<E> DetectOverflowOptions<E> {
    /// Options with the given padding.
    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Options with the given boundary.
    pub fn with_boundary(mut self, boundary: Boundary<E>) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Signed overflow of an element against its clipping boundary.
///
/// Positive values mean the element crosses the boundary on that side by that amount,
/// negative values are remaining clearance.
pub fn detect_overflow<E>(
    state: &MiddlewareState<'_, E>,
    options: &DetectOverflowOptions<E>,
) -> FloatposResult<SideObject> {
    let platform = state.platform;
    let padding = options.padding.to_sides();

    let context = if options.alt_boundary {
        options.element_context.opposite()
    } else {
        options.element_context
    };
    let element = state.elements.get(context);
    let document;
    let clip_element = if platform.is_element(element) {
        element
    } else {
        document = platform.get_document_element(state.elements.floating)?;
        document.as_ref().unwrap_or(element)
    };

    let clipping = ClientRect::from(platform.get_clipping_rect(ClippingRectQuery {
        element: clip_element,
        boundary: &options.boundary,
        root_boundary: &options.root_boundary,
        strategy: state.strategy,
    })?);

    let rect = options
        .rect
        .unwrap_or_else(|| match options.element_context {
            ElementContext::Floating => Rect::new(
                state.x,
                state.y,
                state.rects.floating.width,
                state.rects.floating.height,
            ),
            ElementContext::Reference => state.rects.reference,
        });

    let offset_parent = platform.get_offset_parent(state.elements.floating)?;
    let scale = match &offset_parent {
        Some(parent) if platform.is_element(parent) => platform.get_scale(parent)?,
        _ => Coords::new(1.0, 1.0),
    };

    let element_rect = ClientRect::from(
        platform.convert_offset_parent_relative_rect_to_viewport_relative_rect(
            ConvertRectQuery {
                reference: state.elements.reference,
                floating: state.elements.floating,
                rect,
                offset_parent: offset_parent.as_ref(),
                strategy: state.strategy,
            },
        )?,
    );

    Ok(SideObject {
        top: (clipping.top - element_rect.top + padding.top) / scale.y,
        bottom: (element_rect.bottom - clipping.bottom + padding.bottom) / scale.y,
        left: (clipping.left - element_rect.left + padding.left) / scale.x,
        right: (element_rect.right - clipping.right + padding.right) / scale.x,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/overflow/detect.rs"]
mod tests;
