use serde::{Deserialize, Serialize};

use crate::foundation::core::{ClientRect, Coords, Dimensions, ElementRects, Rect};
use crate::foundation::error::FloatposResult;

/// CSS positioning scheme the floating element uses.
///
/// The engine treats it as an opaque tag; platforms use it to pick the coordinate space
/// rectangles are reported in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Relative to the floating element's offset parent.
    #[default]
    Absolute,
    /// Relative to the viewport.
    Fixed,
}

/// Clipping boundary the overflow of an element is measured against.
#[derive(Clone, Debug, PartialEq)]
pub enum Boundary<E> {
    /// The element's scrollable/overflow-clipping ancestors.
    ClippingAncestors,
    /// A single clipping element.
    Element(E),
    /// The intersection of several clipping elements.
    Elements(Vec<E>),
    /// An explicit rectangle in viewport space.
    Rect(Rect),
}

impl<E> Default for Boundary<E> {
    fn default() -> Self {
        Boundary::ClippingAncestors
    }
}

/// Outermost boundary intersected with [`Boundary`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootBoundary {
    /// The visual viewport.
    #[default]
    Viewport,
    /// The whole scrollable document.
    Document,
    /// An explicit rectangle in viewport space.
    Rect(Rect),
}

/// Inputs to [`Platform::get_clipping_rect`].
#[derive(Debug)]
pub struct ClippingRectQuery<'a, E> {
    /// Element whose clipping ancestors are considered.
    pub element: &'a E,
    /// Boundary override.
    pub boundary: &'a Boundary<E>,
    /// Root boundary.
    pub root_boundary: &'a RootBoundary,
    /// Positioning strategy.
    pub strategy: Strategy,
}

/// Inputs to [`Platform::convert_offset_parent_relative_rect_to_viewport_relative_rect`].
#[derive(Debug)]
pub struct ConvertRectQuery<'a, E> {
    /// Reference element handle.
    pub reference: &'a E,
    /// Floating element handle.
    pub floating: &'a E,
    /// Rectangle in the offset parent's coordinate space.
    pub rect: Rect,
    /// Offset parent of the floating element, if any.
    pub offset_parent: Option<&'a E>,
    /// Positioning strategy.
    pub strategy: Strategy,
}

/// Measurement backend queried by the engine.
///
/// `E` is the element handle type; the engine never inspects handles, it only passes them
/// back to the platform. Every query must be answerable synchronously for the duration of one
/// [`crate::compute_position`] call. A backend lacking an optional capability keeps the
/// provided default implementation.
pub trait Platform<E> {
    /// Rectangles of reference and floating element in the coordinate space selected by
    /// `strategy`. The floating rectangle's origin is conventionally zero.
    fn get_element_rects(
        &self,
        reference: &E,
        floating: &E,
        strategy: Strategy,
    ) -> FloatposResult<ElementRects>;

    /// Usable area for `query.element` in viewport space: the boundary intersected with the
    /// root boundary.
    fn get_clipping_rect(&self, query: ClippingRectQuery<'_, E>) -> FloatposResult<Rect>;

    /// Layout size of an element.
    fn get_dimensions(&self, element: &E) -> FloatposResult<Dimensions>;

    /// Map a rectangle from the offset parent's space into viewport space.
    fn convert_offset_parent_relative_rect_to_viewport_relative_rect(
        &self,
        query: ConvertRectQuery<'_, E>,
    ) -> FloatposResult<Rect> {
        Ok(query.rect)
    }

    /// Whether the element lays out right-to-left.
    fn is_rtl(&self, _element: &E) -> FloatposResult<bool> {
        Ok(false)
    }

    /// Accumulated scale of transformed ancestors.
    fn get_scale(&self, _element: &E) -> FloatposResult<Coords> {
        Ok(Coords::new(1.0, 1.0))
    }

    /// Containing block the element is positioned against.
    fn get_offset_parent(&self, _element: &E) -> FloatposResult<Option<E>> {
        Ok(None)
    }

    /// Document root of the tree containing `element`.
    fn get_document_element(&self, _element: &E) -> FloatposResult<Option<E>> {
        Ok(None)
    }

    /// Per-line boxes of an inline element, in viewport space.
    fn get_client_rects(&self, _element: &E) -> FloatposResult<Vec<ClientRect>> {
        Ok(Vec::new())
    }

    /// `false` for virtual handles that only describe a rectangle.
    fn is_element(&self, _element: &E) -> bool {
        true
    }
}
