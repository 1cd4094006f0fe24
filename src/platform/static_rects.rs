use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{ClientRect, Coords, Dimensions, ElementRects, Rect},
    foundation::error::{FloatposError, FloatposResult},
    platform::backend::{
        Boundary, ClippingRectQuery, ConvertRectQuery, Platform, RootBoundary, Strategy,
    },
};

/// Handle naming an element registered with a [`StaticPlatform`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    /// Id under which the document root is registered.
    pub const DOCUMENT: &'static str = "#document";

    /// Create an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default)]
struct ElementEntry {
    rect: Rect,
    client_rects: Vec<Rect>,
    clipping_ancestors: Vec<ElementId>,
    offset_parent: Option<ElementId>,
    scale: Option<Coords>,
    rtl: bool,
    is_virtual: bool,
}

/// In-memory measurement backend: every element is a pre-measured viewport-space rectangle.
///
/// Fits headless layout, tests, and replaying layouts captured elsewhere.
#[derive(Clone, Debug)]
pub struct StaticPlatform {
    viewport: Rect,
    elements: BTreeMap<ElementId, ElementEntry>,
}

impl StaticPlatform {
    /// Platform with the given viewport; the document initially covers the viewport.
    pub fn new(viewport: Rect) -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(
            ElementId::new(ElementId::DOCUMENT),
            ElementEntry {
                rect: viewport,
                ..ElementEntry::default()
            },
        );
        Self { viewport, elements }
    }

    /// Override the document rectangle used for [`RootBoundary::Document`].
    pub fn with_document(mut self, rect: Rect) -> Self {
        self.entry_mut(ElementId::DOCUMENT).rect = rect;
        self
    }

    /// Register (or re-measure) an element.
    pub fn with_element(mut self, id: &str, rect: Rect) -> Self {
        self.set_rect(id, rect);
        self
    }

    /// Register a virtual element: a bare rectangle with no clipping ancestors of its own.
    pub fn with_virtual_element(mut self, id: &str, rect: Rect) -> Self {
        let entry = self.entry_mut(id);
        entry.rect = rect;
        entry.is_virtual = true;
        self
    }

    /// Line boxes of an inline element.
    pub fn with_client_rects(mut self, id: &str, rects: Vec<Rect>) -> Self {
        self.entry_mut(id).client_rects = rects;
        self
    }

    /// Add a clipping (overflow) ancestor of `id`; ancestors must be registered elements.
    pub fn with_clipping_ancestor(mut self, id: &str, ancestor: &str) -> Self {
        self.entry_mut(id)
            .clipping_ancestors
            .push(ElementId::new(ancestor));
        self
    }

    /// Declare the offset parent of `id`.
    pub fn with_offset_parent(mut self, id: &str, parent: &str) -> Self {
        self.entry_mut(id).offset_parent = Some(ElementId::new(parent));
        self
    }

    /// Scale of an element's transformed subtree.
    pub fn with_scale(mut self, id: &str, scale: Coords) -> Self {
        self.entry_mut(id).scale = Some(scale);
        self
    }

    /// Mark an element as right-to-left.
    pub fn with_rtl(mut self, id: &str) -> Self {
        self.entry_mut(id).rtl = true;
        self
    }

    /// Update an element's rectangle in place.
    pub fn set_rect(&mut self, id: &str, rect: Rect) {
        self.entry_mut(id).rect = rect;
    }

    /// Viewport rectangle.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Rectangle of a registered element.
    pub fn rect(&self, id: &ElementId) -> FloatposResult<Rect> {
        Ok(self.entry(id)?.rect)
    }

    fn entry(&self, id: &ElementId) -> FloatposResult<&ElementEntry> {
        self.elements
            .get(id)
            .ok_or_else(|| FloatposError::platform(format!("unknown element '{id}'")))
    }

    fn entry_mut(&mut self, id: &str) -> &mut ElementEntry {
        self.elements.entry(ElementId::new(id)).or_default()
    }

    fn parent_frame(
        &self,
        floating: &ElementId,
        strategy: Strategy,
    ) -> FloatposResult<Option<(Rect, Coords)>> {
        if strategy == Strategy::Fixed {
            return Ok(None);
        }
        let Some(parent) = &self.entry(floating)?.offset_parent else {
            return Ok(None);
        };
        let entry = self.entry(parent)?;
        Ok(Some((
            entry.rect,
            entry.scale.unwrap_or(Coords::new(1.0, 1.0)),
        )))
    }
}

impl Platform<ElementId> for StaticPlatform {
    fn get_element_rects(
        &self,
        reference: &ElementId,
        floating: &ElementId,
        strategy: Strategy,
    ) -> FloatposResult<ElementRects> {
        let mut reference_rect = self.rect(reference)?;
        if let Some((parent, scale)) = self.parent_frame(floating, strategy)? {
            reference_rect = Rect::new(
                (reference_rect.x - parent.x) / scale.x,
                (reference_rect.y - parent.y) / scale.y,
                reference_rect.width / scale.x,
                reference_rect.height / scale.y,
            );
        }
        Ok(ElementRects {
            reference: reference_rect,
            floating: Rect::from_dimensions(self.rect(floating)?.dimensions()),
        })
    }

    fn get_clipping_rect(&self, query: ClippingRectQuery<'_, ElementId>) -> FloatposResult<Rect> {
        let root = match query.root_boundary {
            RootBoundary::Viewport => self.viewport,
            RootBoundary::Document => self.rect(&ElementId::new(ElementId::DOCUMENT))?,
            RootBoundary::Rect(r) => *r,
        };

        let boundary = match query.boundary {
            Boundary::ClippingAncestors => {
                let entry = self.entry(query.element)?;
                entry
                    .clipping_ancestors
                    .iter()
                    .map(|a| self.rect(a))
                    .collect::<FloatposResult<Vec<_>>>()?
            }
            Boundary::Element(e) => vec![self.rect(e)?],
            Boundary::Elements(list) => list
                .iter()
                .map(|e| self.rect(e))
                .collect::<FloatposResult<Vec<_>>>()?,
            Boundary::Rect(r) => vec![*r],
        };

        Ok(boundary.into_iter().fold(root, Rect::intersect))
    }

    fn get_dimensions(&self, element: &ElementId) -> FloatposResult<Dimensions> {
        Ok(self.rect(element)?.dimensions())
    }

    fn convert_offset_parent_relative_rect_to_viewport_relative_rect(
        &self,
        query: ConvertRectQuery<'_, ElementId>,
    ) -> FloatposResult<Rect> {
        let Some((parent, scale)) = self.parent_frame(query.floating, query.strategy)? else {
            return Ok(query.rect);
        };
        let r = query.rect;
        Ok(Rect::new(
            r.x * scale.x + parent.x,
            r.y * scale.y + parent.y,
            r.width * scale.x,
            r.height * scale.y,
        ))
    }

    fn is_rtl(&self, element: &ElementId) -> FloatposResult<bool> {
        Ok(self.entry(element)?.rtl)
    }

    fn get_scale(&self, element: &ElementId) -> FloatposResult<Coords> {
        Ok(self
            .entry(element)?
            .scale
            .unwrap_or(Coords::new(1.0, 1.0)))
    }

    fn get_offset_parent(&self, element: &ElementId) -> FloatposResult<Option<ElementId>> {
        Ok(self.entry(element)?.offset_parent.clone())
    }

    fn get_document_element(&self, _element: &ElementId) -> FloatposResult<Option<ElementId>> {
        Ok(Some(ElementId::new(ElementId::DOCUMENT)))
    }

    fn get_client_rects(&self, element: &ElementId) -> FloatposResult<Vec<ClientRect>> {
        let entry = self.entry(element)?;
        if entry.client_rects.is_empty() {
            return Ok(vec![ClientRect::from(entry.rect)]);
        }
        Ok(entry
            .client_rects
            .iter()
            .copied()
            .map(ClientRect::from)
            .collect())
    }

    fn is_element(&self, element: &ElementId) -> bool {
        self.elements
            .get(element)
            .is_none_or(|entry| !entry.is_virtual)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/platform/static_rects.rs"]
mod tests;
