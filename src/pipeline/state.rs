use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{
    foundation::core::{Coords, ElementRects},
    foundation::error::FloatposResult,
    geometry::placement::Placement,
    middleware::{
        arrow::ArrowData, auto_placement::AutoPlacementData, flip::FlipData, hide::HideData,
        offset::OffsetData, shift::ShiftData, size::SizeData,
    },
    overflow::detect::ElementContext,
    platform::backend::{Platform, Strategy},
};

/// Reference and floating handles of one computation.
pub struct Elements<'a, E> {
    /// Anchor element.
    pub reference: &'a E,
    /// Positioned element.
    pub floating: &'a E,
}

impl<'a, E> Elements<'a, E> {
    /// Handle for `context`.
    pub fn get(&self, context: ElementContext) -> &'a E {
        match context {
            ElementContext::Reference => self.reference,
            ElementContext::Floating => self.floating,
        }
    }
}

impl<E> Clone for Elements<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Elements<'_, E> {}

/// Snapshot handed to each middleware invocation.
pub struct MiddlewareState<'a, E> {
    /// Current x coordinate.
    pub x: f64,
    /// Current y coordinate.
    pub y: f64,
    /// Placement requested by the caller.
    pub initial_placement: Placement,
    /// Placement in effect for this pass.
    pub placement: Placement,
    /// Positioning strategy.
    pub strategy: Strategy,
    /// Rectangles measured for the current placement.
    pub rects: ElementRects,
    /// Element handles.
    pub elements: Elements<'a, E>,
    /// Data published by middleware so far.
    pub middleware_data: &'a MiddlewareData,
    /// Measurement backend.
    pub platform: &'a dyn Platform<E>,
}

impl<E> MiddlewareState<'_, E> {
    /// Current coordinates.
    pub fn coords(&self) -> Coords {
        Coords::new(self.x, self.y)
    }

    /// Copy of the state with replaced coordinates.
    pub fn with_coords(&self, coords: Coords) -> Self {
        Self {
            x: coords.x,
            y: coords.y,
            ..*self
        }
    }

    /// Whether the floating element lays out right-to-left.
    pub fn is_rtl(&self) -> FloatposResult<bool> {
        self.platform.is_rtl(self.elements.floating)
    }
}

impl<E> Clone for MiddlewareState<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for MiddlewareState<'_, E> {}

impl<E> fmt::Debug for MiddlewareState<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareState")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("initial_placement", &self.initial_placement)
            .field("placement", &self.placement)
            .field("strategy", &self.strategy)
            .field("rects", &self.rects)
            .field("middleware_data", &self.middleware_data)
            .finish_non_exhaustive()
    }
}

/// Data one middleware publishes under its name.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MiddlewareDatum {
    /// Published by `offset`.
    Offset(OffsetData),
    /// Published by `shift`.
    Shift(ShiftData),
    /// Published by `flip`.
    Flip(FlipData),
    /// Published by `auto_placement`.
    AutoPlacement(AutoPlacementData),
    /// Published by `arrow`.
    Arrow(ArrowData),
    /// Published by `hide`.
    Hide(HideData),
    /// Published by `size`.
    Size(SizeData),
    /// Published by user-defined middleware.
    Custom(serde_json::Value),
}

impl MiddlewareDatum {
    /// Fold `other` into `self`: hide flags and custom JSON objects merge key-wise, every
    /// other record is replaced.
    fn merge(&mut self, other: MiddlewareDatum) {
        match (self, other) {
            (MiddlewareDatum::Hide(old), MiddlewareDatum::Hide(new)) => old.merge(new),
            (
                MiddlewareDatum::Custom(serde_json::Value::Object(old)),
                MiddlewareDatum::Custom(serde_json::Value::Object(new)),
            ) => old.extend(new),
            (slot, other) => *slot = other,
        }
    }
}

/// Per-middleware data keyed by middleware name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MiddlewareData {
    entries: BTreeMap<String, MiddlewareDatum>,
}

impl MiddlewareData {
    /// Entry published under `name`.
    pub fn get(&self, name: &str) -> Option<&MiddlewareDatum> {
        self.entries.get(name)
    }

    /// Merge `datum` into the entry for `name`.
    pub fn merge(&mut self, name: &str, datum: MiddlewareDatum) {
        match self.entries.get_mut(name) {
            Some(existing) => existing.merge(datum),
            None => {
                self.entries.insert(name.to_owned(), datum);
            }
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing was published.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MiddlewareDatum)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `offset` entry.
    pub fn offset(&self) -> Option<&OffsetData> {
        match self.get("offset")? {
            MiddlewareDatum::Offset(d) => Some(d),
            _ => None,
        }
    }

    /// `shift` entry.
    pub fn shift(&self) -> Option<&ShiftData> {
        match self.get("shift")? {
            MiddlewareDatum::Shift(d) => Some(d),
            _ => None,
        }
    }

    /// `flip` entry.
    pub fn flip(&self) -> Option<&FlipData> {
        match self.get("flip")? {
            MiddlewareDatum::Flip(d) => Some(d),
            _ => None,
        }
    }

    /// `autoPlacement` entry.
    pub fn auto_placement(&self) -> Option<&AutoPlacementData> {
        match self.get("autoPlacement")? {
            MiddlewareDatum::AutoPlacement(d) => Some(d),
            _ => None,
        }
    }

    /// `arrow` entry.
    pub fn arrow(&self) -> Option<&ArrowData> {
        match self.get("arrow")? {
            MiddlewareDatum::Arrow(d) => Some(d),
            _ => None,
        }
    }

    /// `hide` entry.
    pub fn hide(&self) -> Option<&HideData> {
        match self.get("hide")? {
            MiddlewareDatum::Hide(d) => Some(d),
            _ => None,
        }
    }

    /// `size` entry.
    pub fn size(&self) -> Option<&SizeData> {
        match self.get("size")? {
            MiddlewareDatum::Size(d) => Some(d),
            _ => None,
        }
    }
}

/// How a reset treats the measured rectangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResetRects {
    /// Re-measure through the platform.
    Recompute,
    /// Install the given rectangles.
    Replace(ElementRects),
}

/// Request to restart the pipeline from the first middleware.
///
/// Coordinates are always recomputed from the (possibly new) placement. Replacing or
/// re-measuring rects also clears the published middleware data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reset {
    /// New placement for the next pass.
    pub placement: Option<Placement>,
    /// Rectangle handling for the next pass.
    pub rects: Option<ResetRects>,
}

impl Reset {
    /// Restart with the same placement and rects.
    pub fn restart() -> Self {
        Self::default()
    }

    /// Restart with a new placement.
    pub fn to_placement(placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            rects: None,
        }
    }

    /// Restart after re-measuring.
    pub fn recompute_rects() -> Self {
        Self {
            placement: None,
            rects: Some(ResetRects::Recompute),
        }
    }

    /// Restart with replacement rects.
    pub fn replace_rects(rects: ElementRects) -> Self {
        Self {
            placement: None,
            rects: Some(ResetRects::Replace(rects)),
        }
    }
}

/// Optional update returned by a middleware.
///
/// `x`/`y` are absolute coordinates that replace the current ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MiddlewareReturn {
    /// New x coordinate.
    pub x: Option<f64>,
    /// New y coordinate.
    pub y: Option<f64>,
    /// Data merged under the middleware's name.
    pub data: Option<MiddlewareDatum>,
    /// Pipeline restart request.
    pub reset: Option<Reset>,
}

impl MiddlewareReturn {
    /// No change.
    pub fn none() -> Self {
        Self::default()
    }

    /// Move to `coords`.
    pub fn at(coords: Coords) -> Self {
        Self {
            x: Some(coords.x),
            y: Some(coords.y),
            ..Self::default()
        }
    }

    /// Attach data.
    pub fn with_data(mut self, data: MiddlewareDatum) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a reset request.
    pub fn with_reset(mut self, reset: Reset) -> Self {
        self.reset = Some(reset);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/state.rs"]
mod tests;
