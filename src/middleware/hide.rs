use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::{Rect, SideObject},
    foundation::error::FloatposResult,
    overflow::detect::{DetectOverflowOptions, ElementContext, detect_overflow},
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareDatum, MiddlewareReturn, MiddlewareState},
};

/// Which visibility checks [`Hide`] runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HideStrategy {
    /// Both checks.
    #[default]
    Both,
    /// The reference is fully clipped by its boundary.
    ReferenceHidden,
    /// The floating element escaped the reference's boundary.
    Escaped,
}

/// Options of [`Hide`].
pub struct HideOptions<E> {
    /// Checks to run.
    pub strategy: HideStrategy,
    /// Boundary and padding for overflow detection.
    pub detect_overflow: DetectOverflowOptions<E>,
}

impl<E> Default for HideOptions<E> {
    fn default() -> Self {
        Self {
            strategy: HideStrategy::Both,
            detect_overflow: DetectOverflowOptions::default(),
        }
    }
}

impl<E: Clone> Clone for HideOptions<E> {
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy,
            detect_overflow: self.detect_overflow.clone(),
        }
    }
}

impl<E> HideOptions<E> {
    /// Options running only `strategy`.
    pub fn with_strategy(mut self, strategy: HideStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Published by [`Hide`]. Fields of checks that did not run stay unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideData {
    /// The reference is fully clipped on some side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_hidden: Option<bool>,
    /// Per-side overflow of the reference beyond its own size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_hidden_offsets: Option<SideObject>,
    /// The floating element is fully outside the reference's boundary on some side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escaped: Option<bool>,
    /// Per-side overflow of the floating element beyond its own size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escaped_offsets: Option<SideObject>,
}

impl HideData {
    /// Overwrite the fields `other` sets.
    pub fn merge(&mut self, other: HideData) {
        if other.reference_hidden.is_some() {
            self.reference_hidden = other.reference_hidden;
            self.reference_hidden_offsets = other.reference_hidden_offsets;
        }
        if other.escaped.is_some() {
            self.escaped = other.escaped;
            self.escaped_offsets = other.escaped_offsets;
        }
    }
}

/// Reports whether the floating element should be hidden; never moves it.
pub struct Hide<E> {
    options: Derivable<HideOptions<E>, E>,
}

/// Hide with fixed options.
pub fn hide<E>(options: HideOptions<E>) -> Hide<E> {
    Hide {
        options: Derivable::Static(options),
    }
}

/// Hide with options computed per pass.
pub fn hide_fn<E>(f: impl Fn(&MiddlewareState<'_, E>) -> HideOptions<E> + 'static) -> Hide<E> {
    Hide {
        options: Derivable::computed(f),
    }
}

impl<E: Clone> Middleware<E> for Hide<E> {
    fn name(&self) -> &str {
        "hide"
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let options = self.options.resolve(state);
        let mut data = HideData::default();

        if options.strategy != HideStrategy::Escaped {
            let detect = DetectOverflowOptions {
                element_context: ElementContext::Reference,
                ..options.detect_overflow.clone()
            };
            let offsets = side_offsets(detect_overflow(state, &detect)?, state.rects.reference);
            data.reference_hidden = Some(offsets.any_non_negative());
            data.reference_hidden_offsets = Some(offsets);
        }

        if options.strategy != HideStrategy::ReferenceHidden {
            let detect = DetectOverflowOptions {
                alt_boundary: true,
                ..options.detect_overflow
            };
            let offsets = side_offsets(detect_overflow(state, &detect)?, state.rects.floating);
            data.escaped = Some(offsets.any_non_negative());
            data.escaped_offsets = Some(offsets);
        }

        tracing::trace!(
            reference_hidden = ?data.reference_hidden,
            escaped = ?data.escaped,
            "hide"
        );
        Ok(MiddlewareReturn::none().with_data(MiddlewareDatum::Hide(data)))
    }
}

fn side_offsets(overflow: SideObject, rect: Rect) -> SideObject {
    SideObject {
        top: overflow.top - rect.height,
        right: overflow.right - rect.width,
        bottom: overflow.bottom - rect.height,
        left: overflow.left - rect.width,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/hide.rs"]
mod tests;
