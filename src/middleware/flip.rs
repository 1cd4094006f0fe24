use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::FloatposResult,
    foundation::math::sum_positive,
    geometry::coords::alignment_sides,
    geometry::placement::{Axis, Placement},
    overflow::detect::{DetectOverflowOptions, detect_overflow},
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareDatum, MiddlewareReturn, MiddlewareState, Reset},
};

/// Which cross-axis overflow counts against a placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipCrossAxis {
    /// Only the side overflow is checked.
    Off,
    /// Overflow on the alignment sides also fails a placement.
    #[default]
    On,
    /// Alignment sides are checked only for placements on the initial side axis.
    Alignment,
}

/// What to do when no candidate fits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackStrategy {
    /// Pick the candidate with the least total overflow.
    #[default]
    BestFit,
    /// Return to the initial placement.
    InitialPlacement,
}

/// Whether perpendicular placements are appended to the default fallbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackAxisSideDirection {
    /// Only the opposite side.
    #[default]
    None,
    /// Perpendicular sides, start side first.
    Start,
    /// Perpendicular sides, end side first.
    End,
}

/// Options of [`Flip`].
pub struct FlipOptions<E> {
    /// Check overflow on the placement's side.
    pub main_axis: bool,
    /// Check overflow on the alignment sides.
    pub cross_axis: FlipCrossAxis,
    /// Candidates tried in order after the initial placement. Derived from the initial
    /// placement when unset.
    pub fallback_placements: Option<Vec<Placement>>,
    /// Choice when no candidate fits.
    pub fallback_strategy: FallbackStrategy,
    /// Extend the derived fallbacks with perpendicular placements.
    pub fallback_axis_side_direction: FallbackAxisSideDirection,
    /// Derived fallbacks include the alignment-swapped placements.
    pub flip_alignment: bool,
    /// Boundary and padding for overflow detection.
    pub detect_overflow: DetectOverflowOptions<E>,
}

impl<E> Default for FlipOptions<E> {
    fn default() -> Self {
        Self {
            main_axis: true,
            cross_axis: FlipCrossAxis::On,
            fallback_placements: None,
            fallback_strategy: FallbackStrategy::BestFit,
            fallback_axis_side_direction: FallbackAxisSideDirection::None,
            flip_alignment: true,
            detect_overflow: DetectOverflowOptions::default(),
        }
    }
}

impl<E: Clone> Clone for FlipOptions<E> {
    fn clone(&self) -> Self {
        Self {
            main_axis: self.main_axis,
            cross_axis: self.cross_axis,
            fallback_placements: self.fallback_placements.clone(),
            fallback_strategy: self.fallback_strategy,
            fallback_axis_side_direction: self.fallback_axis_side_direction,
            flip_alignment: self.flip_alignment,
            detect_overflow: self.detect_overflow.clone(),
        }
    }
}

impl<E> FlipOptions<E> {
    /// Explicit fallback list.
    pub fn with_fallback_placements(mut self, placements: Vec<Placement>) -> Self {
        self.fallback_placements = Some(placements);
        self
    }

    /// Cross-axis check mode.
    pub fn with_cross_axis(mut self, cross_axis: FlipCrossAxis) -> Self {
        self.cross_axis = cross_axis;
        self
    }

    /// Strategy when nothing fits.
    pub fn with_fallback_strategy(mut self, strategy: FallbackStrategy) -> Self {
        self.fallback_strategy = strategy;
        self
    }

    /// Perpendicular fallback direction.
    pub fn with_fallback_axis_side_direction(
        mut self,
        direction: FallbackAxisSideDirection,
    ) -> Self {
        self.fallback_axis_side_direction = direction;
        self
    }

    /// Overflow detection options.
    pub fn with_detect_overflow(mut self, options: DetectOverflowOptions<E>) -> Self {
        self.detect_overflow = options;
        self
    }

    fn candidates(&self, initial: Placement, rtl: bool) -> Vec<Placement> {
        let mut out = vec![initial];
        match &self.fallback_placements {
            Some(list) => out.extend(list.iter().copied()),
            None => {
                if initial.is_base() || !self.flip_alignment {
                    out.push(initial.opposite());
                } else {
                    out.extend(initial.expanded());
                }
                let start_first = match self.fallback_axis_side_direction {
                    FallbackAxisSideDirection::None => None,
                    FallbackAxisSideDirection::Start => Some(true),
                    FallbackAxisSideDirection::End => Some(false),
                };
                if let Some(start_first) = start_first {
                    out.extend(initial.opposite_axis_placements(
                        self.flip_alignment,
                        start_first,
                        rtl,
                    ));
                }
            }
        }
        out
    }
}

/// Overflow recorded for one tried placement: the side first, then the alignment sides when
/// checked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementOverflow {
    /// Placement that was tried.
    pub placement: Placement,
    /// Checked overflow values.
    pub overflows: Vec<f64>,
}

impl PlacementOverflow {
    pub(crate) fn side(&self) -> f64 {
        self.overflows.first().copied().unwrap_or(0.0)
    }

    fn first_alignment(&self) -> f64 {
        self.overflows.get(1).copied().unwrap_or(0.0)
    }
}

/// Published by [`Flip`] while it walks its candidates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlipData {
    /// Index of the candidate in effect.
    pub index: usize,
    /// Every placement tried so far.
    pub overflows: Vec<PlacementOverflow>,
}

/// Changes the placement to a fallback when the current one overflows.
pub struct Flip<E> {
    options: Derivable<FlipOptions<E>, E>,
}

/// Flip with fixed options.
pub fn flip<E>(options: FlipOptions<E>) -> Flip<E> {
    Flip {
        options: Derivable::Static(options),
    }
}

/// Flip with options computed per pass.
pub fn flip_fn<E>(f: impl Fn(&MiddlewareState<'_, E>) -> FlipOptions<E> + 'static) -> Flip<E> {
    Flip {
        options: Derivable::computed(f),
    }
}

impl<E: Clone> Middleware<E> for Flip<E> {
    fn name(&self) -> &str {
        "flip"
    }

    fn max_resets(&self) -> usize {
        match self.options.as_static().and_then(|o| o.fallback_placements.as_ref()) {
            Some(list) => list.len() + 1,
            None => Placement::ALL.len() + 1,
        }
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let options = self.options.resolve(state);
        let placement = state.placement;
        let initial = state.initial_placement;
        let initial_axis = initial.side_axis();
        let rtl = state.is_rtl()?;
        let candidates = options.candidates(initial, rtl);

        let overflow = detect_overflow(state, &options.detect_overflow)?;
        let mut checked = Vec::with_capacity(3);
        if options.main_axis {
            checked.push(overflow.get(placement.side()));
        }
        if options.cross_axis != FlipCrossAxis::Off {
            let (first, second) = alignment_sides(placement, &state.rects, rtl);
            checked.push(overflow.get(first));
            checked.push(overflow.get(second));
        }

        let previous = state.middleware_data.flip();
        let mut tried = previous.map(|d| d.overflows.clone()).unwrap_or_default();
        tried.push(PlacementOverflow {
            placement,
            overflows: checked.clone(),
        });

        if checked.iter().all(|v| *v <= 0.0) {
            return Ok(MiddlewareReturn::none());
        }

        let next_index = previous.map_or(0, |d| d.index) + 1;
        if let Some(next) = candidates.get(next_index).copied() {
            let ignore_cross_axis = options.cross_axis == FlipCrossAxis::Alignment
                && initial_axis != next.side_axis();
            let same_axis_all_overflow = tried
                .iter()
                .all(|t| t.placement.side_axis() != initial_axis || t.side() > 0.0);
            if !ignore_cross_axis || same_axis_all_overflow {
                tracing::trace!(next = %next, index = next_index, "flip candidate");
                return Ok(MiddlewareReturn::none()
                    .with_data(MiddlewareDatum::Flip(FlipData {
                        index: next_index,
                        overflows: tried,
                    }))
                    .with_reset(Reset::to_placement(next)));
            }
        }

        let mut fitting: Vec<&PlacementOverflow> =
            tried.iter().filter(|t| t.side() <= 0.0).collect();
        fitting.sort_by(|a, b| a.first_alignment().total_cmp(&b.first_alignment()));
        let mut chosen = fitting.first().map(|t| t.placement);

        if chosen.is_none() {
            chosen = match options.fallback_strategy {
                FallbackStrategy::BestFit => {
                    let perpendicular =
                        options.fallback_axis_side_direction != FallbackAxisSideDirection::None;
                    let mut scored: Vec<(Placement, f64)> = tried
                        .iter()
                        .filter(|t| {
                            let axis = t.placement.side_axis();
                            !perpendicular || axis == initial_axis || axis == Axis::Y
                        })
                        .map(|t| (t.placement, sum_positive(&t.overflows)))
                        .collect();
                    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
                    scored.first().map(|(p, _)| *p)
                }
                FallbackStrategy::InitialPlacement => Some(initial),
            };
        }

        match chosen {
            Some(best) if best != placement => {
                tracing::trace!(best = %best, "flip settled");
                Ok(MiddlewareReturn::none().with_reset(Reset::to_placement(best)))
            }
            _ => Ok(MiddlewareReturn::none()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/flip.rs"]
mod tests;
