use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::FloatposResult,
    geometry::coords::alignment_sides,
    geometry::placement::{Alignment, Placement},
    middleware::flip::PlacementOverflow,
    overflow::detect::{DetectOverflowOptions, detect_overflow},
    pipeline::compute::Middleware,
    pipeline::options::Derivable,
    pipeline::state::{MiddlewareDatum, MiddlewareReturn, MiddlewareState, Reset},
};

/// Options of [`AutoPlacement`].
pub struct AutoPlacementOptions<E> {
    /// Rank aligned placements by side plus first alignment-side overflow.
    pub cross_axis: bool,
    /// Preferred alignment; placements with it are tried first.
    pub alignment: Option<Alignment>,
    /// With an `alignment`, also try the opposite alignment.
    pub auto_alignment: bool,
    /// Candidate placements. Every placement when unset, narrowed by `alignment`.
    pub allowed_placements: Option<Vec<Placement>>,
    /// Boundary and padding for overflow detection.
    pub detect_overflow: DetectOverflowOptions<E>,
}

impl<E> Default for AutoPlacementOptions<E> {
    fn default() -> Self {
        Self {
            cross_axis: false,
            alignment: None,
            auto_alignment: true,
            allowed_placements: None,
            detect_overflow: DetectOverflowOptions::default(),
        }
    }
}

impl<E: Clone> Clone for AutoPlacementOptions<E> {
    fn clone(&self) -> Self {
        Self {
            cross_axis: self.cross_axis,
            alignment: self.alignment,
            auto_alignment: self.auto_alignment,
            allowed_placements: self.allowed_placements.clone(),
            detect_overflow: self.detect_overflow.clone(),
        }
    }
}

impl<E> AutoPlacementOptions<E> {
    /// Restrict the candidates.
    pub fn with_allowed_placements(mut self, placements: Vec<Placement>) -> Self {
        self.allowed_placements = Some(placements);
        self
    }

    /// Prefer an alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Toggle trying the opposite alignment.
    pub fn with_auto_alignment(mut self, on: bool) -> Self {
        self.auto_alignment = on;
        self
    }

    /// Overflow detection options.
    pub fn with_detect_overflow(mut self, options: DetectOverflowOptions<E>) -> Self {
        self.detect_overflow = options;
        self
    }

    /// Placements evaluated, in evaluation order.
    ///
    /// Without an explicit list or alignment only the four centered placements are tried.
    pub fn placement_list(&self) -> Vec<Placement> {
        let allowed: &[Placement] = match &self.allowed_placements {
            Some(list) => list,
            None => &Placement::ALL,
        };
        let Some(alignment) = self.alignment else {
            return match &self.allowed_placements {
                Some(list) => list.clone(),
                None => allowed.iter().copied().filter(|p| p.is_base()).collect(),
            };
        };
        let preferred = allowed
            .iter()
            .filter(|p| p.alignment() == Some(alignment));
        let others = allowed.iter().filter(|p| {
            p.alignment() != Some(alignment) && self.auto_alignment && !p.is_base()
        });
        preferred.chain(others).copied().collect()
    }
}

/// Published by [`AutoPlacement`] while it evaluates candidates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoPlacementData {
    /// Index of the next candidate.
    pub index: usize,
    /// Every placement evaluated so far.
    pub overflows: Vec<PlacementOverflow>,
}

/// Chooses the placement with the most space, ignoring the requested placement.
pub struct AutoPlacement<E> {
    options: Derivable<AutoPlacementOptions<E>, E>,
}

/// Auto placement with fixed options.
pub fn auto_placement<E>(options: AutoPlacementOptions<E>) -> AutoPlacement<E> {
    AutoPlacement {
        options: Derivable::Static(options),
    }
}

/// Auto placement with options computed per pass.
pub fn auto_placement_fn<E>(
    f: impl Fn(&MiddlewareState<'_, E>) -> AutoPlacementOptions<E> + 'static,
) -> AutoPlacement<E> {
    AutoPlacement {
        options: Derivable::computed(f),
    }
}

impl<E: Clone> Middleware<E> for AutoPlacement<E> {
    fn name(&self) -> &str {
        "autoPlacement"
    }

    fn max_resets(&self) -> usize {
        let candidates = match self.options.as_static() {
            Some(options) => options.placement_list().len(),
            None => Placement::ALL.len(),
        };
        candidates + 1
    }

    fn run(&self, state: &MiddlewareState<'_, E>) -> FloatposResult<MiddlewareReturn> {
        let options = self.options.resolve(state);
        let placements = options.placement_list();
        let previous = state.middleware_data.auto_placement();
        let index = previous.map_or(0, |d| d.index);

        let Some(current) = placements.get(index).copied() else {
            return Ok(MiddlewareReturn::none());
        };
        if state.placement != current {
            return Ok(MiddlewareReturn::none().with_reset(Reset::to_placement(placements[0])));
        }

        let rtl = state.is_rtl()?;
        let overflow = detect_overflow(state, &options.detect_overflow)?;
        let (first, second) = alignment_sides(current, &state.rects, rtl);
        let mut tried = previous.map(|d| d.overflows.clone()).unwrap_or_default();
        tried.push(PlacementOverflow {
            placement: current,
            overflows: vec![
                overflow.get(current.side()),
                overflow.get(first),
                overflow.get(second),
            ],
        });

        if let Some(next) = placements.get(index + 1).copied() {
            return Ok(MiddlewareReturn::none()
                .with_data(MiddlewareDatum::AutoPlacement(AutoPlacementData {
                    index: index + 1,
                    overflows: tried,
                }))
                .with_reset(Reset::to_placement(next)));
        }

        let mut ranked: Vec<(&PlacementOverflow, f64)> = tried
            .iter()
            .map(|t| {
                let score = if t.placement.alignment().is_some() && options.cross_axis {
                    t.overflows.iter().take(2).sum::<f64>()
                } else {
                    t.side()
                };
                (t, score)
            })
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        let fits_every_side = ranked.iter().find(|(t, _)| {
            let checked = if t.placement.alignment().is_some() { 2 } else { 3 };
            t.overflows.iter().take(checked).all(|v| *v <= 0.0)
        });
        let best = fits_every_side
            .or(ranked.first())
            .map(|(t, _)| t.placement)
            .unwrap_or(current);

        tracing::trace!(best = %best, candidates = placements.len(), "auto placement settled");
        if best == state.placement {
            return Ok(MiddlewareReturn::none());
        }
        Ok(MiddlewareReturn::none()
            .with_data(MiddlewareDatum::AutoPlacement(AutoPlacementData {
                index: index + 1,
                overflows: tried,
            }))
            .with_reset(Reset::to_placement(best)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/middleware/auto_placement.rs"]
mod tests;
